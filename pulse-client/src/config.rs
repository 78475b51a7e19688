use crate::api::{
    ReactionKind, SortOrder, UserId, ValidationError, ValidationReason,
    DEFAULT_MAX_CONTENT_LENGTH, MAX_THREAD_DEPTH,
};

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Deepest reply level, at most `MAX_THREAD_DEPTH`. 0 disables replies;
    /// the view still shows one level for replies present in the initial data.
    pub max_thread_depth: usize,

    /// Threads per page, None to show all threads at once
    pub page_size: Option<usize>,

    /// Load the next page when the end of the list scrolls into view
    pub infinite_scroll: bool,

    pub sort_order: SortOrder,

    /// If true, `set_sort_order` only notifies the host, which pushes the new
    /// order back with `sync_sort_order`
    pub controlled_sort: bool,

    pub pinned_first: bool,
    pub show_deleted_leaves: bool,
    pub max_content_length: usize,

    /// None allows any reaction kind
    pub allowed_reactions: Option<Vec<ReactionKind>>,

    /// Users allowed to edit or delete any comment, and the only ones allowed
    /// to pin or feature when non-empty
    pub moderators: Vec<UserId>,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            max_thread_depth: 3,
            page_size: Some(10),
            infinite_scroll: false,
            sort_order: SortOrder::Newest,
            controlled_sort: false,
            pinned_first: true,
            show_deleted_leaves: false,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            allowed_reactions: None,
            moderators: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Rejects configurations the engine would have to silently adjust
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_thread_depth > MAX_THREAD_DEPTH {
            return Err(ValidationError::new(
                "max_thread_depth",
                ValidationReason::DepthExceeded {
                    max: MAX_THREAD_DEPTH,
                },
            ));
        }
        Ok(())
    }

    pub fn is_moderator(&self, user: &UserId) -> bool {
        self.moderators.contains(user)
    }

    pub fn allows_reaction(&self, kind: &ReactionKind) -> bool {
        match &self.allowed_reactions {
            None => true,
            Some(kinds) => kinds.contains(kind),
        }
    }
}
