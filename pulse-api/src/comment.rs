use uuid::Uuid;

use crate::{CommentUser, Time, UserId, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct ReactionKind(pub String);

impl ReactionKind {
    pub fn new(kind: impl Into<String>) -> ReactionKind {
        ReactionKind(kind.into())
    }

    /// The reaction counted by the "most liked" ordering
    pub fn like() -> ReactionKind {
        ReactionKind::new("like")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentReaction {
    pub kind: ReactionKind,
    pub user: CommentUser,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,

    /// None for top-level comments
    #[serde(default)]
    pub parent_id: Option<CommentId>,

    pub user: CommentUser,
    pub content: String,

    /// Creation time
    pub date: Time,

    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_featured: bool,

    /// Reactions in the order they were added
    #[serde(default)]
    pub reactions: Vec<CommentReaction>,
}

impl Comment {
    /// Content shown in place of a deleted comment
    pub const TOMBSTONE: &'static str = "[deleted]";

    pub fn new(
        id: CommentId,
        parent_id: Option<CommentId>,
        user: CommentUser,
        content: String,
        date: Time,
    ) -> Comment {
        Comment {
            id,
            parent_id,
            user,
            content,
            date,
            is_edited: false,
            is_deleted: false,
            is_pinned: false,
            is_featured: false,
            reactions: Vec::new(),
        }
    }

    pub fn owner(&self) -> UserId {
        self.user.id
    }

    pub fn reaction_count(&self, kind: &ReactionKind) -> usize {
        self.reactions.iter().filter(|r| r.kind == *kind).count()
    }

    pub fn like_count(&self) -> usize {
        self.reaction_count(&ReactionKind::like())
    }

    pub fn has_reacted(&self, user: &UserId, kind: &ReactionKind) -> bool {
        self.reactions
            .iter()
            .any(|r| r.user.id == *user && r.kind == *kind)
    }

    /// Turns this comment into a tombstone. Replies keep pointing to it.
    pub fn tombstone(&mut self) {
        self.is_deleted = true;
        self.is_pinned = false;
        self.is_featured = false;
        self.content = String::from(Comment::TOMBSTONE);
        self.reactions.clear();
    }
}
