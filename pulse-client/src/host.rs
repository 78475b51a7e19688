use crate::api::{Comment, CommentId, Event, EventData, ReactionKind, SortOrder};

/// The embedding application. Every mutation applied locally is handed over
/// here so that it can be persisted; the engine never waits for the outcome.
pub trait CommentHost {
    fn on_event(&mut self, _event: &Event) {}

    fn on_sort_change(&mut self, _order: SortOrder) {}
}

/// No host: mutations stay local
impl CommentHost for () {}

impl<H: CommentHost + ?Sized> CommentHost for &mut H {
    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event)
    }

    fn on_sort_change(&mut self, order: SortOrder) {
        (**self).on_sort_change(order)
    }
}

impl<H: CommentHost + ?Sized> CommentHost for Box<H> {
    fn on_event(&mut self, event: &Event) {
        (**self).on_event(event)
    }

    fn on_sort_change(&mut self, order: SortOrder) {
        (**self).on_sort_change(order)
    }
}

/// Host made of one optional callback per kind of mutation
#[derive(Default)]
pub struct Callbacks {
    on_add: Option<Box<dyn FnMut(&Comment)>>,
    on_edit: Option<Box<dyn FnMut(CommentId, &str)>>,
    on_delete: Option<Box<dyn FnMut(CommentId)>>,
    on_react: Option<Box<dyn FnMut(CommentId, &ReactionKind, bool)>>,
    on_flag: Option<Box<dyn FnMut(CommentId)>>,
    on_pin: Option<Box<dyn FnMut(CommentId, bool)>>,
    on_feature: Option<Box<dyn FnMut(CommentId, bool)>>,
    on_sort_change: Option<Box<dyn FnMut(SortOrder)>>,
}

impl Callbacks {
    pub fn new() -> Callbacks {
        Callbacks::default()
    }

    /// `f` receives the comment as stored, with its new id, trimmed content
    /// and parent, rather than the raw arguments of `add_comment`
    pub fn with_add(mut self, f: impl FnMut(&Comment) + 'static) -> Self {
        self.on_add = Some(Box::new(f));
        self
    }

    pub fn with_edit(mut self, f: impl FnMut(CommentId, &str) + 'static) -> Self {
        self.on_edit = Some(Box::new(f));
        self
    }

    pub fn with_delete(mut self, f: impl FnMut(CommentId) + 'static) -> Self {
        self.on_delete = Some(Box::new(f));
        self
    }

    /// `f` receives true when the reaction was added, false when removed
    pub fn with_react(mut self, f: impl FnMut(CommentId, &ReactionKind, bool) + 'static) -> Self {
        self.on_react = Some(Box::new(f));
        self
    }

    pub fn with_flag(mut self, f: impl FnMut(CommentId) + 'static) -> Self {
        self.on_flag = Some(Box::new(f));
        self
    }

    pub fn with_pin(mut self, f: impl FnMut(CommentId, bool) + 'static) -> Self {
        self.on_pin = Some(Box::new(f));
        self
    }

    pub fn with_feature(mut self, f: impl FnMut(CommentId, bool) + 'static) -> Self {
        self.on_feature = Some(Box::new(f));
        self
    }

    pub fn with_sort_change(mut self, f: impl FnMut(SortOrder) + 'static) -> Self {
        self.on_sort_change = Some(Box::new(f));
        self
    }
}

impl CommentHost for Callbacks {
    fn on_event(&mut self, event: &Event) {
        match &event.data {
            EventData::AddComment { comment } => {
                if let Some(f) = &mut self.on_add {
                    f(comment)
                }
            }
            EventData::EditComment { comment_id, content } => {
                if let Some(f) = &mut self.on_edit {
                    f(*comment_id, content)
                }
            }
            EventData::DeleteComment { comment_id } => {
                if let Some(f) = &mut self.on_delete {
                    f(*comment_id)
                }
            }
            EventData::ToggleReaction {
                comment_id,
                reaction,
                now_reacted,
            } => {
                if let Some(f) = &mut self.on_react {
                    f(*comment_id, &reaction.kind, *now_reacted)
                }
            }
            EventData::FlagComment { comment_id } => {
                if let Some(f) = &mut self.on_flag {
                    f(*comment_id)
                }
            }
            EventData::PinComment {
                comment_id,
                now_pinned,
            } => {
                if let Some(f) = &mut self.on_pin {
                    f(*comment_id, *now_pinned)
                }
            }
            EventData::FeatureComment {
                comment_id,
                now_featured,
            } => {
                if let Some(f) = &mut self.on_feature {
                    f(*comment_id, *now_featured)
                }
            }
        }
    }

    fn on_sort_change(&mut self, order: SortOrder) {
        if let Some(f) = &mut self.on_sort_change {
            f(order)
        }
    }
}
