use chrono::Utc;
use uuid::Uuid;

use crate::{
    Comment, CommentId, CommentReaction, Time, UserId, ValidationError, ValidationReason,
};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct EventId(pub Uuid);

/// One mutation, as applied locally and forwarded to the host
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Event {
    pub id: EventId,
    pub owner: UserId,
    pub date: Time,

    pub data: EventData,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum EventData {
    AddComment {
        comment: Comment,
    },
    EditComment {
        comment_id: CommentId,
        content: String,
    },
    DeleteComment {
        comment_id: CommentId,
    },
    ToggleReaction {
        comment_id: CommentId,
        reaction: CommentReaction,
        now_reacted: bool,
    },
    FlagComment {
        comment_id: CommentId,
    },
    PinComment {
        comment_id: CommentId,
        now_pinned: bool,
    },
    FeatureComment {
        comment_id: CommentId,
        now_featured: bool,
    },
}

impl Event {
    pub fn now(owner: UserId, data: EventData) -> Event {
        Event::at(owner, Utc::now(), data)
    }

    pub fn at(owner: UserId, date: Time, data: EventData) -> Event {
        Event {
            id: EventId(Uuid::new_v4()),
            owner,
            date,
            data,
        }
    }

    /// The comment this event is about
    pub fn comment_id(&self) -> CommentId {
        self.data.comment_id()
    }

    // See comments on the `validate` functions in lib.rs
    pub fn validate(&self, max_content_length: usize) -> Result<(), ValidationError> {
        self.data.validate(max_content_length)
    }
}

impl EventData {
    pub fn name(&self) -> &'static str {
        match self {
            EventData::AddComment { .. } => "add-comment",
            EventData::EditComment { .. } => "edit-comment",
            EventData::DeleteComment { .. } => "delete-comment",
            EventData::ToggleReaction { .. } => "toggle-reaction",
            EventData::FlagComment { .. } => "flag-comment",
            EventData::PinComment { .. } => "pin-comment",
            EventData::FeatureComment { .. } => "feature-comment",
        }
    }

    pub fn comment_id(&self) -> CommentId {
        match self {
            EventData::AddComment { comment } => comment.id,
            EventData::EditComment { comment_id, .. }
            | EventData::DeleteComment { comment_id }
            | EventData::ToggleReaction { comment_id, .. }
            | EventData::FlagComment { comment_id }
            | EventData::PinComment { comment_id, .. }
            | EventData::FeatureComment { comment_id, .. } => *comment_id,
        }
    }

    pub fn validate(&self, max_content_length: usize) -> Result<(), ValidationError> {
        match self {
            EventData::AddComment { comment } => {
                crate::validate_content("content", &comment.content, max_content_length)?;
                crate::validate_string("user.name", &comment.user.name)
            }
            EventData::EditComment {
                comment_id: _,
                content,
            } => crate::validate_content("content", content, max_content_length),
            EventData::DeleteComment { comment_id: _ } => Ok(()),
            EventData::ToggleReaction {
                comment_id: _,
                reaction,
                now_reacted: _,
            } => {
                let kind = reaction.kind.as_str();
                crate::validate_string("kind", kind)?;
                if kind.trim().is_empty() {
                    return Err(ValidationError::new("kind", ValidationReason::EmptyContent));
                }
                Ok(())
            }
            EventData::FlagComment { comment_id: _ } => Ok(()),
            EventData::PinComment {
                comment_id: _,
                now_pinned: _,
            } => Ok(()),
            EventData::FeatureComment {
                comment_id: _,
                now_featured: _,
            } => Ok(()),
        }
    }
}
