use crate::CommentId;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationReason {
    #[error("content is empty")]
    EmptyContent,

    #[error("content is {len} characters long, at most {max} are allowed")]
    TooLong { len: usize, max: usize },

    #[error("null byte in string is not allowed")]
    NullByte,

    #[error("no comment with id {0:?}")]
    UnknownComment(CommentId),

    #[error("no comment with id {0:?} to reply to")]
    UnknownParent(CommentId),

    #[error("replying would nest deeper than {max} levels")]
    DepthExceeded { max: usize },

    #[error("reaction {0:?} is not allowed")]
    ReactionNotAllowed(String),

    #[error("comment {0:?} is a reply, only top-level comments can be pinned or featured")]
    NotRootComment(CommentId),
}

/// Bad input to a mutation
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> ValidationError {
        ValidationError { field, reason }
    }

    pub fn unknown_comment(id: CommentId) -> ValidationError {
        ValidationError::new("comment_id", ValidationReason::UnknownComment(id))
    }
}

/// Operation attempted on a comment whose state does not allow it
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StateError {
    #[error("comment {0:?} is deleted")]
    Deleted(CommentId),

    #[error("comment {0:?} was already flagged")]
    AlreadyFlagged(CommentId),
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error("Permission denied")]
    PermissionDenied,
}

impl Error {
    pub fn validation(field: &'static str, reason: ValidationReason) -> Error {
        Error::Validation(ValidationError::new(field, reason))
    }

    pub fn deleted(id: CommentId) -> Error {
        Error::State(StateError::Deleted(id))
    }

    /// Name of the offending field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::Validation(e) => Some(e.field),
            _ => None,
        }
    }
}
