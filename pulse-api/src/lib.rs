use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

/// Default upper bound on the length of a comment, in characters
pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 10_000;

/// Deepest nesting a threaded view may have. Larger configured depths are
/// rejected by configuration checks and capped here when building threads.
pub const MAX_THREAD_DEPTH: usize = 64;

mod comment;
pub use comment::{Comment, CommentId, CommentReaction, ReactionKind};

mod error;
pub use error::{Error, StateError, ValidationError, ValidationReason};

mod event;
pub use event::{Event, EventData, EventId};

mod order;
pub use order::{SortOrder, UnknownSortOrder};

mod user;
pub use user::{CommentUser, UserId};

// The `validate` functions all check that the strings that will be displayed
// to users are sane. They do not check authorization, nor anything that
// depends on the current state of the comment store.

/// Checks user-provided text: no null byte, not blank, at most `max_len` chars.
pub fn validate_content(
    field: &'static str,
    s: &str,
    max_len: usize,
) -> Result<(), ValidationError> {
    validate_string(field, s)?;
    if s.trim().is_empty() {
        return Err(ValidationError::new(field, ValidationReason::EmptyContent));
    }
    let len = s.chars().count();
    if len > max_len {
        return Err(ValidationError::new(
            field,
            ValidationReason::TooLong { len, max: max_len },
        ));
    }
    Ok(())
}

/// Checks that a string can be stored and rendered at all
pub fn validate_string(field: &'static str, s: &str) -> Result<(), ValidationError> {
    if s.contains('\0') {
        return Err(ValidationError::new(field, ValidationReason::NullByte));
    }
    Ok(())
}
