use uuid::Uuid;

use crate::STUB_UUID;

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn stub() -> UserId {
        UserId(STUB_UUID)
    }
}

/// Identity shown next to a comment. Never changes once attached to a comment.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentUser {
    pub id: UserId,
    pub name: String,

    /// URL or asset key of the avatar, if the user has one
    #[serde(default)]
    pub avatar: Option<String>,
}

impl CommentUser {
    pub fn new(id: UserId, name: impl Into<String>) -> CommentUser {
        CommentUser {
            id,
            name: name.into(),
            avatar: None,
        }
    }

    pub fn stub() -> CommentUser {
        CommentUser::new(UserId::stub(), "stub")
    }
}
