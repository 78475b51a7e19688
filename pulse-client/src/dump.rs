use crate::{
    api::{Comment, CommentUser, Event},
    CommentEngine, CommentHost, CommentStore, EngineConfig,
};

/// A comment section as saved to disk or loaded from the host
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentDump {
    pub current_user: CommentUser,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl CommentDump {
    pub fn stub() -> CommentDump {
        CommentDump {
            current_user: CommentUser::stub(),
            comments: Vec::new(),
        }
    }

    pub fn from_store(current_user: CommentUser, store: &CommentStore) -> CommentDump {
        CommentDump {
            current_user,
            comments: store.all().to_vec(),
        }
    }

    /// Replays events on top of the dump, eg. ones persisted while it was
    /// being loaded
    pub fn apply_events(&mut self, events: &[Event]) {
        let mut store = CommentStore::from_comments(std::mem::take(&mut self.comments));
        for e in events {
            store.apply_event(e);
        }
        self.comments = store.all().to_vec();
    }

    pub fn into_engine<H: CommentHost>(self, config: EngineConfig, host: H) -> CommentEngine<H> {
        CommentEngine::new(config, self.current_user, self.comments, host)
    }
}
