use pulse_client::{
    api::{Comment, Event, SortOrder},
    CommentHost, CommentStore,
};

/// In-memory stand-in for the application embedding the engine.
///
/// Accepted events are replayed on a remote copy of the comments, so that
/// tests can check that what the engine shows matches what was persisted.
/// When offline, events are logged and set aside instead.
#[derive(Debug, Default)]
pub struct MockHost {
    remote: CommentStore,
    online: bool,
    events: Vec<Event>,
    rejected: Vec<Event>,
    sort_changes: Vec<SortOrder>,
}

impl MockHost {
    pub fn new() -> MockHost {
        MockHost::with_comments(Vec::new())
    }

    /// Host whose remote copy already has `comments`
    pub fn with_comments(comments: impl IntoIterator<Item = Comment>) -> MockHost {
        MockHost {
            remote: CommentStore::from_comments(comments),
            online: true,
            ..MockHost::default()
        }
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn remote(&self) -> &CommentStore {
        &self.remote
    }

    /// Events persisted so far, in order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events received while offline
    pub fn rejected(&self) -> &[Event] {
        &self.rejected
    }

    pub fn sort_changes(&self) -> &[SortOrder] {
        &self.sort_changes
    }

    /// Names of the persisted events, eg. `["add-comment", "delete-comment"]`
    pub fn test_event_names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.data.name()).collect()
    }

    /// Replays the events set aside while offline, oldest first
    pub fn flush_rejected(&mut self) -> usize {
        let rejected = std::mem::take(&mut self.rejected);
        let num = rejected.len();
        for e in rejected {
            self.persist(e);
        }
        num
    }

    fn persist(&mut self, event: Event) {
        self.remote.apply_event(&event);
        self.events.push(event);
    }
}

impl CommentHost for MockHost {
    fn on_event(&mut self, event: &Event) {
        if !self.online {
            tracing::warn!(
                event_id = ?event.id,
                kind = event.data.name(),
                "host offline, rejecting event"
            );
            self.rejected.push(event.clone());
            return;
        }
        self.persist(event.clone());
    }

    fn on_sort_change(&mut self, order: SortOrder) {
        self.sort_changes.push(order);
    }
}
