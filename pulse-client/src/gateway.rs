use std::collections::HashSet;

use chrono::Utc;

use crate::{
    api::{
        Comment, CommentId, CommentReaction, CommentUser, Error, Event, EventData, ReactionKind,
        StateError, Time, Uuid, ValidationError, ValidationReason, MAX_THREAD_DEPTH,
    },
    CommentHost, CommentStore, EngineConfig,
};

pub trait Clock {
    fn now(&self) -> Time;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        Utc::now()
    }
}

impl<F: Fn() -> Time> Clock for F {
    fn now(&self) -> Time {
        self()
    }
}

/// Sole writer of the comment store.
///
/// Every mutation is turned into an `Event`, validated, checked against the
/// current state of the store, applied locally and only then forwarded to the
/// host. On error nothing is applied nor forwarded.
pub struct MutationGateway {
    store: CommentStore,
    current_user: CommentUser,
    config: EngineConfig,

    /// Comments the current user flagged during this session
    flagged: HashSet<CommentId>,

    clock: Box<dyn Clock>,
}

impl MutationGateway {
    pub fn new(store: CommentStore, current_user: CommentUser, config: EngineConfig) -> Self {
        MutationGateway {
            store,
            current_user,
            config,
            flagged: HashSet::new(),
            clock: Box::new(SystemClock),
        }
    }

    pub fn set_clock(&mut self, clock: impl Clock + 'static) {
        self.clock = Box::new(clock);
    }

    pub fn store(&self) -> &CommentStore {
        &self.store
    }

    pub fn current_user(&self) -> &CommentUser {
        &self.current_user
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_flagged(&self, id: &CommentId) -> bool {
        self.flagged.contains(id)
    }

    pub fn add_comment<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> Result<Comment, Error> {
        let comment = Comment::new(
            CommentId(Uuid::new_v4()),
            parent_id,
            self.current_user.clone(),
            content.trim().to_string(),
            self.clock.now(),
        );
        self.submit(host, EventData::AddComment { comment })
    }

    pub fn edit_comment<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        comment_id: CommentId,
        content: &str,
    ) -> Result<Comment, Error> {
        self.submit(
            host,
            EventData::EditComment {
                comment_id,
                content: content.trim().to_string(),
            },
        )
    }

    pub fn delete_comment<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        comment_id: CommentId,
    ) -> Result<Comment, Error> {
        self.submit(host, EventData::DeleteComment { comment_id })
    }

    pub fn toggle_reaction<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        comment_id: CommentId,
        kind: ReactionKind,
    ) -> Result<Comment, Error> {
        let now_reacted = !self
            .store
            .get(&comment_id)
            .map(|c| c.has_reacted(&self.current_user.id, &kind))
            .unwrap_or(false);
        let reaction = CommentReaction {
            kind,
            user: self.current_user.clone(),
        };
        self.submit(
            host,
            EventData::ToggleReaction {
                comment_id,
                reaction,
                now_reacted,
            },
        )
    }

    pub fn flag_comment<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        comment_id: CommentId,
    ) -> Result<Comment, Error> {
        self.submit(host, EventData::FlagComment { comment_id })
    }

    /// Pins the comment, or unpins it if it already is
    pub fn pin_comment<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        comment_id: CommentId,
    ) -> Result<Comment, Error> {
        let now_pinned = !self
            .store
            .get(&comment_id)
            .map(|c| c.is_pinned)
            .unwrap_or(false);
        self.submit(
            host,
            EventData::PinComment {
                comment_id,
                now_pinned,
            },
        )
    }

    /// Features the comment, or un-features it if it already is
    pub fn feature_comment<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        comment_id: CommentId,
    ) -> Result<Comment, Error> {
        let now_featured = !self
            .store
            .get(&comment_id)
            .map(|c| c.is_featured)
            .unwrap_or(false);
        self.submit(
            host,
            EventData::FeatureComment {
                comment_id,
                now_featured,
            },
        )
    }

    /// See `CommentStore::purge_deleted_leaves`
    pub fn purge_deleted_leaves(&mut self) -> usize {
        self.store.purge_deleted_leaves()
    }

    fn submit<H: CommentHost + ?Sized>(
        &mut self,
        host: &mut H,
        data: EventData,
    ) -> Result<Comment, Error> {
        let event = Event::at(self.current_user.id, self.clock.now(), data);
        event.validate(self.config.max_content_length)?;
        self.authorize(&event.data)?;

        let comment_id = event.comment_id();
        tracing::debug!(
            event_id = ?event.id,
            ?comment_id,
            kind = event.data.name(),
            "applying comment event"
        );
        self.apply(&event);
        host.on_event(&event);

        self.store
            .get(&comment_id)
            .cloned()
            .ok_or_else(|| ValidationError::unknown_comment(comment_id).into())
    }

    /// The comment, if it exists and can still be acted upon
    fn live(&self, id: &CommentId) -> Result<&Comment, Error> {
        let c = self
            .store
            .get(id)
            .ok_or_else(|| ValidationError::unknown_comment(*id))?;
        if c.is_deleted {
            return Err(Error::deleted(*id));
        }
        Ok(c)
    }

    fn is_moderator(&self) -> bool {
        self.config.is_moderator(&self.current_user.id)
    }

    fn check_author(&self, c: &Comment) -> Result<(), Error> {
        if c.owner() == self.current_user.id || self.is_moderator() {
            Ok(())
        } else {
            Err(Error::PermissionDenied)
        }
    }

    fn authorize(&self, data: &EventData) -> Result<(), Error> {
        match data {
            EventData::AddComment { comment } => {
                let parent_id = match comment.parent_id {
                    None => return Ok(()),
                    Some(p) => p,
                };
                let parent = self.store.get(&parent_id).ok_or_else(|| {
                    Error::validation("parent_id", ValidationReason::UnknownParent(parent_id))
                })?;
                if parent.is_deleted {
                    return Err(Error::deleted(parent_id));
                }
                let max = self.config.max_thread_depth.min(MAX_THREAD_DEPTH);
                let depth = self.store.depth(&parent_id).unwrap_or(0);
                if depth >= max {
                    return Err(Error::validation(
                        "parent_id",
                        ValidationReason::DepthExceeded { max },
                    ));
                }
                Ok(())
            }
            EventData::EditComment { comment_id, .. } | EventData::DeleteComment { comment_id } => {
                let c = self.live(comment_id)?;
                self.check_author(c)
            }
            EventData::ToggleReaction {
                comment_id,
                reaction,
                ..
            } => {
                self.live(comment_id)?;
                if !self.config.allows_reaction(&reaction.kind) {
                    return Err(Error::validation(
                        "kind",
                        ValidationReason::ReactionNotAllowed(reaction.kind.0.clone()),
                    ));
                }
                Ok(())
            }
            EventData::FlagComment { comment_id } => {
                let c = self.live(comment_id)?;
                if c.owner() == self.current_user.id {
                    return Err(Error::PermissionDenied);
                }
                if self.flagged.contains(comment_id) {
                    return Err(StateError::AlreadyFlagged(*comment_id).into());
                }
                Ok(())
            }
            EventData::PinComment { comment_id, .. }
            | EventData::FeatureComment { comment_id, .. } => {
                self.live(comment_id)?;
                if self.store.depth(comment_id) != Some(0) {
                    return Err(Error::validation(
                        "comment_id",
                        ValidationReason::NotRootComment(*comment_id),
                    ));
                }
                if !self.config.moderators.is_empty() && !self.is_moderator() {
                    return Err(Error::PermissionDenied);
                }
                Ok(())
            }
        }
    }

    fn apply(&mut self, event: &Event) {
        if let EventData::FlagComment { comment_id } = &event.data {
            self.flagged.insert(*comment_id);
        }
        self.store.apply_event(event);
    }
}
