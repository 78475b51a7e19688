use std::collections::{HashMap, HashSet};

use crate::api::{Comment, CommentId, Event, EventData};

/// Canonical collection of comments, iterated in insertion order
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentStore {
    comments: Vec<Comment>,
    index: HashMap<CommentId, usize>,
}

impl CommentStore {
    pub fn new() -> CommentStore {
        CommentStore::default()
    }

    /// Later comments replace earlier ones with the same id
    pub fn from_comments(comments: impl IntoIterator<Item = Comment>) -> CommentStore {
        let mut res = CommentStore::new();
        for c in comments {
            if res.index.contains_key(&c.id) {
                tracing::warn!(comment_id = ?c.id, "duplicate comment id in initial data");
            }
            res.upsert(c);
        }
        res
    }

    /// Replaces the comment in place if its id is known, appends it otherwise
    pub fn upsert(&mut self, comment: Comment) {
        match self.index.get(&comment.id) {
            Some(&pos) => self.comments[pos] = comment,
            None => {
                self.index.insert(comment.id, self.comments.len());
                self.comments.push(comment);
            }
        }
    }

    /// Logical removal: the comment stays as a tombstone so its replies keep a
    /// parent. Unknown ids are ignored.
    pub fn remove(&mut self, id: &CommentId) {
        if let Some(c) = self.get_mut(id) {
            c.tombstone();
        }
    }

    /// Applies an event to the comments it touches. Events are assumed to be
    /// authorized already; events about unknown comments are ignored, and flags
    /// do not change the comment itself.
    pub fn apply_event(&mut self, event: &Event) {
        match &event.data {
            EventData::AddComment { comment } => self.upsert(comment.clone()),
            EventData::EditComment {
                comment_id,
                content,
            } => {
                if let Some(c) = self.get_mut(comment_id) {
                    c.content = content.clone();
                    c.is_edited = true;
                }
            }
            EventData::DeleteComment { comment_id } => self.remove(comment_id),
            EventData::ToggleReaction {
                comment_id,
                reaction,
                now_reacted,
            } => {
                if let Some(c) = self.get_mut(comment_id) {
                    c.reactions
                        .retain(|r| !(r.user.id == reaction.user.id && r.kind == reaction.kind));
                    if *now_reacted {
                        c.reactions.push(reaction.clone());
                    }
                }
            }
            EventData::FlagComment { .. } => (),
            EventData::PinComment {
                comment_id,
                now_pinned,
            } => {
                if let Some(c) = self.get_mut(comment_id) {
                    c.is_pinned = *now_pinned;
                }
            }
            EventData::FeatureComment {
                comment_id,
                now_featured,
            } => {
                if let Some(c) = self.get_mut(comment_id) {
                    c.is_featured = *now_featured;
                }
            }
        }
    }

    pub fn get(&self, id: &CommentId) -> Option<&Comment> {
        self.index.get(id).map(|&pos| &self.comments[pos])
    }

    pub fn get_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        match self.index.get(id) {
            Some(&pos) => Some(&mut self.comments[pos]),
            None => None,
        }
    }

    pub fn contains(&self, id: &CommentId) -> bool {
        self.index.contains_key(id)
    }

    /// Insertion rank of a comment
    pub fn position(&self, id: &CommentId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn all(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    /// Number of comments that are not tombstones
    pub fn live_count(&self) -> usize {
        self.comments.iter().filter(|c| !c.is_deleted).count()
    }

    /// Number of steps from `id` up to its thread root.
    ///
    /// Comments on a parent cycle are roots, and a comment hanging off a cycle
    /// counts the steps until it reaches the cycle.
    pub fn depth(&self, id: &CommentId) -> Option<usize> {
        let mut path = vec![self.get(id)?.id];
        let mut cur = *id;
        while let Some(parent) = self.get(&cur).and_then(|c| c.parent_id) {
            if !self.contains(&parent) {
                break;
            }
            if let Some(first) = path.iter().position(|p| *p == parent) {
                return Some(first);
            }
            path.push(parent);
            cur = parent;
        }
        Some(path.len() - 1)
    }

    /// Physically drops tombstones that no comment points to anymore, until
    /// none is left. Returns the number of comments dropped.
    pub fn purge_deleted_leaves(&mut self) -> usize {
        let before = self.comments.len();
        loop {
            let parents = self
                .comments
                .iter()
                .filter_map(|c| c.parent_id)
                .collect::<HashSet<_>>();
            let len = self.comments.len();
            self.comments
                .retain(|c| !c.is_deleted || parents.contains(&c.id));
            if self.comments.len() == len {
                break;
            }
        }
        self.index = self
            .comments
            .iter()
            .enumerate()
            .map(|(pos, c)| (c.id, pos))
            .collect();
        before - self.comments.len()
    }
}
