use crate::{
    api::{Comment, MAX_THREAD_DEPTH},
    CommentStore,
};

/// A comment and its replies, as displayed. Derived from the store on every
/// read and never mutated directly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Thread {
    pub comment: Comment,

    /// Replies in chronological order
    pub replies: Vec<Thread>,

    /// 0 for top-level comments
    pub depth: usize,
}

impl Thread {
    /// Number of comments below this one, at any depth
    pub fn reply_count(&self) -> usize {
        self.replies.iter().map(|r| 1 + r.reply_count()).sum()
    }

    /// Depth-first walk over this thread, starting with its own comment
    pub fn iter(&self) -> impl Iterator<Item = &Thread> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let t = stack.pop()?;
            stack.extend(t.replies.iter().rev());
            Some(t)
        })
    }

    pub fn like_count(&self) -> usize {
        self.comment.like_count()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Mark {
    Unseen,
    OnPath,
    Done,
}

/// Builds the threaded view of a store.
///
/// Roots are top-level comments, orphans (whose parent is not in the store)
/// and every comment that is part of a parent cycle. Replies nest up to
/// `max_thread_depth` levels, at least one and at most `MAX_THREAD_DEPTH`; anything deeper is attached to the
/// deepest ancestor that can still take replies, next to its siblings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ThreadBuilder {
    pub max_thread_depth: usize,

    /// if false, deleted comments with nothing visible below are hidden
    pub show_deleted_leaves: bool,
}

impl ThreadBuilder {
    pub fn new(max_thread_depth: usize) -> ThreadBuilder {
        ThreadBuilder {
            max_thread_depth,
            show_deleted_leaves: false,
        }
    }

    fn cap(&self) -> usize {
        self.max_thread_depth.clamp(1, MAX_THREAD_DEPTH)
    }

    /// Returns the threads in the insertion order of their root comment
    pub fn build(&self, store: &CommentStore) -> Vec<Thread> {
        let comments = store.all();
        let parents = resolve_parents(store);

        let mut children = vec![Vec::new(); comments.len()];
        let mut roots = Vec::new();
        for (pos, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(pos),
                None => roots.push(pos),
            }
        }
        for c in children.iter_mut() {
            c.sort_by_key(|&pos| comments[pos].date);
        }

        let visible = self.visibility(comments, &roots, &children);
        let ctx = BuildCtx {
            comments,
            children: &children,
            visible: &visible,
            cap: self.cap(),
        };
        roots
            .into_iter()
            .filter(|&pos| visible[pos])
            .map(|pos| ctx.node(pos, 0))
            .collect()
    }

    /// A comment is visible if it is not deleted or has a visible descendant
    fn visibility(
        &self,
        comments: &[Comment],
        roots: &[usize],
        children: &[Vec<usize>],
    ) -> Vec<bool> {
        if self.show_deleted_leaves {
            return vec![true; comments.len()];
        }
        let mut order = roots.to_vec();
        let mut i = 0;
        while i < order.len() {
            order.extend(children[order[i]].iter().copied());
            i += 1;
        }
        let mut visible = vec![false; comments.len()];
        for &pos in order.iter().rev() {
            visible[pos] = !comments[pos].is_deleted || children[pos].iter().any(|&c| visible[c]);
        }
        visible
    }
}

struct BuildCtx<'a> {
    comments: &'a [Comment],
    children: &'a [Vec<usize>],
    visible: &'a [bool],
    cap: usize,
}

impl<'a> BuildCtx<'a> {
    fn node(&self, pos: usize, depth: usize) -> Thread {
        let replies = if depth + 1 < self.cap {
            self.children[pos]
                .iter()
                .filter(|&&c| self.visible[c])
                .map(|&c| self.node(c, depth + 1))
                .collect()
        } else {
            self.flattened(pos, depth + 1)
        };
        Thread {
            comment: self.comments[pos].clone(),
            replies,
            depth,
        }
    }

    /// All descendants of `pos` as leaves at `depth`, in chronological order
    fn flattened(&self, pos: usize, depth: usize) -> Vec<Thread> {
        let mut descendants = Vec::new();
        let mut stack = self.children[pos].clone();
        while let Some(c) = stack.pop() {
            stack.extend(self.children[c].iter().copied());
            if self.visible[c] {
                descendants.push(c);
            }
        }
        descendants.sort_by_key(|&c| (self.comments[c].date, c));
        descendants
            .into_iter()
            .map(|c| Thread {
                comment: self.comments[c].clone(),
                replies: Vec::new(),
                depth,
            })
            .collect()
    }
}

/// Position of the parent of each comment, None for roots.
///
/// Walks the parent links with a three-state marking so that each comment is
/// visited once. When a walk comes back onto its own path, every comment of
/// that cycle is made a root.
fn resolve_parents(store: &CommentStore) -> Vec<Option<usize>> {
    let comments = store.all();
    let mut parents = comments
        .iter()
        .map(|c| {
            let parent = c.parent_id?;
            let pos = store.position(&parent);
            if pos.is_none() {
                tracing::warn!(comment_id = ?c.id, parent_id = ?parent, "orphan comment shown as top-level");
            }
            pos
        })
        .collect::<Vec<_>>();

    let mut marks = vec![Mark::Unseen; comments.len()];
    let mut path = Vec::new();
    for start in 0..comments.len() {
        let mut cur = Some(start);
        while let Some(pos) = cur {
            match marks[pos] {
                Mark::Unseen => {
                    marks[pos] = Mark::OnPath;
                    path.push(pos);
                    cur = parents[pos];
                }
                Mark::OnPath => {
                    if let Some(first) = path.iter().position(|&p| p == pos) {
                        tracing::warn!(
                            cycle_len = path.len() - first,
                            comment_id = ?comments[pos].id,
                            "parent cycle in comments, showing its members as top-level"
                        );
                        for &p in &path[first..] {
                            parents[p] = None;
                        }
                    }
                    cur = None;
                }
                Mark::Done => cur = None,
            }
        }
        for p in path.drain(..) {
            marks[p] = Mark::Done;
        }
    }
    parents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommentId, CommentUser, Uuid};
    use chrono::TimeZone;

    fn id(n: u128) -> CommentId {
        CommentId(Uuid::from_u128(n))
    }

    fn comment(n: u128, parent: Option<u128>, ts: i64) -> Comment {
        Comment::new(
            id(n),
            parent.map(id),
            CommentUser::stub(),
            format!("comment {n}"),
            chrono::Utc.timestamp_opt(ts, 0).unwrap(),
        )
    }

    fn ids(threads: &[Thread]) -> Vec<u128> {
        threads.iter().map(|t| t.comment.id.0.as_u128()).collect()
    }

    #[test]
    fn two_threads_one_reply() {
        let store = CommentStore::from_comments(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, None, 3),
        ]);
        let threads = ThreadBuilder::new(1).build(&store);
        assert_eq!(ids(&threads), vec![1, 3]);
        assert_eq!(ids(&threads[0].replies), vec![2]);
        assert_eq!(threads[0].replies[0].depth, 1);
        assert!(threads[1].replies.is_empty());
    }

    #[test]
    fn replies_are_chronological() {
        let store = CommentStore::from_comments(vec![
            comment(1, None, 1),
            comment(2, Some(1), 30),
            comment(3, Some(1), 10),
            comment(4, Some(1), 20),
        ]);
        let threads = ThreadBuilder::new(3).build(&store);
        assert_eq!(ids(&threads[0].replies), vec![3, 4, 2]);
    }

    #[test]
    fn deep_replies_are_hoisted() {
        // 1 <- 2 <- 3 <- 4, and 5 is a later direct reply to 1
        let store = CommentStore::from_comments(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, Some(2), 3),
            comment(4, Some(3), 4),
            comment(5, Some(1), 5),
        ]);

        let threads = ThreadBuilder::new(1).build(&store);
        assert_eq!(ids(&threads), vec![1]);
        assert_eq!(ids(&threads[0].replies), vec![2, 3, 4, 5]);
        assert!(threads[0].replies.iter().all(|r| r.depth == 1 && r.replies.is_empty()));

        let threads = ThreadBuilder::new(2).build(&store);
        assert_eq!(ids(&threads[0].replies), vec![2, 5]);
        assert_eq!(ids(&threads[0].replies[0].replies), vec![3, 4]);
        assert_eq!(threads[0].replies[0].replies[1].depth, 2);

        let threads = ThreadBuilder::new(10).build(&store);
        assert_eq!(threads[0].reply_count(), 4);
        assert_eq!(threads[0].iter().map(|t| t.depth).max(), Some(3));
    }

    #[test]
    fn zero_depth_behaves_as_one() {
        let store = CommentStore::from_comments(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, Some(2), 3),
        ]);
        assert_eq!(
            ThreadBuilder::new(0).build(&store),
            ThreadBuilder::new(1).build(&store)
        );
    }

    #[test]
    fn orphans_become_roots() {
        let store = CommentStore::from_comments(vec![
            comment(1, None, 1),
            comment(2, Some(42), 2),
            comment(3, Some(2), 3),
        ]);
        let threads = ThreadBuilder::new(3).build(&store);
        assert_eq!(ids(&threads), vec![1, 2]);
        assert_eq!(ids(&threads[1].replies), vec![3]);
    }

    #[test]
    fn cycles_become_roots() {
        let store = CommentStore::from_comments(vec![
            comment(1, Some(2), 1),
            comment(2, Some(1), 2),
            comment(3, Some(1), 3),
            comment(4, Some(4), 4),
        ]);
        let threads = ThreadBuilder::new(3).build(&store);
        assert_eq!(ids(&threads), vec![1, 2, 4]);
        assert_eq!(ids(&threads[0].replies), vec![3]);
        assert!(threads[1].replies.is_empty());
        assert!(threads[2].replies.is_empty());
    }

    #[test]
    fn tombstones_keep_replies_attached() {
        let mut store = CommentStore::from_comments(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, None, 3),
        ]);
        store.remove(&id(1));
        store.remove(&id(3));
        let threads = ThreadBuilder::new(3).build(&store);
        assert_eq!(ids(&threads), vec![1]);
        assert_eq!(threads[0].comment.content, Comment::TOMBSTONE);
        assert_eq!(ids(&threads[0].replies), vec![2]);

        let builder = ThreadBuilder {
            show_deleted_leaves: true,
            ..ThreadBuilder::new(3)
        };
        assert_eq!(ids(&builder.build(&store)), vec![1, 3]);
    }

    #[test]
    fn hoisted_tombstones_follow_their_replies() {
        let mut store = CommentStore::from_comments(vec![
            comment(1, None, 1),
            comment(2, Some(1), 2),
            comment(3, Some(2), 3),
            comment(4, Some(1), 4),
        ]);
        store.remove(&id(2));
        store.remove(&id(4));
        let threads = ThreadBuilder::new(1).build(&store);
        assert_eq!(ids(&threads[0].replies), vec![2, 3]);
    }

    #[test]
    fn long_reply_chains_stay_within_the_depth_limit() {
        let n = 5_000;
        let store = CommentStore::from_comments(
            (0..n).map(|i| comment(i, i.checked_sub(1), i as i64)),
        );
        let threads = ThreadBuilder::new(usize::MAX).build(&store);
        assert_eq!(threads.len(), 1);
        assert_eq!(threads[0].reply_count(), n as usize - 1);
        assert_eq!(
            threads[0].iter().map(|t| t.depth).max(),
            Some(MAX_THREAD_DEPTH)
        );
    }

    #[test]
    fn fuzz_builder_covers_every_root() {
        bolero::check!()
            .with_type::<(Vec<Option<u8>>, u8)>()
            .cloned()
            .for_each(|(parents, depth)| {
                let n = parents.len() as u128;
                let store = CommentStore::from_comments(parents.iter().enumerate().map(
                    |(i, parent)| {
                        let parent = parent.map(|p| p as u128 % (n + 2));
                        comment(i as u128, parent, i as i64)
                    },
                ));
                let threads = ThreadBuilder {
                    max_thread_depth: depth as usize % 5,
                    show_deleted_leaves: true,
                }
                .build(&store);
                let shown = threads.iter().flat_map(|t| t.iter()).count();
                assert_eq!(shown, store.len(), "every comment is shown exactly once");
                let cap = (depth as usize % 5).max(1);
                assert!(threads.iter().flat_map(|t| t.iter()).all(|t| t.depth <= cap));
            })
    }
}
