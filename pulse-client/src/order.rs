use std::cmp::Reverse;

use crate::{api::SortOrder, Thread};

pub trait OrderExt {
    /// Stable: threads that compare equal keep their relative order
    fn sort(&self, threads: &mut [Thread]);
}

impl OrderExt for SortOrder {
    fn sort(&self, threads: &mut [Thread]) {
        match self {
            SortOrder::Newest => threads.sort_by_key(|t| Reverse(t.comment.date)),
            SortOrder::Oldest => threads.sort_by_key(|t| t.comment.date),
            SortOrder::MostLiked => threads.sort_by_key(|t| Reverse(t.like_count())),
            SortOrder::MostReplies => threads.sort_by_key(|t| Reverse(t.reply_count())),
        }
    }
}

/// Orders the top-level threads for display
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortFilter {
    pub order: SortOrder,

    /// if true, pinned threads come first, each group keeping `order`
    pub pinned_first: bool,
}

impl SortFilter {
    pub fn new(order: SortOrder) -> SortFilter {
        SortFilter {
            order,
            pinned_first: true,
        }
    }

    pub fn apply(&self, mut threads: Vec<Thread>) -> Vec<Thread> {
        self.order.sort(&mut threads);
        if self.pinned_first {
            threads.sort_by_key(|t| !t.comment.is_pinned);
        }
        threads
    }
}
