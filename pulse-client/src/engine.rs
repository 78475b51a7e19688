use crate::{
    api::{Comment, CommentId, CommentUser, Error, ReactionKind, SortOrder},
    state::{Controllable, Source},
    Clock, CommentHost, CommentStore, EngineConfig, MutationGateway, Paginator, SortFilter, Thread,
    ThreadBuilder,
};

/// Read access to the threaded view
pub trait CommentReader {
    /// Sorted top-level threads of the pages loaded so far
    fn threaded_comments(&self) -> Vec<Thread>;

    /// Number of comments that are not deleted
    fn total_comments(&self) -> usize;

    fn current_user(&self) -> &CommentUser;
    fn sort_order(&self) -> SortOrder;
    fn has_more(&self) -> bool;
}

/// Mutations, each returning the comment as it is after the mutation
pub trait CommentWriter {
    fn add_comment(&mut self, content: &str, parent_id: Option<CommentId>)
        -> Result<Comment, Error>;
    fn edit_comment(&mut self, id: CommentId, content: &str) -> Result<Comment, Error>;
    fn delete_comment(&mut self, id: CommentId) -> Result<Comment, Error>;
    fn toggle_reaction(&mut self, id: CommentId, kind: ReactionKind) -> Result<Comment, Error>;
    fn flag_comment(&mut self, id: CommentId) -> Result<Comment, Error>;
    fn pin_comment(&mut self, id: CommentId) -> Result<Comment, Error>;
    fn feature_comment(&mut self, id: CommentId) -> Result<Comment, Error>;
}

/// Sort and paging controls
pub trait ThreadPager {
    fn set_sort_order(&mut self, order: SortOrder);

    /// Returns whether more threads are now shown
    fn load_more(&mut self) -> bool;

    /// Same as `load_more`, but only with infinite scrolling enabled
    fn on_viewport_intersect(&mut self) -> bool;
}

/// State of a comment section, built once and handed to every consumer
pub struct CommentEngine<H = ()> {
    gateway: MutationGateway,
    host: H,
    sort: Controllable<SortOrder>,
    paginator: Paginator,
    builder: ThreadBuilder,
    pinned_first: bool,
}

impl<H: CommentHost> CommentEngine<H> {
    pub fn new(
        config: EngineConfig,
        current_user: CommentUser,
        comments: impl IntoIterator<Item = Comment>,
        host: H,
    ) -> CommentEngine<H> {
        let source = match config.controlled_sort {
            true => Source::Controlled,
            false => Source::Uncontrolled,
        };
        let store = CommentStore::from_comments(comments);
        tracing::debug!(
            num_comments = store.len(),
            user = ?current_user.id,
            "initializing comment engine"
        );
        CommentEngine {
            sort: Controllable::new(source, config.sort_order),
            paginator: Paginator::new(config.page_size, config.infinite_scroll),
            builder: ThreadBuilder {
                max_thread_depth: config.max_thread_depth,
                show_deleted_leaves: config.show_deleted_leaves,
            },
            pinned_first: config.pinned_first,
            gateway: MutationGateway::new(store, current_user, config),
            host,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.gateway.set_clock(clock);
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &EngineConfig {
        self.gateway.config()
    }

    pub fn store(&self) -> &CommentStore {
        self.gateway.store()
    }

    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.gateway.store().get(id)
    }

    pub fn is_flagged(&self, id: &CommentId) -> bool {
        self.gateway.is_flagged(id)
    }

    pub fn pages_loaded(&self) -> usize {
        self.paginator.pages_loaded()
    }

    /// Every sorted thread, ignoring pagination
    pub fn all_threads(&self) -> Vec<Thread> {
        let filter = SortFilter {
            order: *self.sort.get(),
            pinned_first: self.pinned_first,
        };
        filter.apply(self.builder.build(self.gateway.store()))
    }

    pub fn total_threads(&self) -> usize {
        self.builder.build(self.gateway.store()).len()
    }

    /// Takes a sort order chosen by the host, for a controlled sort order
    pub fn sync_sort_order(&mut self, order: SortOrder) {
        if self.sort.sync(order) {
            self.paginator.reset();
        }
    }

    /// Drops tombstones nothing replies to anymore
    pub fn purge_deleted(&mut self) -> usize {
        self.gateway.purge_deleted_leaves()
    }
}

impl<H: CommentHost> CommentReader for CommentEngine<H> {
    fn threaded_comments(&self) -> Vec<Thread> {
        let mut threads = self.all_threads();
        threads.truncate(self.paginator.visible(threads.len()));
        threads
    }

    fn total_comments(&self) -> usize {
        self.gateway.store().live_count()
    }

    fn current_user(&self) -> &CommentUser {
        self.gateway.current_user()
    }

    fn sort_order(&self) -> SortOrder {
        *self.sort.get()
    }

    fn has_more(&self) -> bool {
        self.paginator.has_more(self.total_threads())
    }
}

impl<H: CommentHost> CommentWriter for CommentEngine<H> {
    fn add_comment(
        &mut self,
        content: &str,
        parent_id: Option<CommentId>,
    ) -> Result<Comment, Error> {
        self.gateway.add_comment(&mut self.host, content, parent_id)
    }

    fn edit_comment(&mut self, id: CommentId, content: &str) -> Result<Comment, Error> {
        self.gateway.edit_comment(&mut self.host, id, content)
    }

    fn delete_comment(&mut self, id: CommentId) -> Result<Comment, Error> {
        self.gateway.delete_comment(&mut self.host, id)
    }

    fn toggle_reaction(&mut self, id: CommentId, kind: ReactionKind) -> Result<Comment, Error> {
        self.gateway.toggle_reaction(&mut self.host, id, kind)
    }

    fn flag_comment(&mut self, id: CommentId) -> Result<Comment, Error> {
        self.gateway.flag_comment(&mut self.host, id)
    }

    fn pin_comment(&mut self, id: CommentId) -> Result<Comment, Error> {
        self.gateway.pin_comment(&mut self.host, id)
    }

    fn feature_comment(&mut self, id: CommentId) -> Result<Comment, Error> {
        self.gateway.feature_comment(&mut self.host, id)
    }
}

impl<H: CommentHost> ThreadPager for CommentEngine<H> {
    fn set_sort_order(&mut self, order: SortOrder) {
        if self.sort.request(order) {
            self.paginator.reset();
        }
        self.host.on_sort_change(order);
    }

    fn load_more(&mut self) -> bool {
        let total = self.total_threads();
        self.paginator.load_more(total)
    }

    fn on_viewport_intersect(&mut self) -> bool {
        let total = self.total_threads();
        self.paginator.on_viewport_intersect(total)
    }
}
