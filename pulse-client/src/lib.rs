mod config;
pub use config::EngineConfig;

mod dump;
pub use dump::CommentDump;

mod engine;
pub use engine::{CommentEngine, CommentReader, CommentWriter, ThreadPager};

mod gateway;
pub use gateway::{Clock, MutationGateway, SystemClock};

mod host;
pub use host::{Callbacks, CommentHost};

mod order;
pub use order::{OrderExt, SortFilter};

mod page;
pub use page::Paginator;

pub mod state;

mod store;
pub use store::CommentStore;

mod thread;
pub use thread::{Thread, ThreadBuilder};

pub mod api {
    pub use pulse_api::*;
}

pub mod prelude {
    pub use crate::{CommentReader, CommentWriter, OrderExt, ThreadPager};
}
