//! The virtualized list engine.
//!
//! Only items near the viewport are bound to live views; everything
//! else is recycled through bounded per-identifier pools, and the host
//! is asked for more items as the scroll position approaches the end
//! of loaded content.
//!
//! # Architecture
//!
//! - [`ColumnLayout`] - shortest-column masonry placement
//! - [`VisibilityTracker`] - required-set diffing per scroll window
//! - [`ReusePool`] - bounded per-identifier recycle pools
//! - [`LoadMoreController`] - load-more state machine
//! - [`InfiniteList`] - the controller wiring it all together behind
//!   the [`ListDataSource`] / [`ListEvents`] host boundary

mod controller;
mod host;
mod layout;
mod load_more;
mod reuse_pool;
mod visibility;

pub use controller::*;
pub use host::*;
pub use layout::*;
pub use load_more::*;
pub use reuse_pool::*;
pub use visibility::*;
