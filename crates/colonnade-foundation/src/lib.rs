//! Colonnade foundation: a virtualized, view-recycling, multi-column
//! infinite list engine.
//!
//! The engine is headless. It owns the hard, stateful part of an
//! infinite list - column layout, visibility diffing, view recycling,
//! and the load-more data dance - while the platform adapter keeps
//! drawing, gestures, and the view hierarchy. The host supplies items
//! and views through [`ListDataSource`], observes [`ListEvents`], and
//! drives [`InfiniteList`] with scroll offsets.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut list = InfiniteList::new(320.0, 480.0, my_source, my_events);
//! list.update()?;                  // first layout pass
//! list.set_scroll_offset(250.0)?;  // from the adapter's scroll events
//! // ... host finishes an async load:
//! list.notify_load_complete()?;
//! ```

pub mod error;
pub mod geometry;
pub mod list;
pub mod scroll;
pub mod view;

pub use error::{Decoration, ListError};
pub use geometry::{EdgeInsets, GeometryConfig, DEFAULT_LOAD_TRIGGER_DISTANCE};
pub use list::*;
pub use scroll::ScrollPosition;
pub use view::{ReuseIdentifierRegistry, ViewHandle, ViewId};

/// Dense item identifier, assigned from 0 in discovery order within a
/// generation. Never reused until the next reset.
pub type ItemId = usize;
