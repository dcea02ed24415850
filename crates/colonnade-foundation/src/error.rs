//! Error types for the list engine.
//!
//! Width and size mismatches indicate a host programming error and are
//! fatal by contract: they surface at the call site instead of being
//! coerced. State-transition and registry misuse are reported to the
//! caller but leave the list usable. Everything else (pool overflow
//! and the like) is resolved by policy, not reported.

use thiserror::Error;

use crate::list::LoadState;
use crate::view::ViewId;
use crate::ItemId;

/// Which decoration view a sizing error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decoration {
    Header,
    Empty,
    Loading,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ListError {
    /// The host returned an item view whose width differs from the
    /// required column width.
    #[error("view for item {item} is {actual} wide, required width is {required}")]
    WidthMismatch {
        item: ItemId,
        required: f32,
        actual: f32,
    },

    /// A decoration view does not span the width its positioning mode
    /// requires.
    #[error("{decoration:?} view is {actual} wide, required width is {required}")]
    SizeMismatch {
        decoration: Decoration,
        required: f32,
        actual: f32,
    },

    /// `notify_load_complete` was called while no load was pending.
    #[error("load completion reported while {state:?}, expected AwaitingMore")]
    InvalidStateTransition { state: LoadState },

    /// The data source answered zero to the mandatory column count
    /// query.
    #[error("data source reported zero columns")]
    MissingColumnCount,

    /// An attempt to change a view's reuse identifier after it was
    /// set.
    #[error("view {view:?} already has reuse identifier {existing:?}")]
    ReuseIdentifierReassigned { view: ViewId, existing: String },
}
