//! Host boundary: the data source and event sink traits.
//!
//! The host hands both adapters to the list at construction. Methods
//! with a default body are optional; the rest must be implemented.
//! Geometry and decoration queries are read once per generation, right
//! before the first layout pass, and their answers must stay fixed
//! until the next reset.

use super::reuse_pool::ReusePool;
use crate::error::ListError;
use crate::geometry::{EdgeInsets, DEFAULT_LOAD_TRIGGER_DISTANCE};
use crate::view::{ReuseIdentifierRegistry, ViewHandle, ViewId};
use crate::ItemId;

/// Scoped access to the reuse pool during a
/// [`view_for_item`](ListDataSource::view_for_item) call.
///
/// Lets the host dequeue recycled views while the engine is mid-pass,
/// without reentering the list controller.
pub struct Recycler<'a> {
    pub(crate) pool: &'a mut ReusePool,
    pub(crate) registry: &'a mut ReuseIdentifierRegistry,
}

impl Recycler<'_> {
    /// Most recently recycled view for the identifier, if any.
    pub fn dequeue(&mut self, reuse_id: &str) -> Option<ViewHandle> {
        self.pool.checkout(reuse_id)
    }

    /// Dequeues a recycled view, or creates one with `factory` and
    /// registers it under the identifier.
    pub fn dequeue_or_else(
        &mut self,
        reuse_id: &str,
        factory: impl FnOnce() -> ViewHandle,
    ) -> Result<ViewHandle, ListError> {
        match self.pool.checkout(reuse_id) {
            Some(view) => Ok(view),
            None => {
                let view = factory();
                self.registry.register(view.id, reuse_id)?;
                Ok(view)
            }
        }
    }

    /// Tags a view for recycling. Write-once per view.
    pub fn set_reuse_identifier(&mut self, view: ViewId, reuse_id: &str) -> Result<(), ListError> {
        self.registry.register(view, reuse_id)
    }
}

/// Supplies geometry, item availability, views, and decorations.
pub trait ListDataSource {
    /// Number of columns. Required; answering zero fails the first
    /// layout pass.
    fn column_count(&mut self) -> usize;

    /// Distance past the viewport's lower edge at which more items are
    /// requested, for seamless scrolling.
    fn load_trigger_distance(&mut self) -> f32 {
        DEFAULT_LOAD_TRIGGER_DISTANCE
    }

    fn outer_padding(&mut self) -> EdgeInsets {
        EdgeInsets::ZERO
    }

    fn vertical_item_margin(&mut self) -> f32 {
        0.0
    }

    fn horizontal_column_margin(&mut self) -> f32 {
        0.0
    }

    /// Whether the item is already loaded host-side. Asked in
    /// identifier order while filling; the first `false` stops the
    /// fill and may start a load.
    fn is_item_available(&mut self, item: ItemId) -> bool;

    /// Supplies the view for an item entering the viewport. The
    /// handle's width must equal the list's required view width,
    /// exactly.
    fn view_for_item(&mut self, item: ItemId, recycler: &mut Recycler<'_>) -> ViewHandle;

    /// Whether more items could be loaded beyond the available ones.
    /// Asked when the fill runs out of available items.
    fn can_load_more(&mut self) -> bool;

    /// Start loading more items. Asynchronous: do the work elsewhere
    /// and call `notify_load_complete` on the list when done; loading
    /// synchronously inside this method would block the UI.
    fn start_loading_more(&mut self);

    /// A view was detached from `item`. Cancel any pending async work
    /// that targets the view; it may be rebound to another item at any
    /// moment.
    fn on_view_recycled(&mut self, view: ViewHandle, item: ItemId) {
        let _ = (view, item);
    }

    /// Optional header shown above the first row.
    fn header_view(&mut self) -> Option<ViewHandle> {
        None
    }

    /// Whether the header sits inside the outer padding (spanning the
    /// content width) or outside it (flush with the frame, spanning
    /// the full width).
    fn header_inside_padding(&mut self) -> bool {
        true
    }

    /// Gap between the header and the first row. Collapses with the
    /// vertical item margin, never with the top outer padding.
    fn header_margin(&mut self) -> f32 {
        0.0
    }

    /// Optional view shown when a generation ends with no items at
    /// all.
    fn empty_view(&mut self) -> Option<ViewHandle> {
        None
    }

    /// Whether a loading indicator should show while more items load.
    fn show_loading_indicator(&mut self) -> bool {
        true
    }

    /// Optional custom loading view; with `None` the adapter shows its
    /// standard spinner.
    fn loading_view(&mut self) -> Option<ViewHandle> {
        None
    }

    fn loading_view_inside_padding(&mut self) -> bool {
        true
    }

    /// Gap between the last row and the loading view. Collapses with
    /// the vertical item margin, never with the bottom outer padding.
    fn loading_view_margin(&mut self) -> f32 {
        0.0
    }
}

/// Outbound list events, fire-and-forget. All optional; the default
/// bodies do nothing, and `()` is a valid sink.
pub trait ListEvents {
    fn item_tapped(&mut self, view: ViewHandle, item: ItemId) {
        let _ = (view, item);
    }

    /// The scroll offset changed, from a scroll event or a command.
    fn scrolled(&mut self, offset: f32) {
        let _ = offset;
    }

    /// The set of on-screen items changed. Ascending order; fired only
    /// on actual change, not on every scroll.
    fn visible_items_changed(&mut self, items: &[ItemId]) {
        let _ = items;
    }

    fn item_entered(&mut self, view: ViewHandle, item: ItemId) {
        let _ = (view, item);
    }

    fn item_exited(&mut self, view: ViewHandle, item: ItemId) {
        let _ = (view, item);
    }

    fn will_start_loading(&mut self) {}

    fn did_finish_loading(&mut self) {}

    fn no_more_items(&mut self) {}
}

/// The null event sink.
impl ListEvents for () {}
