//! Host doubles for exercising Colonnade lists in tests.
//!
//! [`ScriptedDataSource`] plays the host application: fixed geometry,
//! a growing range of available items, batched loading, and optional
//! decorations. [`RecordingEvents`] captures the outbound event stream
//! for assertions, and [`ViewFactory`] mints uniquely identified view
//! handles.

use colonnade_foundation::{
    EdgeInsets, ItemId, ListDataSource, ListEvents, Recycler, ViewHandle, ViewId,
    DEFAULT_LOAD_TRIGGER_DISTANCE,
};

/// Mints view handles with unique ids.
#[derive(Debug, Default)]
pub struct ViewFactory {
    next_id: u64,
}

impl ViewFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn make(&mut self, width: f32, height: f32) -> ViewHandle {
        self.next_id += 1;
        ViewHandle::new(ViewId(self.next_id), width, height)
    }
}

/// One observed list event.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Tapped { view: ViewId, item: ItemId },
    Scrolled { offset: f32 },
    VisibleChanged { items: Vec<ItemId> },
    Entered { view: ViewId, item: ItemId },
    Exited { view: ViewId, item: ItemId },
    WillStartLoading,
    DidFinishLoading,
    NoMoreItems,
}

/// Event sink that records everything it sees, in order.
#[derive(Debug, Default)]
pub struct RecordingEvents {
    pub events: Vec<Event>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events.iter().filter(|seen| *seen == event).count()
    }

    pub fn count_matching(&self, matches: impl Fn(&Event) -> bool) -> usize {
        self.events.iter().filter(|event| matches(event)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl ListEvents for RecordingEvents {
    fn item_tapped(&mut self, view: ViewHandle, item: ItemId) {
        self.events.push(Event::Tapped { view: view.id, item });
    }

    fn scrolled(&mut self, offset: f32) {
        self.events.push(Event::Scrolled { offset });
    }

    fn visible_items_changed(&mut self, items: &[ItemId]) {
        self.events.push(Event::VisibleChanged {
            items: items.to_vec(),
        });
    }

    fn item_entered(&mut self, view: ViewHandle, item: ItemId) {
        self.events.push(Event::Entered { view: view.id, item });
    }

    fn item_exited(&mut self, view: ViewHandle, item: ItemId) {
        self.events.push(Event::Exited { view: view.id, item });
    }

    fn will_start_loading(&mut self) {
        self.events.push(Event::WillStartLoading);
    }

    fn did_finish_loading(&mut self) {
        self.events.push(Event::DidFinishLoading);
    }

    fn no_more_items(&mut self) {
        self.events.push(Event::NoMoreItems);
    }
}

/// Scriptable data source standing in for a host application.
///
/// Items `0..available` are loaded; each completed load adds
/// `batch_size` more, up to `total` when one is set. Views are minted
/// by an internal [`ViewFactory`], recycled through the engine's pool
/// when `reuse_id` is set, and counted so tests can assert how many
/// were created versus dequeued.
#[derive(Debug)]
pub struct ScriptedDataSource {
    pub columns: usize,
    pub outer_padding: EdgeInsets,
    pub vertical_item_margin: f32,
    pub horizontal_column_margin: f32,
    pub load_trigger_distance: f32,

    pub item_width: f32,
    pub item_height: f32,
    /// Per-item height overrides, consulted before `item_height`.
    pub height_overrides: Vec<(ItemId, f32)>,
    /// Per-item width overrides, for width-contract fault injection.
    pub width_overrides: Vec<(ItemId, f32)>,

    pub available: usize,
    pub total: Option<usize>,
    pub batch_size: usize,

    /// Tag item views for recycling when set.
    pub reuse_id: Option<String>,

    pub header: Option<ViewHandle>,
    pub header_inside: bool,
    pub header_margin: f32,
    pub empty: Option<ViewHandle>,
    pub loading: Option<ViewHandle>,
    pub loading_inside: bool,
    pub loading_margin: f32,
    pub show_loading: bool,

    pub loads_started: usize,
    pub geometry_queries: usize,
    pub views_created: usize,
    pub views_dequeued: usize,
    pub recycled: Vec<(ViewId, ItemId)>,

    factory: ViewFactory,
}

impl ScriptedDataSource {
    pub fn new(columns: usize, item_width: f32, item_height: f32) -> Self {
        Self {
            columns,
            outer_padding: EdgeInsets::ZERO,
            vertical_item_margin: 0.0,
            horizontal_column_margin: 0.0,
            load_trigger_distance: DEFAULT_LOAD_TRIGGER_DISTANCE,
            item_width,
            item_height,
            height_overrides: Vec::new(),
            width_overrides: Vec::new(),
            available: 0,
            total: None,
            batch_size: 8,
            reuse_id: None,
            header: None,
            header_inside: true,
            header_margin: 0.0,
            empty: None,
            loading: None,
            loading_inside: true,
            loading_margin: 0.0,
            show_loading: true,
            loads_started: 0,
            geometry_queries: 0,
            views_created: 0,
            views_dequeued: 0,
            recycled: Vec::new(),
            factory: ViewFactory::new(),
        }
    }

    pub fn with_available(mut self, available: usize) -> Self {
        self.available = available;
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self.available = self.available.min(total);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_reuse_id(mut self, reuse_id: &str) -> Self {
        self.reuse_id = Some(reuse_id.to_owned());
        self
    }

    pub fn with_margins(mut self, vertical: f32, horizontal: f32) -> Self {
        self.vertical_item_margin = vertical;
        self.horizontal_column_margin = horizontal;
        self
    }

    /// Mints a decoration or standalone view from the shared factory.
    pub fn make_view(&mut self, width: f32, height: f32) -> ViewHandle {
        self.factory.make(width, height)
    }

    /// Simulates the host finishing an asynchronous load: one batch
    /// more becomes available. Pair with `notify_load_complete` on the
    /// list.
    pub fn complete_load(&mut self) {
        let grown = self.available + self.batch_size;
        self.available = match self.total {
            Some(total) => grown.min(total),
            None => grown,
        };
    }

    fn height_for(&self, item: ItemId) -> f32 {
        self.height_overrides
            .iter()
            .find(|(overridden, _)| *overridden == item)
            .map_or(self.item_height, |(_, height)| *height)
    }

    fn width_for(&self, item: ItemId) -> f32 {
        self.width_overrides
            .iter()
            .find(|(overridden, _)| *overridden == item)
            .map_or(self.item_width, |(_, width)| *width)
    }
}

impl ListDataSource for ScriptedDataSource {
    fn column_count(&mut self) -> usize {
        self.geometry_queries += 1;
        self.columns
    }

    fn load_trigger_distance(&mut self) -> f32 {
        self.load_trigger_distance
    }

    fn outer_padding(&mut self) -> EdgeInsets {
        self.outer_padding
    }

    fn vertical_item_margin(&mut self) -> f32 {
        self.vertical_item_margin
    }

    fn horizontal_column_margin(&mut self) -> f32 {
        self.horizontal_column_margin
    }

    fn is_item_available(&mut self, item: ItemId) -> bool {
        item < self.available
    }

    fn view_for_item(&mut self, item: ItemId, recycler: &mut Recycler<'_>) -> ViewHandle {
        let width = self.width_for(item);
        let height = self.height_for(item);

        if let Some(tag) = self.reuse_id.clone() {
            if let Some(view) = recycler.dequeue(&tag) {
                self.views_dequeued += 1;
                // The host resizes the recycled view for its new item.
                return ViewHandle::new(view.id, width, height);
            }
            let view = self.factory.make(width, height);
            recycler
                .set_reuse_identifier(view.id, &tag)
                .expect("fresh views have no tag yet");
            self.views_created += 1;
            return view;
        }

        self.views_created += 1;
        self.factory.make(width, height)
    }

    fn can_load_more(&mut self) -> bool {
        self.total.map_or(true, |total| self.available < total)
    }

    fn start_loading_more(&mut self) {
        self.loads_started += 1;
    }

    fn on_view_recycled(&mut self, view: ViewHandle, item: ItemId) {
        self.recycled.push((view.id, item));
    }

    fn header_view(&mut self) -> Option<ViewHandle> {
        self.header
    }

    fn header_inside_padding(&mut self) -> bool {
        self.header_inside
    }

    fn header_margin(&mut self) -> f32 {
        self.header_margin
    }

    fn empty_view(&mut self) -> Option<ViewHandle> {
        self.empty
    }

    fn show_loading_indicator(&mut self) -> bool {
        self.show_loading
    }

    fn loading_view(&mut self) -> Option<ViewHandle> {
        self.loading
    }

    fn loading_view_inside_padding(&mut self) -> bool {
        self.loading_inside
    }

    fn loading_view_margin(&mut self) -> f32 {
        self.loading_margin
    }
}
