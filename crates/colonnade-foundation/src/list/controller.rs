//! The list controller: wires layout, visibility, pooling, and
//! loading together behind the host-facing command surface.
//!
//! A controller owns its two host adapters, so every host callback
//! runs inside the calling method on the caller's thread; `&mut self`
//! statically rules out concurrent writers and reentrant mutation.
//! Loads stay asynchronous from the engine's point of view: the host
//! marshals its completion signal back to this thread and calls
//! [`InfiniteList::notify_load_complete`].

use std::collections::BTreeMap;

use super::host::{ListDataSource, ListEvents, Recycler};
use super::layout::ColumnLayout;
use super::load_more::{LoadMoreController, LoadState};
use super::reuse_pool::ReusePool;
use super::visibility::VisibilityTracker;
use crate::error::{Decoration, ListError};
use crate::geometry::GeometryConfig;
use crate::scroll::ScrollPosition;
use crate::view::{ReuseIdentifierRegistry, ViewHandle, ViewId};
use crate::ItemId;

/// Upper bound on placements per fill pass, against hosts that keep
/// answering with views too short to ever fill the window.
const MAX_ITEMS_PER_PASS: usize = 1000;

/// A live binding between an item and an on-screen view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewSlot {
    pub view: ViewHandle,
    pub column: usize,
    /// Top edge, in content coordinates.
    pub origin_y: f32,
}

/// The header view with its captured positioning answers.
#[derive(Clone, Copy, Debug)]
struct HeaderSlot {
    view: ViewHandle,
    inside_padding: bool,
    margin: f32,
}

/// Decoration answers captured once per generation.
#[derive(Clone, Copy, Debug, Default)]
struct Decorations {
    header: Option<HeaderSlot>,
    empty: Option<ViewHandle>,
    loading: Option<ViewHandle>,
    loading_inside: bool,
    loading_margin: f32,
    show_loading_indicator: bool,
}

/// State scoped to one generation, from one reset to the next.
struct Generation {
    config: GeometryConfig,
    layout: ColumnLayout,
    decorations: Decorations,
}

/// A virtualized, view-recycling, multi-column infinite list.
///
/// Construct with the frame size and the host adapters, then call
/// [`update`](Self::update) to run the first layout pass. Scroll
/// events go through [`set_scroll_offset`](Self::set_scroll_offset).
pub struct InfiniteList<D: ListDataSource, E: ListEvents> {
    data_source: D,
    events: E,
    frame_width: f32,
    frame_height: f32,
    scroll: ScrollPosition,
    pool: ReusePool,
    registry: ReuseIdentifierRegistry,
    visibility: VisibilityTracker,
    load_more: LoadMoreController,
    slots: BTreeMap<ItemId, ViewSlot>,
    generation: Option<Generation>,
}

impl<D: ListDataSource, E: ListEvents> InfiniteList<D, E> {
    pub fn new(frame_width: f32, frame_height: f32, data_source: D, events: E) -> Self {
        Self {
            data_source,
            events,
            frame_width,
            frame_height,
            scroll: ScrollPosition::new(frame_height),
            pool: ReusePool::new(),
            registry: ReuseIdentifierRegistry::new(),
            visibility: VisibilityTracker::new(),
            load_more: LoadMoreController::default(),
            slots: BTreeMap::new(),
            generation: None,
        }
    }

    pub fn data_source(&self) -> &D {
        &self.data_source
    }

    pub fn data_source_mut(&mut self) -> &mut D {
        &mut self.data_source
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    /// Runs a layout/visibility pass: captures geometry on the first
    /// pass of a generation, fills columns up to the trigger window,
    /// and rebinds or recycles on-screen views.
    pub fn update(&mut self) -> Result<(), ListError> {
        self.ensure_generation()?;
        let pending = self.fill()?;
        self.reconcile(pending)
    }

    /// Raw scroll event from the platform adapter. Clamps to the
    /// scrollable range, reports the change, and re-runs the pass.
    pub fn set_scroll_offset(&mut self, offset: f32) -> Result<(), ListError> {
        self.update()?;
        if self.scroll.scroll_to(offset) {
            let offset = self.scroll.offset();
            self.events.scrolled(offset);
            self.update()?;
        }
        Ok(())
    }

    /// Scrolls the viewport's top edge to `position`, clamped to the
    /// scrollable range. `animated` is a presentation hint for the
    /// platform adapter; the engine repositions immediately either
    /// way.
    pub fn scroll_to_position(&mut self, position: f32, animated: bool) -> Result<(), ListError> {
        let _ = animated;
        self.set_scroll_offset(position)
    }

    pub fn scroll_to_top(&mut self, animated: bool) -> Result<(), ListError> {
        self.scroll_to_position(0.0, animated)
    }

    /// The host finished loading more items. Re-queries availability
    /// and extends the list; new items may come on screen right away.
    ///
    /// Calling this with no load pending is reported as
    /// [`ListError::InvalidStateTransition`] and changes nothing.
    pub fn notify_load_complete(&mut self) -> Result<(), ListError> {
        self.load_more.complete()?;
        self.events.did_finish_loading();
        self.update()
    }

    /// Tears the generation down: recycles every live view, forgets
    /// all items, scrolls to the top, and re-queries geometry and
    /// decorations on the pass that follows. Reuse pools survive; call
    /// [`flush_reusable_pool`](Self::flush_reusable_pool) to drop them
    /// too.
    pub fn reset(&mut self) -> Result<(), ListError> {
        let slots = std::mem::take(&mut self.slots);
        for (item, slot) in slots {
            recycle_view(
                &mut self.pool,
                &self.registry,
                &mut self.data_source,
                slot.view,
                item,
            );
        }
        self.visibility.clear();
        self.load_more.reset();
        let was_scrolled = self.scroll.offset() != 0.0;
        self.scroll.reset();
        self.scroll.set_viewport_height(self.frame_height);
        if was_scrolled {
            self.events.scrolled(0.0);
        }
        self.generation = None;
        self.update()
    }

    /// Most recently recycled view for the identifier, if any.
    pub fn dequeue_reusable_view(&mut self, reuse_id: &str) -> Option<ViewHandle> {
        self.pool.checkout(reuse_id)
    }

    /// Dequeues a recycled view, or creates one with `factory` and
    /// registers it under the identifier.
    pub fn dequeue_reusable_view_or_else(
        &mut self,
        reuse_id: &str,
        factory: impl FnOnce() -> ViewHandle,
    ) -> Result<ViewHandle, ListError> {
        Recycler {
            pool: &mut self.pool,
            registry: &mut self.registry,
        }
        .dequeue_or_else(reuse_id, factory)
    }

    /// Tags a view for recycling. Write-once per view.
    pub fn set_reuse_identifier(&mut self, view: ViewId, reuse_id: &str) -> Result<(), ListError> {
        self.registry.register(view, reuse_id)
    }

    /// Releases every pooled view. Call on memory pressure.
    pub fn flush_reusable_pool(&mut self) {
        self.pool.flush();
    }

    /// Caps every pool without a per-identifier override.
    pub fn set_max_reusable_views_pool_size(&mut self, limit: usize) {
        self.pool.set_default_limit(limit);
    }

    pub fn set_pool_size_for_identifier(&mut self, reuse_id: &str, limit: usize) {
        self.pool.set_limit(reuse_id, limit);
    }

    pub fn is_item_visible(&self, item: ItemId) -> bool {
        self.slots.contains_key(&item)
    }

    /// Currently materialized items and their slots, ascending by
    /// identifier.
    pub fn visible_items(&self) -> &BTreeMap<ItemId, ViewSlot> {
        &self.slots
    }

    /// Width item views must have. Zero until geometry has been
    /// captured.
    pub fn required_view_width(&self) -> f32 {
        self.generation
            .as_ref()
            .map_or(0.0, |generation| generation.layout.item_width())
    }

    pub fn load_state(&self) -> LoadState {
        self.load_more.state()
    }

    /// Number of items discovered so far in this generation.
    pub fn item_count(&self) -> usize {
        self.generation
            .as_ref()
            .map_or(0, |generation| generation.layout.item_count())
    }

    pub fn content_height(&self) -> f32 {
        self.generation
            .as_ref()
            .map_or(0.0, |generation| generation.layout.content_height())
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.scroll.max_offset()
    }

    pub fn frame_width(&self) -> f32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> f32 {
        self.frame_height
    }

    pub fn header_view(&self) -> Option<ViewHandle> {
        self.generation
            .as_ref()
            .and_then(|generation| generation.decorations.header.map(|header| header.view))
    }

    pub fn empty_view(&self) -> Option<ViewHandle> {
        self.generation
            .as_ref()
            .and_then(|generation| generation.decorations.empty)
    }

    pub fn loading_view(&self) -> Option<ViewHandle> {
        self.generation
            .as_ref()
            .and_then(|generation| generation.decorations.loading)
    }

    /// Whether the empty-state view should show: the generation has no
    /// items at all and the host has confirmed there are none to load.
    pub fn is_empty_view_visible(&self) -> bool {
        match &self.generation {
            Some(generation) => {
                generation.decorations.empty.is_some()
                    && generation.layout.item_count() == 0
                    && self.load_more.is_exhausted()
            }
            None => false,
        }
    }

    /// Whether a loading indicator should show right now.
    pub fn is_loading_view_visible(&self) -> bool {
        self.load_more.is_loading()
            && self
                .generation
                .as_ref()
                .is_some_and(|generation| generation.decorations.show_loading_indicator)
    }

    /// Top edge for the loading indicator while it shows: below the
    /// last row, separated by the loading margin collapsed with the
    /// vertical item margin; in outside mode also below the bottom
    /// outer padding.
    pub fn loading_view_origin_y(&self) -> Option<f32> {
        if !self.is_loading_view_visible() {
            return None;
        }
        let generation = self.generation.as_ref()?;
        let decorations = &generation.decorations;
        let margin = decorations
            .loading_margin
            .max(generation.config.vertical_item_margin);
        let bottom = generation.layout.content_bottom();
        Some(if decorations.loading_inside {
            bottom + margin
        } else {
            bottom + generation.config.outer_padding.bottom + margin
        })
    }

    /// Reports a tap at a point in content coordinates (adapters add
    /// the scroll offset to viewport-local points). Fires the tap
    /// event when the point lands on a visible item's view.
    pub fn tap_at(&mut self, x: f32, y: f32) {
        let Some(generation) = self.generation.as_ref() else {
            return;
        };
        if let Some(item) = generation.layout.item_at_point(x, y) {
            if let Some(slot) = self.slots.get(&item) {
                self.events.item_tapped(slot.view, item);
            }
        }
    }

    /// Resizes the viewport. Visibility reacts immediately; the
    /// width-derived column geometry stays as captured until the next
    /// [`reset`](Self::reset).
    pub fn set_frame(&mut self, width: f32, height: f32) -> Result<(), ListError> {
        self.frame_width = width;
        self.frame_height = height;
        self.scroll.set_viewport_height(height);
        self.update()
    }

    /// Captures geometry and decorations at the start of a generation.
    fn ensure_generation(&mut self) -> Result<(), ListError> {
        if self.generation.is_some() {
            return Ok(());
        }

        let source = &mut self.data_source;
        let column_count = source.column_count();
        if column_count == 0 {
            return Err(ListError::MissingColumnCount);
        }
        let config = GeometryConfig {
            column_count,
            outer_padding: source.outer_padding(),
            vertical_item_margin: source.vertical_item_margin(),
            horizontal_column_margin: source.horizontal_column_margin(),
            load_trigger_distance: source.load_trigger_distance(),
        };

        let content_width = self.frame_width - config.outer_padding.horizontal();
        let header = match source.header_view() {
            Some(view) => {
                let inside_padding = source.header_inside_padding();
                let required = if inside_padding {
                    content_width
                } else {
                    self.frame_width
                };
                if view.width != required {
                    return Err(ListError::SizeMismatch {
                        decoration: Decoration::Header,
                        required,
                        actual: view.width,
                    });
                }
                Some(HeaderSlot {
                    view,
                    inside_padding,
                    margin: source.header_margin(),
                })
            }
            None => None,
        };
        let empty = match source.empty_view() {
            Some(view) => {
                if view.width != content_width {
                    return Err(ListError::SizeMismatch {
                        decoration: Decoration::Empty,
                        required: content_width,
                        actual: view.width,
                    });
                }
                Some(view)
            }
            None => None,
        };
        let show_loading_indicator = source.show_loading_indicator();
        let loading_inside = source.loading_view_inside_padding();
        let loading_margin = source.loading_view_margin();
        let loading = match source.loading_view() {
            Some(view) => {
                let required = if loading_inside {
                    content_width
                } else {
                    self.frame_width
                };
                if view.width != required {
                    return Err(ListError::SizeMismatch {
                        decoration: Decoration::Loading,
                        required,
                        actual: view.width,
                    });
                }
                Some(view)
            }
            None => None,
        };
        let decorations = Decorations {
            header,
            empty,
            loading,
            loading_inside,
            loading_margin,
            show_loading_indicator,
        };

        // The header margin collapses with the vertical item margin,
        // never with the top outer padding. An outside header sits
        // flush with the frame edge and the padding separates it from
        // the grid, so nothing collapses there.
        let grid_top = match &decorations.header {
            Some(header) if header.inside_padding => {
                config.outer_padding.top
                    + header.view.height
                    + header.margin.max(config.vertical_item_margin)
            }
            Some(header) => header.view.height + header.margin + config.outer_padding.top,
            None => config.outer_padding.top,
        };

        let layout = ColumnLayout::new(&config, self.frame_width, grid_top);
        self.load_more = LoadMoreController::new(config.load_trigger_distance);
        self.scroll.set_viewport_height(self.frame_height);
        self.generation = Some(Generation {
            config,
            layout,
            decorations,
        });
        Ok(())
    }

    /// Discovers and places items until the shortest column clears the
    /// scroll window plus the trigger distance, or the data source
    /// runs out. Returns the views acquired for newly placed items so
    /// the visibility pass can bind them without asking again.
    fn fill(&mut self) -> Result<Vec<(ItemId, ViewHandle)>, ListError> {
        let Self {
            data_source,
            events,
            pool,
            registry,
            scroll,
            load_more,
            generation,
            ..
        } = self;
        let Some(generation) = generation.as_mut() else {
            return Ok(Vec::new());
        };
        let layout = &mut generation.layout;

        let (_, window_end) = scroll.window();
        let mut pending = Vec::new();

        while load_more.state() == LoadState::Idle {
            let (_, shortest_bottom) = layout.shortest_column();
            if !load_more.within_trigger(shortest_bottom, window_end) {
                break;
            }
            if pending.len() >= MAX_ITEMS_PER_PASS {
                log::warn!(
                    "placed {} items in one pass without clearing the window; stopping early",
                    pending.len()
                );
                break;
            }

            let next = layout.item_count();
            if data_source.is_item_available(next) {
                let mut recycler = Recycler {
                    pool: &mut *pool,
                    registry: &mut *registry,
                };
                let view = data_source.view_for_item(next, &mut recycler);
                let required = layout.item_width();
                if view.width != required {
                    return Err(ListError::WidthMismatch {
                        item: next,
                        required,
                        actual: view.width,
                    });
                }
                layout.place(next, view.height);
                pending.push((next, view));
            } else if data_source.can_load_more() {
                load_more.begin();
                events.will_start_loading();
                data_source.start_loading_more();
            } else {
                load_more.exhaust();
                events.no_more_items();
            }
        }
        Ok(pending)
    }

    /// Diffs the required set against the live slots and binds,
    /// unbinds, and recycles accordingly.
    fn reconcile(&mut self, mut pending: Vec<(ItemId, ViewHandle)>) -> Result<(), ListError> {
        let Self {
            data_source,
            events,
            pool,
            registry,
            scroll,
            visibility,
            slots,
            generation,
            ..
        } = self;
        let Some(generation) = generation.as_mut() else {
            return Ok(());
        };
        let layout = &generation.layout;

        scroll.set_content_height(layout.content_height());
        let (window_start, window_end) = scroll.window();
        let delta = visibility.update(window_start, window_end, layout.placements());

        // Unbind leavers first so their views are warm in the pool for
        // this pass's newcomers.
        for &item in &delta.to_dematerialize {
            if let Some(slot) = slots.remove(&item) {
                events.item_exited(slot.view, item);
                recycle_view(pool, registry, data_source, slot.view, item);
            }
        }

        for &item in &delta.to_materialize {
            let view = match pending.iter().position(|(placed, _)| *placed == item) {
                Some(index) => pending.swap_remove(index).1,
                None => {
                    let mut recycler = Recycler {
                        pool: &mut *pool,
                        registry: &mut *registry,
                    };
                    let view = data_source.view_for_item(item, &mut recycler);
                    let required = layout.item_width();
                    if view.width != required {
                        return Err(ListError::WidthMismatch {
                            item,
                            required,
                            actual: view.width,
                        });
                    }
                    view
                }
            };
            let placement = layout.placements()[item];
            slots.insert(
                item,
                ViewSlot {
                    view,
                    column: placement.column,
                    origin_y: placement.origin_y,
                },
            );
            events.item_entered(view, item);
        }

        // Items discovered this pass but still outside the window go
        // straight back to the pool; they never came on screen.
        for (item, view) in pending {
            recycle_view(pool, registry, data_source, view, item);
        }

        if !delta.is_empty() {
            let items: Vec<ItemId> = slots.keys().copied().collect();
            events.visible_items_changed(&items);
        }
        Ok(())
    }
}

/// Parks a detached view in the pool (when it carries a reuse tag) and
/// tells the host it no longer shows `item`.
fn recycle_view<D: ListDataSource>(
    pool: &mut ReusePool,
    registry: &ReuseIdentifierRegistry,
    data_source: &mut D,
    view: ViewHandle,
    item: ItemId,
) {
    if let Some(tag) = registry.tag(view.id) {
        pool.checkin(tag, view);
    }
    data_source.on_view_recycled(view, item);
}
