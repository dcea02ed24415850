//! Visibility tracking and materialization deltas.
//!
//! Decides which placed items should be bound to live views for the
//! current scroll window, and reports the difference against the
//! previous pass so the controller binds and recycles exactly what
//! changed.

use std::collections::BTreeSet;

use super::layout::ItemPlacement;
use crate::ItemId;

/// Items to bind and unbind after a visibility pass, each in ascending
/// identifier order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisibilityDelta {
    pub to_materialize: Vec<ItemId>,
    pub to_dematerialize: Vec<ItemId>,
}

impl VisibilityDelta {
    pub fn is_empty(&self) -> bool {
        self.to_materialize.is_empty() && self.to_dematerialize.is_empty()
    }
}

/// Tracks which items are currently bound to live views.
#[derive(Clone, Debug, Default)]
pub struct VisibilityTracker {
    lookahead: f32,
    materialized: BTreeSet<ItemId>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the required window above and below the viewport.
    /// Zero by default; the load trigger distance is a separate
    /// bottom-of-content concept and does not widen visibility.
    pub fn with_lookahead(lookahead: f32) -> Self {
        Self {
            lookahead,
            materialized: BTreeSet::new(),
        }
    }

    /// Recomputes the required set for the window and returns the
    /// delta against the previous pass.
    ///
    /// An item is required when its span overlaps the window extended
    /// by the lookahead; touching an edge without overlap does not
    /// count. Identical consecutive calls produce an empty delta.
    pub fn update(
        &mut self,
        window_start: f32,
        window_end: f32,
        placements: &[ItemPlacement],
    ) -> VisibilityDelta {
        let lo = window_start - self.lookahead;
        let hi = window_end + self.lookahead;

        let mut required = BTreeSet::new();
        for placement in placements {
            if placement.origin_y < hi && placement.bottom() > lo {
                required.insert(placement.item);
            }
        }

        let delta = VisibilityDelta {
            to_materialize: required.difference(&self.materialized).copied().collect(),
            to_dematerialize: self.materialized.difference(&required).copied().collect(),
        };
        self.materialized = required;
        delta
    }

    pub fn is_materialized(&self, item: ItemId) -> bool {
        self.materialized.contains(&item)
    }

    /// Currently required items in ascending order.
    pub fn materialized(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.materialized.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.materialized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materialized.is_empty()
    }

    pub fn clear(&mut self) {
        self.materialized.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked_placements(count: usize, height: f32) -> Vec<ItemPlacement> {
        (0..count)
            .map(|item| ItemPlacement {
                item,
                column: 0,
                origin_y: item as f32 * height,
                height,
            })
            .collect()
    }

    #[test]
    fn test_initial_window_materializes_visible_items() {
        let mut tracker = VisibilityTracker::new();
        let placements = stacked_placements(10, 50.0);

        let delta = tracker.update(0.0, 120.0, &placements);
        assert_eq!(delta.to_materialize, vec![0, 1, 2]);
        assert!(delta.to_dematerialize.is_empty());
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut tracker = VisibilityTracker::new();
        let placements = stacked_placements(10, 50.0);

        tracker.update(0.0, 120.0, &placements);
        let second = tracker.update(0.0, 120.0, &placements);
        assert!(second.is_empty());
    }

    #[test]
    fn test_scroll_produces_both_deltas_in_ascending_order() {
        let mut tracker = VisibilityTracker::new();
        let placements = stacked_placements(20, 50.0);

        tracker.update(0.0, 200.0, &placements);
        let delta = tracker.update(130.0, 330.0, &placements);

        assert_eq!(delta.to_dematerialize, vec![0, 1]);
        assert_eq!(delta.to_materialize, vec![4, 5, 6]);
        assert!(tracker.is_materialized(2));
        assert!(!tracker.is_materialized(0));
    }

    #[test]
    fn test_edge_touching_items_are_not_required() {
        let mut tracker = VisibilityTracker::new();
        let placements = stacked_placements(10, 50.0);

        // Item 2 starts exactly at the window end, item 0 ends exactly
        // at the window start.
        let delta = tracker.update(50.0, 100.0, &placements);
        assert_eq!(delta.to_materialize, vec![1]);
    }

    #[test]
    fn test_lookahead_extends_window() {
        let mut tracker = VisibilityTracker::with_lookahead(50.0);
        let placements = stacked_placements(10, 50.0);

        let delta = tracker.update(100.0, 200.0, &placements);
        assert_eq!(delta.to_materialize, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_never_two_slots_for_one_item() {
        let mut tracker = VisibilityTracker::new();
        let placements = stacked_placements(40, 50.0);

        // Arbitrary back-and-forth scroll offsets; a materialize delta
        // must never name an already-materialized item.
        let mut live: BTreeSet<ItemId> = BTreeSet::new();
        for offset in [0.0, 75.0, 30.0, 500.0, 480.0, 0.0, 1500.0, 0.0] {
            let delta = tracker.update(offset, offset + 200.0, &placements);
            for item in delta.to_dematerialize {
                assert!(live.remove(&item));
            }
            for item in delta.to_materialize {
                assert!(live.insert(item));
            }
            assert_eq!(live.len(), tracker.len());
        }
    }

    #[test]
    fn test_clear_forgets_materialized_set() {
        let mut tracker = VisibilityTracker::new();
        let placements = stacked_placements(5, 50.0);

        tracker.update(0.0, 200.0, &placements);
        tracker.clear();
        assert!(tracker.is_empty());

        // Everything materializes again after a clear.
        let delta = tracker.update(0.0, 200.0, &placements);
        assert_eq!(delta.to_materialize, vec![0, 1, 2, 3]);
    }
}
