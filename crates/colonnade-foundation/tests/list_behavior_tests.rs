//! Cross-component behavior of the list engine, driven through the
//! public surface with scripted hosts.

use colonnade_foundation::{
    Decoration, EdgeInsets, InfiniteList, ListError, LoadState,
};
use colonnade_testing::{Event, RecordingEvents, ScriptedDataSource};

type TestList = InfiniteList<ScriptedDataSource, RecordingEvents>;

fn new_list(source: ScriptedDataSource, width: f32, height: f32) -> TestList {
    InfiniteList::new(width, height, source, RecordingEvents::new())
}

/// Scroll offsets are clamped to loaded content, so long jumps take
/// several events as the fill extends the scrollable range - like a
/// platform scroll view's content size growing under the user.
fn scroll_until(list: &mut TestList, target: f32) {
    for _ in 0..200 {
        let before = list.scroll_offset();
        list.set_scroll_offset(target).unwrap();
        if list.scroll_offset() == before {
            return;
        }
    }
    panic!("scroll to {target} never settled");
}

#[test]
fn test_placement_scenario_two_columns() {
    let source = ScriptedDataSource::new(2, 100.0, 50.0)
        .with_available(100)
        .with_margins(10.0, 0.0);
    let mut list = new_list(source, 200.0, 480.0);
    list.update().unwrap();

    let expected = [(0, 0, 0.0), (1, 1, 0.0), (2, 0, 60.0), (3, 1, 60.0), (4, 0, 120.0)];
    for (item, column, origin_y) in expected {
        let slot = &list.visible_items()[&item];
        assert_eq!(slot.column, column, "item {item}");
        assert_eq!(slot.origin_y, origin_y, "item {item}");
    }
}

#[test]
fn test_update_is_idempotent() {
    let source = ScriptedDataSource::new(2, 100.0, 50.0).with_available(100);
    let mut list = new_list(source, 200.0, 480.0);

    list.update().unwrap();
    let seen = list.events().events.len();
    let visible = list.visible_items().clone();

    list.update().unwrap();
    list.update().unwrap();
    assert_eq!(list.events().events.len(), seen);
    assert_eq!(list.visible_items(), &visible);
}

#[test]
fn test_geometry_is_captured_once_per_generation() {
    let source = ScriptedDataSource::new(2, 100.0, 50.0).with_available(100);
    let mut list = new_list(source, 200.0, 480.0);

    list.update().unwrap();
    scroll_until(&mut list, 600.0);
    list.update().unwrap();
    assert_eq!(list.data_source().geometry_queries, 1);

    list.reset().unwrap();
    assert_eq!(list.data_source().geometry_queries, 2);
}

#[test]
fn test_load_cycle_fires_each_notification_once() {
    let source = ScriptedDataSource::new(1, 100.0, 50.0)
        .with_available(4)
        .with_batch_size(6);
    let mut list = new_list(source, 100.0, 200.0);

    list.update().unwrap();
    assert_eq!(list.load_state(), LoadState::AwaitingMore);
    assert!(list.is_loading_view_visible());
    assert_eq!(list.data_source().loads_started, 1);
    assert_eq!(list.events().count(&Event::WillStartLoading), 1);

    // Re-running the pass while a load is pending must not re-trigger.
    list.update().unwrap();
    list.update().unwrap();
    assert_eq!(list.events().count(&Event::WillStartLoading), 1);
    assert_eq!(list.data_source().loads_started, 1);

    list.data_source_mut().complete_load();
    list.notify_load_complete().unwrap();
    assert_eq!(list.load_state(), LoadState::Idle);
    assert!(!list.is_loading_view_visible());
    assert_eq!(list.events().count(&Event::DidFinishLoading), 1);
    assert_eq!(list.events().count(&Event::WillStartLoading), 1);
    assert!(list.item_count() > 4);
}

#[test]
fn test_exhaustion_is_terminal_until_reset() {
    let source = ScriptedDataSource::new(1, 100.0, 50.0)
        .with_available(4)
        .with_total(4);
    let mut list = new_list(source, 100.0, 200.0);

    list.update().unwrap();
    assert_eq!(list.load_state(), LoadState::NoMoreAvailable);
    assert_eq!(list.events().count(&Event::NoMoreItems), 1);
    assert_eq!(list.data_source().loads_started, 0);

    // No further trigger from scrolling around the end of content.
    scroll_until(&mut list, 600.0);
    list.update().unwrap();
    assert_eq!(list.events().count(&Event::NoMoreItems), 1);
    assert_eq!(list.events().count(&Event::WillStartLoading), 0);

    // A stray completion is reported and changes nothing.
    assert_eq!(
        list.notify_load_complete(),
        Err(ListError::InvalidStateTransition {
            state: LoadState::NoMoreAvailable
        })
    );
    assert_eq!(list.load_state(), LoadState::NoMoreAvailable);
    assert_eq!(list.events().count(&Event::DidFinishLoading), 0);
}

#[test]
fn test_width_mismatch_is_fatal_before_binding() {
    let mut source = ScriptedDataSource::new(1, 100.0, 50.0).with_available(10);
    source.width_overrides.push((2, 90.0));
    let mut list = new_list(source, 100.0, 400.0);

    assert_eq!(
        list.update(),
        Err(ListError::WidthMismatch {
            item: 2,
            required: 100.0,
            actual: 90.0,
        })
    );
    assert!(!list.is_item_visible(2));
    assert!(list.visible_items().is_empty());
    assert_eq!(list.events().count_matching(|e| matches!(e, Event::Entered { .. })), 0);
}

#[test]
fn test_scroll_recycles_views_through_the_pool() {
    let source = ScriptedDataSource::new(1, 100.0, 50.0)
        .with_available(200)
        .with_reuse_id("cell");
    let mut list = new_list(source, 100.0, 200.0);
    list.update().unwrap();

    scroll_until(&mut list, 1000.0);
    assert!(!list.is_item_visible(0));
    let created_after_descent = list.data_source().views_created;
    assert!(list
        .data_source()
        .recycled
        .iter()
        .any(|&(_, item)| item == 0));

    // Scrolling back re-binds early items from recycled views instead
    // of minting new ones.
    scroll_until(&mut list, 0.0);
    assert!(list.is_item_visible(0));
    assert!(list.data_source().views_dequeued > 0);
    assert_eq!(list.data_source().views_created, created_after_descent);
}

#[test]
fn test_pool_limit_bounds_recycling() {
    let source = ScriptedDataSource::new(1, 100.0, 50.0)
        .with_available(4)
        .with_total(4)
        .with_reuse_id("cell");
    let mut list = new_list(source, 100.0, 400.0);
    list.set_pool_size_for_identifier("cell", 2);

    list.update().unwrap();
    assert_eq!(list.visible_items().len(), 4);

    // Resetting into an empty generation returns all four views; the
    // limit keeps exactly two.
    list.data_source_mut().available = 0;
    list.data_source_mut().total = Some(0);
    list.reset().unwrap();

    let mut pooled = 0;
    while list.dequeue_reusable_view("cell").is_some() {
        pooled += 1;
    }
    assert_eq!(pooled, 2);
}

#[test]
fn test_enter_and_exit_events_are_ordered() {
    let source = ScriptedDataSource::new(1, 100.0, 50.0).with_available(200);
    let mut list = new_list(source, 100.0, 200.0);
    list.update().unwrap();
    list.events_mut().clear();

    scroll_until(&mut list, 400.0);

    let exited: Vec<_> = list
        .events()
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Exited { item, .. } => Some(*item),
            _ => None,
        })
        .collect();
    let entered: Vec<_> = list
        .events()
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Entered { item, .. } => Some(*item),
            _ => None,
        })
        .collect();

    let mut sorted = exited.clone();
    sorted.sort_unstable();
    assert_eq!(exited, sorted, "exits ascend within and across passes");
    let mut sorted = entered.clone();
    sorted.sort_unstable();
    assert_eq!(entered, sorted, "enters ascend within and across passes");
    assert!(exited.contains(&0));
}

#[test]
fn test_no_item_is_ever_bound_twice() {
    let source = ScriptedDataSource::new(2, 100.0, 50.0).with_available(400);
    let mut list = new_list(source, 200.0, 300.0);
    list.update().unwrap();

    for target in [200.0, 50.0, 900.0, 850.0, 0.0, 2000.0, 0.0] {
        scroll_until(&mut list, target);
    }

    // Replay the stream: an item may only enter when not live, and
    // only exit when live.
    let mut live = std::collections::BTreeSet::new();
    for event in &list.events().events {
        match event {
            Event::Entered { item, .. } => assert!(live.insert(*item), "double bind of {item}"),
            Event::Exited { item, .. } => assert!(live.remove(item), "exit without bind of {item}"),
            _ => {}
        }
    }
    let visible: Vec<_> = list.visible_items().keys().copied().collect();
    let live: Vec<_> = live.into_iter().collect();
    assert_eq!(live, visible);
}

#[test]
fn test_visible_set_event_only_fires_on_change() {
    // A 220 viewport over 50-high items leaves slack: a 5-point scroll
    // changes no item's visibility.
    let source = ScriptedDataSource::new(1, 100.0, 50.0).with_available(100);
    let mut list = new_list(source, 100.0, 220.0);
    list.update().unwrap();

    let changes = list
        .events()
        .count_matching(|e| matches!(e, Event::VisibleChanged { .. }));
    assert_eq!(changes, 1);

    // A scroll too small to change the visible set reports the offset
    // but not the set.
    list.set_scroll_offset(5.0).unwrap();
    assert_eq!(list.events().count(&Event::Scrolled { offset: 5.0 }), 1);
    let after = list
        .events()
        .count_matching(|e| matches!(e, Event::VisibleChanged { .. }));
    assert_eq!(after, changes);
}

#[test]
fn test_scroll_commands_clamp_and_report() {
    let source = ScriptedDataSource::new(1, 100.0, 50.0)
        .with_available(10)
        .with_total(10);
    let mut list = new_list(source, 100.0, 200.0);
    list.update().unwrap();

    scroll_until(&mut list, 10_000.0);
    // 10 items of 50 against a 200 viewport.
    assert_eq!(list.content_height(), 500.0);
    assert_eq!(list.scroll_offset(), 300.0);
    assert_eq!(list.max_scroll_offset(), 300.0);
    assert!(list.is_item_visible(9));

    list.scroll_to_top(true).unwrap();
    assert_eq!(list.scroll_offset(), 0.0);
    assert!(list.is_item_visible(0));
    assert_eq!(list.events().count(&Event::Scrolled { offset: 0.0 }), 1);
}

#[test]
fn test_reset_starts_a_fresh_generation() {
    let mut source = ScriptedDataSource::new(1, 100.0, 50.0)
        .with_available(6)
        .with_total(6)
        .with_reuse_id("cell");
    source.empty = Some(source.make_view(100.0, 80.0));
    let mut list = new_list(source, 100.0, 500.0);

    list.update().unwrap();
    assert!(list.is_item_visible(0));
    assert!(!list.is_empty_view_visible());
    let live: Vec<_> = list.visible_items().keys().copied().collect();

    // The next generation has nothing to offer.
    list.data_source_mut().available = 0;
    list.data_source_mut().total = Some(0);
    list.reset().unwrap();

    assert!(list.visible_items().is_empty());
    for item in live {
        assert!(!list.is_item_visible(item));
    }
    assert_eq!(list.item_count(), 0);
    // Every previously live view was reported recycled, and the pool
    // survived the reset.
    assert!(list.data_source().recycled.len() >= 6);
    assert!(list.dequeue_reusable_view("cell").is_some());
    // Zero items and a confirmed end of content show the empty view.
    assert_eq!(list.load_state(), LoadState::NoMoreAvailable);
    assert!(list.is_empty_view_visible());
}

#[test]
fn test_header_offsets_the_grid() {
    let mut source = ScriptedDataSource::new(2, 100.0, 50.0)
        .with_available(10)
        .with_margins(10.0, 0.0);
    source.outer_padding = EdgeInsets::new(10.0, 0.0, 0.0, 0.0);
    source.header = Some(source.make_view(200.0, 40.0));
    source.header_margin = 4.0;
    let mut list = new_list(source, 200.0, 480.0);
    list.update().unwrap();

    // Top padding, then the header, then its margin collapsed with the
    // larger item margin.
    assert_eq!(list.header_view().map(|v| v.height), Some(40.0));
    assert_eq!(list.visible_items()[&0].origin_y, 60.0);
    assert_eq!(list.visible_items()[&2].origin_y, 120.0);
}

#[test]
fn test_mis_sized_header_is_rejected() {
    let mut source = ScriptedDataSource::new(2, 100.0, 50.0).with_available(10);
    source.header = Some(source.make_view(150.0, 40.0));
    let mut list = new_list(source, 200.0, 480.0);

    assert_eq!(
        list.update(),
        Err(ListError::SizeMismatch {
            decoration: Decoration::Header,
            required: 200.0,
            actual: 150.0,
        })
    );
}

#[test]
fn test_loading_view_sits_below_content() {
    let mut source = ScriptedDataSource::new(1, 100.0, 50.0)
        .with_available(2)
        .with_margins(10.0, 0.0);
    source.loading = Some(source.make_view(100.0, 30.0));
    let mut list = new_list(source, 100.0, 400.0);
    list.update().unwrap();

    assert_eq!(list.load_state(), LoadState::AwaitingMore);
    assert_eq!(list.loading_view().map(|v| v.height), Some(30.0));
    // Two items: 0..50 and 60..110; the loading margin collapses with
    // the item margin.
    assert_eq!(list.loading_view_origin_y(), Some(120.0));

    list.data_source_mut().complete_load();
    list.notify_load_complete().unwrap();
    assert_eq!(list.loading_view_origin_y(), None);
}

#[test]
fn test_tap_hits_only_visible_items() {
    let source = ScriptedDataSource::new(2, 100.0, 50.0)
        .with_available(100)
        .with_margins(10.0, 0.0);
    let mut list = new_list(source, 200.0, 200.0);
    list.update().unwrap();

    list.tap_at(50.0, 25.0); // item 0
    list.tap_at(150.0, 70.0); // item 3
    list.tap_at(50.0, 55.0); // margin row between items
    list.tap_at(50.0, 2_000.0); // below everything placed

    let taps: Vec<_> = list
        .events()
        .events
        .iter()
        .filter_map(|e| match e {
            Event::Tapped { item, .. } => Some(*item),
            _ => None,
        })
        .collect();
    assert_eq!(taps, vec![0, 3]);
}

#[test]
fn test_viewport_resize_changes_visibility_not_geometry() {
    let source = ScriptedDataSource::new(1, 100.0, 50.0).with_available(100);
    let mut list = new_list(source, 100.0, 200.0);
    list.update().unwrap();
    let narrow = list.required_view_width();
    let visible_before = list.visible_items().len();

    list.set_frame(150.0, 400.0).unwrap();
    assert!(list.visible_items().len() > visible_before);
    // Width-derived column geometry holds until the next reset.
    assert_eq!(list.required_view_width(), narrow);
}
