#![forbid(unsafe_code)]

//! End-to-end behavior of the two views on a virtual clock.
//!
//! | Scenario                                                     |
//! |--------------------------------------------------------------|
//! | Array insert highlights at once and settles after the delay  |
//! | List delete keeps the node until the commit, then renumbers  |
//! | Rejected mutations change nothing and start no animation      |
//! | Clicks report data elements only                             |
//! | Every frame keeps boxes between the canvas side edges        |

use std::time::Duration;

use linviz::{
    ArrayView, CellScale, LayoutFrame, ListView, MutationError, PackStrategy,
    PointerEvent as Press, Structure, StructureKind, ViewEvent, VisualState, Visualizer,
};
use proptest::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("linviz=debug")
        .try_init();
}

/// Tick at 60 fps until nothing is pending.
fn settle<S: Structure>(view: &mut Visualizer<S>) -> usize {
    let mut frames = 0;
    while view.is_busy() {
        view.tick(Duration::from_micros(16_667));
        frames += 1;
        assert!(frames < 1_000, "view never settled");
    }
    frames
}

#[test]
fn array_insert_highlights_then_settles() {
    init_tracing();
    let mut view = ArrayView::default();
    view.resize(800, 400);
    view.initialize_len(5);
    assert!(view.insert(-1, "x"));

    let e = view.frame().element(0).unwrap().clone();
    assert_eq!(e.text, "x");
    assert_eq!(e.state, VisualState::Highlighted);
    assert_eq!(view.size(), 5);
    assert_eq!(view.occupied_count(), 1);

    // Mid-sweep the element is lifted but still clickable in place.
    view.tick(ms(250));
    let lifted = view.frame().element(0).unwrap().clone();
    assert!(lifted.rect.y < lifted.base_rect.y);
    let hit = Press::left(lifted.base_rect.x + 1, lifted.base_rect.bottom() - 1);
    assert_eq!(view.pointer(hit), Some(ViewEvent::ElementClicked { index: 0 }));

    view.tick(ms(350));
    let e = view.frame().element(0).unwrap();
    assert_eq!(e.state, VisualState::Normal);
    assert_eq!(e.text, "x");
    assert_eq!(e.rect, e.base_rect);
    assert!(!view.is_busy());
}

#[test]
fn list_delete_unlinks_after_commit() {
    init_tracing();
    let mut view = ListView::default();
    view.resize(800, 600);
    view.initialize_values(&["a", "b"]);
    assert_eq!(view.try_delete(0), Ok(0));

    let first = view.frame().element(0).unwrap().clone();
    assert_eq!(first.state, VisualState::Highlighted);
    assert_eq!(first.text, "a");
    assert_eq!(view.values(), ["a", "b"]);

    let outcome = view.tick(ms(500));
    assert_eq!(outcome.applied, 1);
    assert_eq!(view.values(), ["b"]);
    let frame = view.frame();
    assert_eq!(frame.elements.len(), 1);
    assert_eq!(frame.elements[0].index, 0);
    assert_eq!(frame.elements[0].label, "[0]");
    assert_eq!(frame.connectors.len(), 1);
}

#[test]
fn list_modify_and_empty_list_errors() {
    let mut view = ListView::default();
    view.initialize_len(0);
    assert_eq!(view.size(), 0);
    assert_eq!(view.try_delete(0), Err(MutationError::EmptyStructure));
    assert_eq!(view.try_modify(0, "x"), Err(MutationError::EmptyStructure));
    assert!(!view.is_busy());

    view.initialize_len(3);
    assert_eq!(view.values(), ["node0", "node1", "node2"]);
    assert!(view.modify(1, "mid"));
    assert_eq!(view.values(), ["node0", "node1", "node2"]);
    settle(&mut view);
    assert_eq!(view.values(), ["node0", "mid", "node2"]);
}

#[test]
fn rejected_mutations_leave_the_frame_alone() {
    let mut view = ArrayView::default();
    view.resize(800, 400);
    view.initialize_values(&["a", "b", "c"]);
    let before = view.frame().clone();

    assert!(!view.delete(7));
    assert!(!view.insert(-2, "x"));
    assert!(!view.modify(-1, "x"));
    assert!(!view.is_busy());
    assert_eq!(view.frame(), &before);
}

#[test]
fn full_array_rejects_insert() {
    let mut view = ArrayView::default();
    let values: Vec<String> = (0..30).map(|i| i.to_string()).collect();
    view.initialize_values(&values);
    assert_eq!(
        view.try_insert(3, "x"),
        Err(MutationError::CapacityExceeded { capacity: 30 })
    );
    assert_eq!(view.size(), 30);
    assert_eq!(view.occupied_count(), 30);
}

#[test]
fn rapid_edits_both_apply() {
    let mut view = ListView::default();
    view.initialize_values(&["a", "b", "c"]);
    assert!(view.delete(0));
    view.tick(ms(200));
    assert!(view.delete(2));
    assert_eq!(view.animation().active_index, Some(2));
    assert_eq!(view.animation().progress, 0.0);
    settle(&mut view);
    assert_eq!(view.values(), ["b"]);
}

#[test]
fn stale_chain_commit_is_dropped() {
    let mut view = ListView::default();
    view.initialize_values(&["a", "b"]);
    assert!(view.delete(1));
    assert!(view.delete(1));
    let outcome = view.tick(ms(500));
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.dropped, 1);
    assert_eq!(view.values(), ["a"]);
}

#[test]
fn clicks_skip_holes_and_sentinel() {
    let mut array = ArrayView::default();
    array.resize(800, 400);
    array.initialize_len(3);
    let hole = array.frame().element(1).unwrap().base_rect;
    assert_eq!(array.pointer(Press::left(hole.x + 2, hole.y + 2)), None);

    let mut list = ListView::default();
    list.resize(800, 600);
    list.initialize_values(&["a", "b"]);
    let head = list.frame().sentinel.as_ref().unwrap().rect;
    assert_eq!(list.pointer(Press::left(head.x + 2, head.y + 2)), None);
    let node = list.frame().element(1).unwrap().base_rect;
    assert_eq!(
        list.pointer(Press::left(node.x + 2, node.y + 2)),
        Some(ViewEvent::ElementClicked { index: 1 })
    );
    assert_eq!(
        list.drain_events(),
        vec![ViewEvent::ElementClicked { index: 1 }]
    );
    assert!(list.drain_events().is_empty());
}

#[test]
fn paints_a_small_list() {
    let mut view = ListView::default();
    view.resize(800, 600);
    view.initialize_values(&["a", "b", "c"]);
    let lines = view.paint(CellScale::default());
    let text = lines.join("\n");
    assert!(text.contains("head"));
    assert!(text.contains("[2]"));
    assert!(text.contains('▶') || text.contains('▼'));
}

#[test]
fn resize_repacks() {
    let mut view = ArrayView::default();
    view.initialize_len(30);
    view.resize(1600, 900);
    let wide = view.layout().clone();
    view.resize(400, 900);
    let narrow = view.layout().clone();
    assert!(narrow.columns < wide.columns);
    assert_eq!(narrow.kind, StructureKind::Slots);
}

fn boxes_inside(layout: &LayoutFrame, w: i32) -> bool {
    layout.columns >= 1
        && (0..layout.len())
            .filter_map(|i| layout.rect(i))
            .all(|r| r.x >= 0 && r.right() <= w)
}

#[test]
fn narrow_array_boxes_fit_the_canvas() {
    let mut view = ArrayView::default();
    view.resize(100, 300);
    view.initialize_values(&["a", "b", "c"]);
    assert_eq!(view.layout().strategy, PackStrategy::Fallback);
    assert!(boxes_inside(view.layout(), 100));
    for e in &view.frame().elements {
        assert!(e.base_rect.right() <= 100, "{:?} leaves the canvas", e.base_rect);
    }
}

proptest! {
    #[test]
    fn frames_stay_inside_the_canvas(
        w in 1i32..1600,
        h in 1i32..1000,
        n in 0isize..=30,
        chain in any::<bool>(),
    ) {
        if chain {
            let mut view = ListView::default();
            view.resize(w, h);
            view.initialize_len(n);
            prop_assert!(boxes_inside(view.layout(), w));
        } else {
            let mut view = ArrayView::default();
            view.resize(w, h);
            view.initialize_len(n);
            prop_assert!(boxes_inside(view.layout(), w));
        }
    }

    #[test]
    fn list_ranks_follow_edits(ops in proptest::collection::vec((0u8..3, 0isize..8), 1..40)) {
        let mut view = ListView::default();
        view.initialize_values(&["a", "b", "c"]);
        for (op, index) in ops {
            match op {
                0 => { view.insert(index - 1, "n"); }
                1 => { view.delete(index); }
                _ => { view.modify(index, "m"); }
            }
            view.tick(ms(600));
            let elements = view.store().elements();
            for (rank, e) in elements.iter().enumerate() {
                prop_assert_eq!(e.index, rank);
            }
            prop_assert_eq!(view.size(), elements.len());
        }
    }
}
