#![forbid(unsafe_code)]

//! Hit testing against derived frames.

use linviz_core::{Point, Size};
use linviz_layout::{LayoutFrame, PackerConfig, pack};
use linviz_render::{FrameInput, HitTarget, Palette, RenderFrame, derive_frame};
use linviz_runtime::AnimationState;
use linviz_store::{NodeChain, SlotArray, Structure};
use proptest::prelude::*;

fn frame_for<S: Structure>(store: &S, canvas: Size, animation: &AnimationState) -> RenderFrame {
    let config = PackerConfig::for_kind(S::KIND);
    let layout = pack(canvas, store.layout_count(), &config)
        .unwrap_or_else(|| LayoutFrame::initial(&config));
    let elements = store.elements();
    derive_frame(&FrameInput {
        kind: S::KIND,
        canvas,
        layout: &layout,
        elements: &elements,
        animation,
        bump_height: 10.0,
        palette: &Palette::default(),
    })
}

proptest! {
    #[test]
    fn box_centers_hit_their_element(
        w in 300i32..1600,
        h in 300i32..1000,
        n in 1usize..=30,
        lifted in 0usize..30,
    ) {
        let values: Vec<String> = (0..n).map(|i| i.to_string()).collect();
        let animation = AnimationState { progress: 0.5, ..AnimationState::started(lifted) };
        let mut chain = NodeChain::new();
        chain.initialize_values(&values);
        let frame = frame_for(&chain, Size::new(w, h), &animation);
        for e in &frame.elements {
            let r = e.base_rect;
            let center = Point::new(r.x + r.width / 2, r.y + r.height / 2);
            prop_assert_eq!(frame.hit_test(center), HitTarget::Element(e.index));
        }
    }
}

#[test]
fn holes_and_gaps_do_not_hit_elements() {
    let mut array = SlotArray::new();
    array.initialize_values(&["a", "b", "c"]);
    let commit = array.delete(1).unwrap();
    array.apply(commit.commit);
    let frame = frame_for(&array, Size::new(800, 400), &AnimationState::IDLE);

    let hole = frame.element(1).unwrap().base_rect;
    assert_eq!(frame.hit_test(hole.origin()), HitTarget::Hole(1));
    let first = frame.element(0).unwrap().base_rect;
    assert_eq!(
        frame.hit_test(Point::new(first.right(), first.y)),
        HitTarget::Nothing
    );
    assert_eq!(frame.hit_test(Point::new(0, 0)), HitTarget::Nothing);
}

#[test]
fn sentinel_is_not_an_element() {
    let mut chain = NodeChain::new();
    chain.initialize_values(&["a"]);
    let frame = frame_for(&chain, Size::new(800, 600), &AnimationState::IDLE);
    let head = frame.sentinel.as_ref().unwrap().rect;
    assert_eq!(frame.hit_test(head.origin()), HitTarget::Sentinel);
}
