#![forbid(unsafe_code)]

//! Frame derivation.

use linviz_core::{KindCaps, Rect, Size, StructureKind};
use linviz_layout::LayoutFrame;
use linviz_runtime::AnimationState;
use linviz_store::ElementView;
use linviz_store::chain::SENTINEL_LABEL;

use crate::model::{Connector, ElementSprite, RenderFrame, SentinelSprite, VisualState};
use crate::palette::{Palette, hole_font_px, node_font_px, slot_font_px};

/// Text shown in an empty slot.
pub const HOLE_TEXT: &str = "empty";

/// Distance from the top of an index label to the top of its element.
const LABEL_RISE: i32 = 18;
const LABEL_HEIGHT: i32 = 15;

/// Inputs of [`derive_frame`].
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub kind: StructureKind,
    pub canvas: Size,
    pub layout: &'a LayoutFrame,
    pub elements: &'a [ElementView],
    pub animation: &'a AnimationState,
    /// Peak lift of the animated element.
    pub bump_height: f32,
    pub palette: &'a Palette,
}

/// Build the drawable frame for the current store, layout and animation.
///
/// Elements the layout has no position for yet are left out.
pub fn derive_frame(input: &FrameInput<'_>) -> RenderFrame {
    let caps = input.kind.caps();
    let layout = input.layout;
    let width = layout.element.width;

    let elements: Vec<ElementSprite> = input
        .elements
        .iter()
        .filter_map(|view| {
            let base_rect = layout.rect(view.index)?;
            let rect = base_rect.translate(
                0,
                input.animation.offset_for(view.index, input.bump_height),
            );
            let state = if !view.occupied {
                VisualState::Empty
            } else if view.highlighted {
                VisualState::Highlighted
            } else {
                VisualState::Normal
            };
            let (text, font_px) = match state {
                VisualState::Empty => (HOLE_TEXT.to_owned(), hole_font_px(width)),
                _ if caps.contains(KindCaps::CHAIN_BASED) => {
                    (view.value.clone(), node_font_px(width))
                }
                _ => (view.value.clone(), slot_font_px(width)),
            };
            let (label, label_rect) = if caps.contains(KindCaps::SLOT_BASED) {
                // Slot labels stay put and are hidden once they leave the canvas.
                let r = label_rect_above(base_rect);
                let visible = r.y >= 0 && r.bottom() < input.canvas.height;
                (view.index.to_string(), visible.then_some(r))
            } else {
                // Chain labels ride along with the animated box.
                (format!("[{}]", view.index), Some(label_rect_above(rect)))
            };
            Some(ElementSprite {
                index: view.index,
                rect,
                base_rect,
                text,
                state,
                style: input.palette.style(state),
                font_px,
                label,
                label_rect,
            })
        })
        .collect();

    let sentinel = if caps.contains(KindCaps::SENTINEL) {
        layout.sentinel_rect().map(|rect| SentinelSprite {
            rect,
            text: SENTINEL_LABEL.to_owned(),
            style: input.palette.style(VisualState::Sentinel),
            font_px: node_font_px(width),
        })
    } else {
        None
    };

    let connectors = if caps.contains(KindCaps::CONNECTORS) {
        chain_connectors(layout, elements.len())
    } else {
        Vec::new()
    };

    linviz_core::trace!(
        kind = %input.kind,
        elements = elements.len(),
        connectors = connectors.len(),
        "frame derived"
    );

    RenderFrame {
        kind: input.kind,
        canvas: input.canvas,
        elements,
        sentinel,
        connectors,
    }
}

fn label_rect_above(rect: Rect) -> Rect {
    Rect::new(rect.x, rect.y - LABEL_RISE, rect.width, LABEL_HEIGHT)
}

/// Sentinel-to-first arrow followed by one arrow per consecutive node pair.
///
/// Uses the layout boxes, so arrows stay put while a node is lifted.
fn chain_connectors(layout: &LayoutFrame, count: usize) -> Vec<Connector> {
    let mut connectors = Vec::with_capacity(count);
    if count == 0 {
        return connectors;
    }
    let h = layout.element.height;

    if let (Some(head), Some(first)) = (layout.sentinel_rect(), layout.rect(0)) {
        if first.y > head.y + h {
            connectors.push(Connector::down(head.bottom_center(), first.top_center()));
        } else {
            let from = head.right_center();
            let to = first.origin().offset(-layout.connector, h / 2);
            connectors.push(Connector::horizontal(from, to));
        }
    }

    for i in 0..count.saturating_sub(1) {
        let Some(rect) = layout.rect(i) else {
            break;
        };
        if layout.row_of(i) == layout.row_of(i + 1) {
            let from = rect.right_center();
            connectors.push(Connector::horizontal(from, from.offset(layout.connector, 0)));
        } else {
            let from = rect.bottom_center();
            connectors.push(Connector::down(from, from.offset(0, layout.row_gap)));
        }
    }
    connectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use linviz_core::Point;
    use linviz_layout::{PackerConfig, pack};
    use linviz_store::{NodeChain, SlotArray, Structure};

    use crate::model::ConnectorKind;

    fn frame_for<S: Structure>(store: &S, canvas: Size, anim: &AnimationState) -> RenderFrame {
        let config = PackerConfig::for_kind(S::KIND);
        let layout = pack(canvas, store.layout_count(), &config)
            .unwrap_or_else(|| LayoutFrame::initial(&config));
        let elements = store.elements();
        derive_frame(&FrameInput {
            kind: S::KIND,
            canvas,
            layout: &layout,
            elements: &elements,
            animation: anim,
            bump_height: 10.0,
            palette: &Palette::default(),
        })
    }

    #[test]
    fn slot_states_and_text() {
        let mut array = SlotArray::new();
        array.initialize_values(&["a", "b"]);
        array.initialize_len(5);
        array.insert(-1, "x".into()).unwrap();
        let frame = frame_for(&array, Size::new(800, 400), &AnimationState::IDLE);

        assert_eq!(frame.elements.len(), 5);
        let first = frame.element(0).unwrap();
        assert_eq!(first.state, VisualState::Highlighted);
        assert_eq!(first.text, "x");
        assert_eq!(first.font_px, 14);
        let hole = frame.element(1).unwrap();
        assert_eq!(hole.state, VisualState::Empty);
        assert_eq!(hole.text, HOLE_TEXT);
        assert_eq!(hole.font_px, 12);
        assert!(frame.sentinel.is_none());
        assert!(frame.connectors.is_empty());
    }

    #[test]
    fn slot_labels_sit_above_and_clip() {
        let array = SlotArray::new();
        let frame = frame_for(&array, Size::new(800, 400), &AnimationState::IDLE);
        let e = frame.element(2).unwrap();
        assert_eq!(e.label, "2");
        let r = e.label_rect.unwrap();
        assert_eq!((r.y, r.height), (e.base_rect.y - 18, 15));

        // On a very short canvas the margins shrink and the label would
        // start above the canvas.
        let cramped = frame_for(&array, Size::new(400, 20), &AnimationState::IDLE);
        assert!(cramped.element(0).unwrap().label_rect.is_none());
    }

    #[test]
    fn animated_element_is_lifted_but_hit_tested_in_place() {
        let array = SlotArray::new();
        let anim = AnimationState {
            active_index: Some(1),
            progress: 0.5,
            running: true,
            elapsed: std::time::Duration::from_millis(100),
        };
        let frame = frame_for(&array, Size::new(800, 400), &anim);
        let e = frame.element(1).unwrap();
        assert_eq!(e.rect, e.base_rect.translate(0, -10));
        let other = frame.element(0).unwrap();
        assert_eq!(other.rect, other.base_rect);
    }

    #[test]
    fn chain_connectors_follow_rows() {
        let mut chain = NodeChain::new();
        chain.initialize_len(6);
        let frame = frame_for(&chain, Size::new(400, 300), &AnimationState::IDLE);

        let head = frame.sentinel.as_ref().unwrap();
        assert_eq!(head.rect, Rect::new(20, 20, 120, 66));
        assert_eq!(head.text, "head");
        assert_eq!(frame.connectors.len(), 6);

        // First node sits on the next row: head arrow goes down.
        let c0 = frame.connectors[0];
        assert_eq!(c0.kind, ConnectorKind::Down);
        assert_eq!(c0.from, Point::new(80, 86));
        assert_eq!(c0.to, Point::new(105, 106));

        // Two columns: 0->1 horizontal, 1->2 crosses rows.
        let c1 = frame.connectors[1];
        assert_eq!(c1.kind, ConnectorKind::Horizontal);
        assert_eq!(c1.from, Point::new(165, 139));
        assert_eq!(c1.to, Point::new(195, 139));
        let c2 = frame.connectors[2];
        assert_eq!(c2.kind, ConnectorKind::Down);
        assert_eq!(c2.from, Point::new(265, 172));
        assert_eq!(c2.to, Point::new(265, 202));

        let labels: Vec<_> = frame.elements.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["[0]", "[1]", "[2]", "[3]", "[4]", "[5]"]);
        assert!(frame.elements.iter().all(|e| e.font_px == 12));
    }

    #[test]
    fn head_arrow_is_horizontal_when_first_node_shares_the_row() {
        let mut layout = LayoutFrame::initial(&PackerConfig::chain());
        layout.positions = vec![Point::new(200, 20)];
        let elements = vec![ElementView {
            index: 0,
            value: "a".into(),
            occupied: true,
            highlighted: false,
        }];
        let frame = derive_frame(&FrameInput {
            kind: StructureKind::Chain,
            canvas: Size::new(600, 200),
            layout: &layout,
            elements: &elements,
            animation: &AnimationState::IDLE,
            bump_height: 10.0,
            palette: &Palette::default(),
        });
        let c = frame.connectors[0];
        assert_eq!(c.kind, ConnectorKind::Horizontal);
        assert_eq!(c.from, Point::new(120, 50));
        assert_eq!(c.to, Point::new(160, 50));
    }

    #[test]
    fn empty_chain_shows_only_sentinel() {
        let chain = NodeChain::new();
        let frame = frame_for(&chain, Size::new(400, 300), &AnimationState::IDLE);
        assert!(frame.elements.is_empty());
        assert!(frame.connectors.is_empty());
        assert!(frame.sentinel.is_some());
    }

    #[test]
    fn stale_layout_draws_no_phantom_arrow() {
        // An emptied chain keeps the previous layout around.
        let layout = pack(Size::new(400, 300), 3, &PackerConfig::chain()).unwrap();
        let frame = derive_frame(&FrameInput {
            kind: StructureKind::Chain,
            canvas: Size::new(400, 300),
            layout: &layout,
            elements: &[],
            animation: &AnimationState::IDLE,
            bump_height: 10.0,
            palette: &Palette::default(),
        });
        assert!(frame.elements.is_empty());
        assert!(frame.connectors.is_empty());
    }
}
