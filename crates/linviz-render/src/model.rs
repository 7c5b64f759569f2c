#![forbid(unsafe_code)]

//! Frame types and hit testing.

use linviz_core::{Point, Rect, Size, StructureKind};

use crate::palette::StateStyle;

/// How an element is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Hole in a slot array.
    Empty,
    /// Target of an in-flight mutation.
    Highlighted,
    Normal,
    /// Chain head.
    Sentinel,
}

/// One drawable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSprite {
    /// Slot position or node rank.
    pub index: usize,
    /// Box as drawn, including the animation offset.
    pub rect: Rect,
    /// Box from the layout, used for hit testing.
    pub base_rect: Rect,
    /// Text centered in the box.
    pub text: String,
    pub state: VisualState,
    pub style: StateStyle,
    pub font_px: i32,
    /// Index label above the box.
    pub label: String,
    /// Where the label goes. `None` when it would fall outside the canvas.
    pub label_rect: Option<Rect>,
}

/// The chain head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentinelSprite {
    pub rect: Rect,
    pub text: String,
    pub style: StateStyle,
    pub font_px: i32,
}

/// Direction of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// Left to right within a row.
    Horizontal,
    /// Downward, between rows.
    Down,
}

/// Arrow between two chain boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    pub from: Point,
    /// Arrow tip.
    pub to: Point,
    pub kind: ConnectorKind,
}

/// Arrow head size along and across the shaft.
pub const ARROW_LENGTH: i32 = 8;
pub const ARROW_HALF_WIDTH: i32 = 4;

impl Connector {
    pub const fn horizontal(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            kind: ConnectorKind::Horizontal,
        }
    }

    pub const fn down(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            kind: ConnectorKind::Down,
        }
    }

    /// Triangle of the arrow head: tip first.
    pub fn arrow_head(&self) -> [Point; 3] {
        let tip = self.to;
        match self.kind {
            ConnectorKind::Horizontal => [
                tip,
                tip.offset(-ARROW_LENGTH, -ARROW_HALF_WIDTH),
                tip.offset(-ARROW_LENGTH, ARROW_HALF_WIDTH),
            ],
            ConnectorKind::Down => [
                tip,
                tip.offset(-ARROW_HALF_WIDTH, -ARROW_LENGTH),
                tip.offset(ARROW_HALF_WIDTH, -ARROW_LENGTH),
            ],
        }
    }
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// A data element.
    Element(usize),
    /// An empty slot.
    Hole(usize),
    Sentinel,
    Nothing,
}

/// Everything needed to draw one structure.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub kind: StructureKind,
    pub canvas: Size,
    pub elements: Vec<ElementSprite>,
    pub sentinel: Option<SentinelSprite>,
    /// Chain arrows, sentinel-to-first first.
    pub connectors: Vec<Connector>,
}

impl RenderFrame {
    /// A frame with nothing in it.
    pub fn empty(kind: StructureKind, canvas: Size) -> Self {
        Self {
            kind,
            canvas,
            elements: Vec::new(),
            sentinel: None,
            connectors: Vec::new(),
        }
    }

    /// Sprite of element `index`.
    pub fn element(&self, index: usize) -> Option<&ElementSprite> {
        self.elements.iter().find(|e| e.index == index)
    }

    /// Currently highlighted elements.
    pub fn highlighted(&self) -> impl Iterator<Item = &ElementSprite> {
        self.elements
            .iter()
            .filter(|e| e.state == VisualState::Highlighted)
    }

    /// Resolve a point against the un-animated boxes.
    pub fn hit_test(&self, point: Point) -> HitTarget {
        if self
            .sentinel
            .as_ref()
            .is_some_and(|s| s.rect.contains(point))
        {
            return HitTarget::Sentinel;
        }
        match self.elements.iter().find(|e| e.base_rect.contains(point)) {
            Some(e) if e.state == VisualState::Empty => HitTarget::Hole(e.index),
            Some(e) => HitTarget::Element(e.index),
            None => HitTarget::Nothing,
        }
    }
}
