#![forbid(unsafe_code)]

use linviz_core::{Point, Rect, Size, StructureKind};

use crate::config::PackerConfig;

/// How a frame was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackStrategy {
    /// Placeholder metrics, nothing packed yet.
    Initial,
    /// A candidate from the search space qualified.
    Searched,
    /// Nothing qualified; minimum-size fallback.
    Fallback,
}

/// Derived placement of every element of a structure.
///
/// Never authoritative: recomputed whenever the canvas or the element count
/// changes.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    pub kind: StructureKind,
    /// Canvas the frame was packed for.
    pub canvas: Size,
    /// Size shared by every element (and the sentinel).
    pub element: Size,
    /// Horizontal gap between column units.
    pub spacing: i32,
    /// Arrow length after each chain node; zero for slots.
    pub connector: i32,
    pub columns: usize,
    pub rows: usize,
    /// Vertical distance between the bottom of one row and the top of the next.
    pub row_gap: i32,
    /// Top-left corner of element `i`, row-major.
    pub positions: Vec<Point>,
    /// Top-left corner of the sentinel head (chains only).
    pub sentinel: Option<Point>,
    pub strategy: PackStrategy,
}

impl LayoutFrame {
    /// Frame used before the first successful pack.
    pub fn initial(config: &PackerConfig) -> Self {
        let sentinel = config
            .kind
            .caps()
            .contains(linviz_core::KindCaps::SENTINEL)
            .then(|| Point::new(config.margin_x, config.margin_y));
        Self {
            kind: config.kind,
            canvas: Size::default(),
            element: config.initial_element,
            spacing: config.initial_spacing,
            connector: config.initial_connector,
            columns: 1,
            rows: 1,
            row_gap: config.row_gap,
            positions: Vec::new(),
            sentinel,
            strategy: PackStrategy::Initial,
        }
    }

    /// Number of placed elements.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Box of element `index`, if it was placed.
    pub fn rect(&self, index: usize) -> Option<Rect> {
        self.positions
            .get(index)
            .map(|origin| Rect::at(*origin, self.element))
    }

    /// Box of the sentinel head, for chains.
    pub fn sentinel_rect(&self) -> Option<Rect> {
        self.sentinel.map(|origin| Rect::at(origin, self.element))
    }

    /// Grid row of element `index`.
    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns.max(1)
    }
}
