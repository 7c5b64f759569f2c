#![forbid(unsafe_code)]

use linviz_core::{Size, StructureKind};

/// Candidate connector lengths for chain layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectorRange {
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

/// Search bounds and fixed spacing for one structure kind.
///
/// All values are canvas units.
#[derive(Debug, Clone, PartialEq)]
pub struct PackerConfig {
    pub kind: StructureKind,
    /// Narrowest element the search may pick.
    pub min_width: i32,
    /// Widest element; the search starts here.
    pub max_width: i32,
    /// Decrement between candidate widths.
    pub width_step: i32,
    /// Derived heights outside `min_height..=max_height` reject a candidate.
    pub min_height: i32,
    pub max_height: i32,
    pub min_spacing: i32,
    pub max_spacing: i32,
    pub spacing_step: i32,
    /// Chains only: the arrow length searched between width and spacing.
    pub connector: Option<ConnectorRange>,
    /// Vertical gap between rows, reserved for index labels (and arrows).
    pub row_gap: i32,
    pub margin_x: i32,
    pub margin_y: i32,
    /// Chains only: distance between the sentinel row and the first grid row.
    pub sentinel_gap: i32,
    /// Element size reported before the first successful pack.
    pub initial_element: Size,
    pub initial_spacing: i32,
    pub initial_connector: i32,
}

impl PackerConfig {
    /// Defaults for the slot array.
    pub fn slots() -> Self {
        Self {
            kind: StructureKind::Slots,
            min_width: 50,
            max_width: 120,
            width_step: 5,
            min_height: 50,
            max_height: 80,
            min_spacing: 5,
            max_spacing: 15,
            spacing_step: 2,
            connector: None,
            row_gap: 25,
            margin_x: 20,
            margin_y: 20,
            sentinel_gap: 0,
            initial_element: Size::new(80, 60),
            initial_spacing: 10,
            initial_connector: 0,
        }
    }

    /// Defaults for the linked list.
    pub fn chain() -> Self {
        Self {
            kind: StructureKind::Chain,
            min_width: 60,
            max_width: 120,
            width_step: 5,
            min_height: 50,
            max_height: 80,
            min_spacing: 10,
            max_spacing: 20,
            spacing_step: 2,
            connector: Some(ConnectorRange {
                min: 30,
                max: 50,
                step: 5,
            }),
            row_gap: 30,
            margin_x: 20,
            margin_y: 20,
            sentinel_gap: 20,
            initial_element: Size::new(100, 60),
            initial_spacing: 20,
            initial_connector: 40,
        }
    }

    pub fn for_kind(kind: StructureKind) -> Self {
        match kind {
            StructureKind::Slots => Self::slots(),
            StructureKind::Chain => Self::chain(),
        }
    }

    /// Set the element width search range (builder).
    #[must_use]
    pub fn widths(mut self, min: i32, max: i32) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    /// Set the accepted element height band (builder).
    #[must_use]
    pub fn heights(mut self, min: i32, max: i32) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Set both margins (builder).
    #[must_use]
    pub fn margins(mut self, x: i32, y: i32) -> Self {
        self.margin_x = x;
        self.margin_y = y;
        self
    }

    /// Set the row gap (builder).
    #[must_use]
    pub fn row_gap(mut self, gap: i32) -> Self {
        self.row_gap = gap;
        self
    }

    /// Shortest connector, or zero for kinds without connectors.
    pub fn min_connector(&self) -> i32 {
        self.connector.map_or(0, |c| c.min)
    }

    /// Candidate widths in search order (widest first).
    pub(crate) fn width_candidates(&self) -> impl Iterator<Item = i32> + use<> {
        descending(self.max_width, self.min_width, self.width_step)
    }

    /// Candidate connector lengths in search order (shortest first).
    pub(crate) fn connector_candidates(&self) -> Vec<i32> {
        match self.connector {
            Some(range) => ascending(range.min, range.max, range.step).collect(),
            None => vec![0],
        }
    }

    /// Candidate spacings in search order (tightest first).
    pub(crate) fn spacing_candidates(&self) -> impl Iterator<Item = i32> + use<> {
        ascending(self.min_spacing, self.max_spacing, self.spacing_step)
    }
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self::slots()
    }
}

fn ascending(from: i32, to: i32, step: i32) -> impl Iterator<Item = i32> {
    let step = step.max(1);
    std::iter::successors(Some(from), move |v| v.checked_add(step)).take_while(move |v| *v <= to)
}

fn descending(from: i32, to: i32, step: i32) -> impl Iterator<Item = i32> {
    let step = step.max(1);
    std::iter::successors(Some(from), move |v| v.checked_sub(step)).take_while(move |v| *v >= to)
}
