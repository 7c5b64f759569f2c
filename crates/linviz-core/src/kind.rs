#![forbid(unsafe_code)]

//! The two structure topologies and what each one can do.

use bitflags::bitflags;

bitflags! {
    /// Capabilities that differ between structure kinds.
    ///
    /// Layout, animation and rendering are written once and branch on these
    /// flags instead of on the concrete store type.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindCaps: u8 {
        /// Fixed positions; deletes leave holes that inserts may refill.
        const SLOT_BASED = 0b0000_0001;
        /// Dense chain; deletes relink and renumber successors.
        const CHAIN_BASED = 0b0000_0010;
        /// A non-data head node is laid out and drawn above the grid.
        const SENTINEL = 0b0000_0100;
        /// Consecutive elements are joined by arrows.
        const CONNECTORS = 0b0000_1000;
        /// Capacity is bounded (see [`StructureKind::max_len`]).
        const BOUNDED = 0b0001_0000;
    }
}

/// Which linear structure a view holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    /// Fixed-capacity slot array with holes.
    Slots,
    /// Singly linked list with a sentinel head.
    Chain,
}

impl StructureKind {
    /// Largest slot array capacity.
    pub const MAX_SLOTS: usize = 30;

    /// Capacity used when a slot array is initialized with a non-positive size.
    pub const DEFAULT_SLOTS: usize = 5;

    /// Capability set of this kind.
    pub const fn caps(self) -> KindCaps {
        match self {
            Self::Slots => KindCaps::SLOT_BASED.union(KindCaps::BOUNDED),
            Self::Chain => KindCaps::CHAIN_BASED
                .union(KindCaps::SENTINEL)
                .union(KindCaps::CONNECTORS),
        }
    }

    /// Upper bound on the number of elements, if any.
    pub fn max_len(self) -> Option<usize> {
        self.caps()
            .contains(KindCaps::BOUNDED)
            .then_some(Self::MAX_SLOTS)
    }

    /// Short label for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Slots => "slots",
            Self::Chain => "chain",
        }
    }
}

impl std::fmt::Display for StructureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
