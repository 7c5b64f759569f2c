#![forbid(unsafe_code)]

//! Authoritative element storage for the two visualized structures.
//!
//! Every mutation is split in two. The immediate half (highlight, hole fill,
//! splice and renumber) runs inside the call. The deferred half is handed
//! back as a [`DeferredCommit`] for the caller to schedule and later feed to
//! [`Structure::apply`].
//!
//! - [`SlotArray`]: bounded run of slots, holes left in place on delete.
//! - [`NodeChain`]: singly linked chain behind a sentinel head, nodes kept in
//!   a generational arena.

pub mod chain;
pub mod slots;

use std::fmt;

use linviz_core::{MutationError, StructureKind};

pub use chain::{ChainCommit, Node, NodeChain, NodeId};
pub use slots::{Slot, SlotArray, SlotCommit};

/// Which delay the scheduler should use for a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitTiming {
    /// Clears the highlight of an element that is already in place (inserts).
    Settle,
    /// Applies a structural or value change (deletes and modifies).
    Apply,
}

/// Deferred half of a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredCommit<C> {
    /// Position the animation sweep should target.
    pub anim_index: usize,
    pub commit: C,
    pub timing: CommitTiming,
}

/// Read-only view of one laid-out element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementView {
    /// Slot position or node rank.
    pub index: usize,
    /// Stored value; empty for holes.
    pub value: String,
    pub occupied: bool,
    pub highlighted: bool,
}

/// Behavior shared by both structure kinds.
pub trait Structure {
    const KIND: StructureKind;

    /// Deferred change produced by a mutation.
    type Commit: Clone + fmt::Debug;

    /// Reset to `len` default elements.
    fn initialize_len(&mut self, len: isize);

    /// Reset to the given values, in order.
    fn initialize_values<V: AsRef<str>>(&mut self, values: &[V]);

    /// Insert `value` after `after` (`-1` for the front, `>= size` to append).
    fn insert(
        &mut self,
        after: isize,
        value: String,
    ) -> Result<DeferredCommit<Self::Commit>, MutationError>;

    fn delete(&mut self, index: isize) -> Result<DeferredCommit<Self::Commit>, MutationError>;

    fn modify(
        &mut self,
        index: isize,
        value: String,
    ) -> Result<DeferredCommit<Self::Commit>, MutationError>;

    /// Run a deferred commit. Returns `false` when its target no longer
    /// exists and nothing changed.
    fn apply(&mut self, commit: Self::Commit) -> bool;

    /// Stored values in order, holes omitted.
    fn values(&self) -> Vec<String>;

    /// Slot capacity, or number of data nodes.
    fn size(&self) -> usize;

    /// Number of boxes the layout has to place (sentinel excluded).
    fn layout_count(&self) -> usize;

    /// Every laid-out element in layout order.
    fn elements(&self) -> Vec<ElementView>;
}

/// Resolve a signed index against `len`.
pub(crate) fn checked_index(index: isize, len: usize) -> Result<usize, MutationError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or(MutationError::InvalidIndex { index, len })
}
