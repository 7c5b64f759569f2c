#![forbid(unsafe_code)]

//! Bounded slot array.
//!
//! A slot keeps its position for its whole life: deleting clears it and
//! leaves a hole, which a later insert may fill in place. Capacity grows by
//! one on an insert that finds no hole, up to [`StructureKind::MAX_SLOTS`].
//!
//! Commits address slots by position. An insert that grows the array between
//! a mutation and its commit shifts later slots, so the commit lands on
//! whatever now sits at that position. Callers that need strict ordering
//! serialize their edits or flush pending commits first.

use linviz_core::{MutationError, StructureKind};

use crate::{CommitTiming, DeferredCommit, ElementView, Structure, checked_index};

/// One cell of the array.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    value: String,
    occupied: bool,
    highlighted: bool,
}

impl Slot {
    fn filled(value: String) -> Self {
        Self {
            value,
            occupied: true,
            highlighted: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Deferred half of a slot mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotCommit {
    /// Drop the highlight of a freshly inserted value.
    Settle { position: usize },
    /// Empty the slot.
    Clear { position: usize },
    /// Store a new value.
    Replace { position: usize, value: String },
}

impl SlotCommit {
    pub fn position(&self) -> usize {
        match self {
            Self::Settle { position } | Self::Clear { position } | Self::Replace { position, .. } => {
                *position
            }
        }
    }
}

/// Array of up to [`StructureKind::MAX_SLOTS`] slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotArray {
    slots: Vec<Slot>,
}

impl Default for SlotArray {
    fn default() -> Self {
        Self::new()
    }
}

impl SlotArray {
    /// Array of [`StructureKind::DEFAULT_SLOTS`] empty slots.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::default(); StructureKind::DEFAULT_SLOTS],
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, position: usize) -> Option<&Slot> {
        self.slots.get(position)
    }

    /// Number of slots holding a value.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied).count()
    }

    /// Most slots the array may hold.
    pub fn capacity() -> usize {
        Self::KIND.max_len().unwrap_or(usize::MAX)
    }

    fn clamp_len(len: isize) -> usize {
        if len <= 0 {
            StructureKind::DEFAULT_SLOTS
        } else {
            (len as usize).min(Self::capacity())
        }
    }

    /// Slot position targeted by an insert after `after`, and whether that
    /// slot is a hole to fill in place.
    fn resolve_insert(&self, after: isize) -> Result<(usize, bool), MutationError> {
        let len = self.slots.len();
        let position = match after {
            i if i < -1 => {
                return Err(MutationError::InvalidIndex { index: after, len });
            }
            -1 => 0,
            i if i as usize >= len => return Ok((len, false)),
            i => i as usize + 1,
        };
        let hole = self.slots.get(position).is_some_and(|s| !s.occupied);
        Ok((position, hole))
    }

    fn occupied_at(&self, index: isize) -> Result<usize, MutationError> {
        let position = checked_index(index, self.slots.len())?;
        if !self.slots[position].occupied {
            return Err(MutationError::OccupiedConflict { index: position });
        }
        Ok(position)
    }
}

impl Structure for SlotArray {
    const KIND: StructureKind = StructureKind::Slots;
    type Commit = SlotCommit;

    fn initialize_len(&mut self, len: isize) {
        let len = Self::clamp_len(len);
        self.slots.clear();
        self.slots.resize(len, Slot::default());
        linviz_core::debug!(len, "slot array initialized");
    }

    fn initialize_values<V: AsRef<str>>(&mut self, values: &[V]) {
        let len = Self::clamp_len(values.len() as isize);
        self.slots = values
            .iter()
            .take(len)
            .map(|v| Slot::filled(v.as_ref().to_owned()))
            .collect();
        self.slots.resize(len, Slot::default());
        linviz_core::debug!(len, occupied = self.occupied_count(), "slot array initialized");
    }

    fn insert(
        &mut self,
        after: isize,
        value: String,
    ) -> Result<DeferredCommit<SlotCommit>, MutationError> {
        let (position, hole) = self.resolve_insert(after)?;
        if hole {
            let slot = &mut self.slots[position];
            slot.value = value;
            slot.occupied = true;
            slot.highlighted = true;
        } else {
            let capacity = Self::capacity();
            if self.slots.len() >= capacity {
                return Err(MutationError::CapacityExceeded { capacity });
            }
            let mut slot = Slot::filled(value);
            slot.highlighted = true;
            self.slots.insert(position, slot);
        }
        linviz_core::trace!(position, hole, len = self.slots.len(), "slot inserted");
        Ok(DeferredCommit {
            anim_index: position,
            commit: SlotCommit::Settle { position },
            timing: CommitTiming::Settle,
        })
    }

    fn delete(&mut self, index: isize) -> Result<DeferredCommit<SlotCommit>, MutationError> {
        let position = self.occupied_at(index)?;
        self.slots[position].highlighted = true;
        Ok(DeferredCommit {
            anim_index: position,
            commit: SlotCommit::Clear { position },
            timing: CommitTiming::Apply,
        })
    }

    fn modify(
        &mut self,
        index: isize,
        value: String,
    ) -> Result<DeferredCommit<SlotCommit>, MutationError> {
        let position = self.occupied_at(index)?;
        self.slots[position].highlighted = true;
        Ok(DeferredCommit {
            anim_index: position,
            commit: SlotCommit::Replace { position, value },
            timing: CommitTiming::Apply,
        })
    }

    fn apply(&mut self, commit: SlotCommit) -> bool {
        let position = commit.position();
        if position >= self.slots.len() {
            linviz_core::warn!(?commit, len = self.slots.len(), "dropping commit for missing slot");
            return false;
        }
        let slot = &mut self.slots[position];
        match commit {
            SlotCommit::Settle { .. } => {}
            SlotCommit::Clear { .. } => {
                slot.value.clear();
                slot.occupied = false;
            }
            SlotCommit::Replace { value, .. } => slot.value = value,
        }
        slot.highlighted = false;
        true
    }

    fn values(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|s| s.occupied)
            .map(|s| s.value.clone())
            .collect()
    }

    fn size(&self) -> usize {
        self.slots.len()
    }

    fn layout_count(&self) -> usize {
        self.slots.len()
    }

    fn elements(&self) -> Vec<ElementView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, s)| ElementView {
                index,
                value: s.value.clone(),
                occupied: s.occupied,
                highlighted: s.highlighted,
            })
            .collect()
    }
}
