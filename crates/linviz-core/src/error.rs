#![forbid(unsafe_code)]

//! Expected mutation failures.

use std::fmt;

/// Why a mutation was rejected.
///
/// These are ordinary outcomes of user input, not faults: a rejected
/// mutation leaves the structure, its layout and its animation untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// Index (or insert anchor) outside the legal range for the operation.
    InvalidIndex {
        /// The index that was asked for.
        index: isize,
        /// Number of addressable elements at the time of the call.
        len: usize,
    },
    /// Slot array is already at its maximum capacity and has no hole to fill.
    CapacityExceeded {
        capacity: usize,
    },
    /// Delete or modify aimed at an empty slot.
    OccupiedConflict {
        index: usize,
    },
    /// Delete or modify on a chain with no data nodes.
    EmptyStructure,
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIndex { index, len } => {
                write!(f, "index {index} is out of range for {len} elements")
            }
            Self::CapacityExceeded { capacity } => {
                write!(f, "capacity of {capacity} slots reached and no empty slot to fill")
            }
            Self::OccupiedConflict { index } => write!(f, "slot {index} is empty"),
            Self::EmptyStructure => f.write_str("the list has no elements"),
        }
    }
}

impl std::error::Error for MutationError {}
