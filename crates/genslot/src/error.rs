//! Slotmap error types.

use std::error::Error;
use std::fmt;

/// The one recoverable error condition a slotmap can raise.
///
/// Every other failure mode described in spec.md §7 (an invalid handle, an
/// out-of-bounds index, a payload reference from a different slotmap) is a
/// contract violation, not a runtime error: those are caught by
/// `debug_assert!`s at the call site, never by this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotMapError {
    /// `alloc` could not satisfy the request: the slotmap is at capacity and
    /// either growth is disabled or `capacity == INDEX_MAX` for the chosen
    /// handle width.
    OutOfSlots {
        /// Capacity at the time of the failed allocation.
        capacity: u64,
    },
}

impl fmt::Display for SlotMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSlots { capacity } => {
                write!(f, "out of slots: capacity {capacity} exhausted")
            }
        }
    }
}

impl Error for SlotMapError {}
