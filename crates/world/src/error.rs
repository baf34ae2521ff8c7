//! Error taxonomy of the overlay engine.
//!
//! Fertilizer denials are not errors; see [`crate::Denied`].

use overgrow_core::{MechanicKind, PositionKey};
use thiserror::Error;

/// Failures of overlay mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// `put` found an existing record; callers must `remove` first.
    #[error("{existing} record already present at {key}")]
    Conflict {
        key: PositionKey,
        existing: MechanicKind,
    },
    /// `mutate` found no record to update.
    #[error("no record at {key}")]
    NotFound { key: PositionKey },
}

/// Failures of the crop state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GrowthError {
    /// Growth only moves forward.
    #[error("growth delta must not be negative, got {0}")]
    InvalidDelta(i32),
}

/// Failures while taking fertilizer out of a dispenser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispenseError {
    /// The slot index is outside the dispenser inventory.
    #[error("dispenser slot {slot} does not exist")]
    InvalidSlot { slot: usize },
}
