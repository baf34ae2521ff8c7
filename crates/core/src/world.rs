//! World identifiers.
//!
//! The host loads and unloads worlds at runtime, so a world is named by an
//! opaque number the host assigns rather than a fixed set of variants. Every
//! overlay operation is scoped by one of these.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier for a loaded host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(u32);

impl WorldId {
    /// Wrap the host's numeric world handle.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Numeric representation used in logs and snapshots.
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "world#{}", self.0)
    }
}
