//! Custom crop, pot and sprinkler blocks layered over a host voxel world.
//!
//! The host stays authoritative for vanilla blocks; this crate tracks the
//! custom state next to it and tells the host which of its own mutations to
//! cancel so the two never drift apart.

pub mod config;
pub mod engine;
pub mod logging;

pub use config::OvergrowConfig;
pub use engine::OvergrowEngine;
pub use overgrow_core::*;
pub use overgrow_world::*;
