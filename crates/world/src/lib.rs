//! Authoritative custom-block overlay and crop growth engine.

mod definitions;
mod dispenser;
mod error;
mod fertilizer;
mod growth;
mod host;
mod overlay;
mod reconciler;

pub use definitions::*;
pub use dispenser::*;
pub use error::*;
pub use fertilizer::*;
pub use growth::*;
pub use host::*;
pub use overlay::*;
pub use reconciler::*;
