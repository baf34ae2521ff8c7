#![warn(missing_docs)]
//! Value types shared by the overlay engine and its collaborators.
//!
//! Nothing in this crate touches the host world. Positions, records and
//! mechanic definitions are plain data that the `overgrow-world` engine
//! reads and mutates.

pub mod definition;
pub mod item;
pub mod position;
pub mod record;
pub mod registry;
pub mod world;

pub use definition::{
    ActionSet, BoneMealRule, CropDefinition, DefinitionError, PotDefinition, RangeOrConstant,
    SprinklerDefinition, StageDefinition, Stimulus,
};
pub use item::ItemStack;
pub use position::{BlockPos, Facing, FurnitureRotation, PositionKey};
pub use record::{
    BlockStateRecord, CropState, FertilizerKind, GlassState, MechanicKind, PotState,
    SprinklerState,
};
pub use registry::{RegistryKey, RegistryKeyError};
pub use world::WorldId;
