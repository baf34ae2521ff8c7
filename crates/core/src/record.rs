//! Overlay records for custom mechanics.
//!
//! One [`BlockStateRecord`] exists per overlay position. Consumers dispatch on
//! the variant with an exhaustive `match`, so adding a mechanic kind forces
//! every consumer to be revisited.

use crate::registry::RegistryKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mechanic kind tag of a record, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MechanicKind {
    /// A growing crop.
    Crop,
    /// A pot (soil block) that crops grow on.
    Pot,
    /// A sprinkler that waters nearby pots.
    Sprinkler,
    /// Greenhouse glass that shelters crops below it.
    GreenhouseGlass,
}

impl MechanicKind {
    /// Canonical lowercase name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            MechanicKind::Crop => "crop",
            MechanicKind::Pot => "pot",
            MechanicKind::Sprinkler => "sprinkler",
            MechanicKind::GreenhouseGlass => "greenhouse_glass",
        }
    }
}

impl fmt::Display for MechanicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-position state of a custom mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockStateRecord {
    /// Crop growth state.
    Crop(CropState),
    /// Pot water and fertilizer state.
    Pot(PotState),
    /// Sprinkler water reserve.
    Sprinkler(SprinklerState),
    /// Greenhouse glass marker.
    GreenhouseGlass(GlassState),
}

impl BlockStateRecord {
    /// The mechanic kind of this record.
    pub fn kind(&self) -> MechanicKind {
        match self {
            BlockStateRecord::Crop(_) => MechanicKind::Crop,
            BlockStateRecord::Pot(_) => MechanicKind::Pot,
            BlockStateRecord::Sprinkler(_) => MechanicKind::Sprinkler,
            BlockStateRecord::GreenhouseGlass(_) => MechanicKind::GreenhouseGlass,
        }
    }

    /// The definition this record was placed from.
    pub fn config_id(&self) -> &RegistryKey {
        match self {
            BlockStateRecord::Crop(state) => &state.config_id,
            BlockStateRecord::Pot(state) => &state.config_id,
            BlockStateRecord::Sprinkler(state) => &state.config_id,
            BlockStateRecord::GreenhouseGlass(state) => &state.config_id,
        }
    }

    /// Crop payload, if this is a crop.
    pub fn as_crop(&self) -> Option<&CropState> {
        match self {
            BlockStateRecord::Crop(state) => Some(state),
            BlockStateRecord::Pot(_)
            | BlockStateRecord::Sprinkler(_)
            | BlockStateRecord::GreenhouseGlass(_) => None,
        }
    }

    /// Returns true for crop records.
    pub fn is_crop(&self) -> bool {
        self.as_crop().is_some()
    }
}

/// Growth state of a crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropState {
    /// Crop definition id.
    pub config_id: RegistryKey,
    /// Accumulated growth points, always within `[0, max_points]`.
    pub point: u32,
}

impl CropState {
    /// A freshly planted crop with zero points.
    pub fn planted(config_id: RegistryKey) -> Self {
        Self {
            config_id,
            point: 0,
        }
    }
}

/// Fertilizer families a pot can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FertilizerKind {
    /// Raises the chance of higher-quality produce.
    QualityCrop,
    /// Adds extra growth points per growth tick.
    SpeedGrow,
    /// Slows water loss.
    SoilRetain,
    /// Increases produce count.
    YieldIncrease,
    /// Chance of a variant crop on harvest.
    Variation,
}

/// Water and fertilizer state of a pot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotState {
    /// Pot definition id.
    pub config_id: RegistryKey,
    /// Stored water units.
    pub water_level: u32,
    /// Applied fertilizer, if any.
    #[serde(default)]
    pub fertilizer: Option<FertilizerKind>,
}

/// Remaining water reserve of a sprinkler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprinklerState {
    /// Sprinkler definition id.
    pub config_id: RegistryKey,
    /// Number of watering cycles left before it runs dry.
    pub remaining_uses: u32,
}

/// Marker state for a greenhouse glass block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlassState {
    /// Glass item id the block was placed from.
    pub config_id: RegistryKey,
}
