//! Crop growth state machine.
//!
//! Translates accumulated points into the active growth stage and applies
//! point deltas. A delta reports every stage whose threshold it crossed, in
//! ascending order, so per-stage actions fire exactly once per boundary even
//! when a single large delta skips several stages.

use crate::error::GrowthError;
use overgrow_core::{CropDefinition, CropState, StageDefinition};

/// Result of applying a growth delta to a crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthStep<'d> {
    /// Point count before the delta.
    pub previous_point: u32,
    /// Updated crop state; persist it through the overlay.
    pub record: CropState,
    /// Stages whose thresholds were crossed, in growth order.
    pub crossed: Vec<&'d StageDefinition>,
}

impl GrowthStep<'_> {
    /// Returns true when the point count changed.
    pub fn changed(&self) -> bool {
        self.record.point != self.previous_point
    }
}

/// Index of the active stage: the greatest threshold not above `point`.
///
/// Monotonic in `point` because thresholds are strictly increasing.
pub fn stage_index_for(definition: &CropDefinition, point: u32) -> usize {
    definition
        .stages()
        .partition_point(|stage| stage.threshold() <= point)
        .saturating_sub(1)
}

/// Active stage at `point`.
pub fn active_stage(definition: &CropDefinition, point: u32) -> &StageDefinition {
    &definition.stages()[stage_index_for(definition, point)]
}

/// Index of the stage whose model is displayed at `point`.
///
/// Model-less stages are transparent: they resolve to the nearest prior
/// model-bearing stage. Before the first model-bearing stage is reached the
/// crop shows the first model it will grow into.
pub fn visual_stage_index_for(definition: &CropDefinition, point: u32) -> usize {
    let stages = definition.stages();
    let active = stage_index_for(definition, point);
    stages[..=active]
        .iter()
        .rposition(StageDefinition::has_model)
        .or_else(|| {
            stages[active + 1..]
                .iter()
                .position(StageDefinition::has_model)
                .map(|offset| active + 1 + offset)
        })
        .unwrap_or(active)
}

/// Stage whose model is displayed at `point`.
pub fn visual_stage_for(point: u32, definition: &CropDefinition) -> &StageDefinition {
    &definition.stages()[visual_stage_index_for(definition, point)]
}

/// Returns true when moving from `old_point` to `new_point` changes the displayed model.
pub fn needs_appearance_swap(definition: &CropDefinition, old_point: u32, new_point: u32) -> bool {
    visual_stage_index_for(definition, old_point) != visual_stage_index_for(definition, new_point)
}

/// Apply a signed growth delta.
///
/// Negative deltas are rejected without touching the record; shrinking is not
/// a growth path. A zero delta returns the record unchanged with no crossed stages.
pub fn apply_growth_delta<'d>(
    record: &CropState,
    definition: &'d CropDefinition,
    delta: i32,
) -> Result<GrowthStep<'d>, GrowthError> {
    let delta = u32::try_from(delta).map_err(|_| GrowthError::InvalidDelta(delta))?;
    Ok(grow_by(record, definition, delta))
}

/// Apply a non-negative growth delta, clamping at the crop's `max_points`.
pub fn grow_by<'d>(
    record: &CropState,
    definition: &'d CropDefinition,
    delta: u32,
) -> GrowthStep<'d> {
    let max_points = definition.max_points();
    let previous_point = record.point.min(max_points);
    let point = previous_point.saturating_add(delta).min(max_points);

    let crossed = definition
        .stages()
        .iter()
        .filter(|stage| stage.threshold() > previous_point && stage.threshold() <= point)
        .collect();

    GrowthStep {
        previous_point,
        record: CropState {
            config_id: record.config_id.clone(),
            point,
        },
        crossed,
    }
}
