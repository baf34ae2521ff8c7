//! Fertilizer ("bone meal") dispatch.
//!
//! Dispatch checks, in order: the position holds a crop record, the crop has a
//! known definition, the crop is below its point ceiling, some rule accepts the
//! stimulus and item (first match in declaration order wins), and the veto hook
//! does not object. Only then is the point delta rolled, exactly once.

use crate::growth::{grow_by, needs_appearance_swap, visual_stage_for};
use crate::host::{
    ActionContext, Actor, DefinitionSource, FertilizeAttempt, HostDecision, HostServices,
};
use crate::overlay::BlockStateOverlay;
use overgrow_core::{
    BlockPos, BlockStateRecord, BoneMealRule, CropDefinition, CropState, FurnitureRotation,
    Stimulus, WorldId,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use tracing::{debug, warn};

/// Why a fertilizer application was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// Nothing is tracked at the position.
    NoRecord,
    /// The tracked mechanic is not a crop.
    NotACrop,
    /// The crop's definition is not loaded.
    UnknownDefinition,
    /// The crop already has `max_points`.
    MaxPoints,
    /// No fertilizer rule accepts this stimulus and item.
    NoMatchingRule,
    /// The veto hook refused the application.
    ExternallyCancelled,
}

/// A refused fertilizer application. Normal control flow, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denied {
    pub reason: DenyReason,
}

impl Denied {
    pub fn new(reason: DenyReason) -> Self {
        Self { reason }
    }
}

impl fmt::Display for Denied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fertilizer denied: {:?}", self.reason)
    }
}

/// A fertilizer application request.
#[derive(Debug, Clone)]
pub struct FertilizeRequest<'a> {
    pub world: WorldId,
    pub pos: BlockPos,
    pub stimulus: Stimulus,
    /// Identity of the fertilizer item, as resolved by the item identity service.
    pub item_id: &'a str,
    pub actor: Option<Actor>,
}

/// What a successful application did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthOutcome {
    pub previous_point: u32,
    pub point: u32,
    /// Points rolled from the rule, before clamping.
    pub rolled: u32,
    /// Thresholds of the stages crossed, ascending.
    pub crossed_stages: Vec<u32>,
    /// Whether a new visual was placed.
    pub appearance_swapped: bool,
    /// Fertilizer units the caller must remove from the real inventory.
    pub consumed: u32,
}

/// Drives the crop state machine from fertilizer stimuli.
///
/// Owns the shared random source used for point rolls and rotations.
#[derive(Debug)]
pub struct FertilizerDispatcher<R = StdRng> {
    rng: R,
}

impl FertilizerDispatcher<StdRng> {
    /// Dispatcher with a reproducible random source.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> FertilizerDispatcher<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Apply fertilizer at `request.pos`.
    ///
    /// On success the overlay holds the new point count, rule and stage actions
    /// have run, and the visual was swapped if the displayed model changed.
    /// On denial nothing was mutated and nothing was rolled.
    pub fn try_dispense(
        &mut self,
        overlay: &mut BlockStateOverlay,
        definitions: &dyn DefinitionSource,
        services: &mut HostServices<'_>,
        request: &FertilizeRequest<'_>,
    ) -> Result<GrowthOutcome, Denied> {
        let (world, pos) = (request.world, request.pos);
        let record = overlay
            .get(world, pos)
            .ok_or(Denied::new(DenyReason::NoRecord))?;
        let crop = match record {
            BlockStateRecord::Crop(crop) => crop,
            BlockStateRecord::Pot(_)
            | BlockStateRecord::Sprinkler(_)
            | BlockStateRecord::GreenhouseGlass(_) => {
                return Err(Denied::new(DenyReason::NotACrop));
            }
        };
        let definition = definitions
            .crop_definition(&crop.config_id)
            .ok_or_else(|| {
                warn!(%world, %pos, id = %crop.config_id, "crop record without loaded definition");
                Denied::new(DenyReason::UnknownDefinition)
            })?;
        let rule = select_rule(definition, &crop, request.stimulus, request.item_id)
            .map_err(Denied::new)?;

        let attempt = FertilizeAttempt {
            world,
            pos,
            stimulus: request.stimulus,
            item_id: request.item_id,
            crop: &crop,
            rule,
            actor: request.actor.as_ref(),
        };
        if services.veto.pre_fertilize(&attempt) == HostDecision::Cancel {
            debug!(%world, %pos, "fertilizer vetoed");
            return Err(Denied::new(DenyReason::ExternallyCancelled));
        }

        let rolled = rule.point_roll.roll(&mut self.rng);
        let step = grow_by(&crop, definition, rolled);
        let updated = BlockStateRecord::Crop(step.record.clone());
        overlay
            .mutate(world, pos, move |_| updated)
            .map_err(|err| {
                warn!(%err, "crop record vanished during fertilizer dispatch");
                Denied::new(DenyReason::NoRecord)
            })?;

        let context = ActionContext {
            world,
            pos,
            actor: request.actor.clone(),
        };
        let stage_actions = step.crossed.iter().map(|stage| stage.grow_actions());
        for actions in std::iter::once(&rule.actions).chain(stage_actions) {
            if !actions.is_empty() {
                services.actions.run_actions(actions, &context);
            }
        }

        let appearance_swapped = self.swap_appearance(
            definition,
            services,
            world,
            pos,
            step.previous_point,
            step.record.point,
        );

        debug!(
            %world,
            %pos,
            rolled,
            from = step.previous_point,
            to = step.record.point,
            crossed = step.crossed.len(),
            "fertilizer applied"
        );

        Ok(GrowthOutcome {
            previous_point: step.previous_point,
            point: step.record.point,
            rolled,
            crossed_stages: step.crossed.iter().map(|stage| stage.threshold()).collect(),
            appearance_swapped,
            consumed: 1,
        })
    }

    fn swap_appearance(
        &mut self,
        definition: &CropDefinition,
        services: &mut HostServices<'_>,
        world: WorldId,
        pos: BlockPos,
        old_point: u32,
        new_point: u32,
    ) -> bool {
        if !needs_appearance_swap(definition, old_point, new_point) {
            return false;
        }
        let Some(model) = visual_stage_for(new_point, definition).model() else {
            warn!(%world, %pos, id = %definition.id(), "visual stage has no model");
            return false;
        };
        let mut rotation = services.appearance.remove_visual(world, pos);
        if rotation == FurnitureRotation::None && definition.random_rotation() {
            rotation = FurnitureRotation::random(&mut self.rng);
        }
        services
            .appearance
            .place_visual(world, pos, model, rotation);
        true
    }
}

/// Built-in preconditions: below the ceiling and a first-matching rule exists.
pub fn select_rule<'d>(
    definition: &'d CropDefinition,
    crop: &CropState,
    stimulus: Stimulus,
    item_id: &str,
) -> Result<&'d BoneMealRule, DenyReason> {
    if crop.point >= definition.max_points() {
        return Err(DenyReason::MaxPoints);
    }
    definition
        .bone_meals()
        .iter()
        .find(|rule| rule.matches(stimulus, item_id))
        .ok_or(DenyReason::NoMatchingRule)
}
