#![warn(missing_docs)]
//! Recording collaborators, fixtures and log sinks for overlay engine tests.

mod golden;

use anyhow::Result;
use overgrow_core::{
    ActionSet, BlockPos, BoneMealRule, CropDefinition, FurnitureRotation, ItemStack, MechanicKind,
    RangeOrConstant, RegistryKey, StageDefinition, WorldId,
};
use overgrow_world::{
    ActionContext, ActionRunner, AppearanceService, BreakContext, BreakReason, BreakVerdict,
    DefinitionRegistry, FertilizeAttempt, FertilizeVeto, HostDecision, HostServices, ItemIdentity,
    MechanicHandler,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub use golden::*;

/// Id of the [`tomato_definition`] fixture.
pub fn tomato_key() -> RegistryKey {
    RegistryKey::parse("overgrow:tomato").expect("fixture key is valid")
}

/// Four-stage crop used across the integration tests.
///
/// Thresholds are `0, 10, 25, 50` with `max_points = 50`; the `10` stage has no
/// model of its own. Bone meal grows it by `10..=20` from either stimulus,
/// compost by exactly `25` and only by hand.
pub fn tomato_definition() -> CropDefinition {
    let stages = vec![
        StageDefinition::new(0).with_model("tomato_stage_1"),
        StageDefinition::new(10).with_grow_actions(ActionSet::new(["particle:happy_villager"])),
        StageDefinition::new(25)
            .with_model("tomato_stage_2")
            .with_grow_actions(ActionSet::new(["sound:crop_grow"])),
        StageDefinition::new(50)
            .with_model("tomato_stage_3")
            .with_grow_actions(ActionSet::new(["sound:crop_ripe"])),
    ];
    let bone_meal = BoneMealRule::new(RangeOrConstant::Range { min: 10, max: 20 })
        .for_item("BONE_MEAL")
        .with_actions(ActionSet::new(["sound:bone_meal"]));
    let compost = BoneMealRule::new(RangeOrConstant::Constant(25))
        .for_item("overgrow:compost")
        .allow(false, true);

    CropDefinition::new(tomato_key(), 50, stages)
        .expect("tomato fixture is valid")
        .with_bone_meal(bone_meal)
        .with_bone_meal(compost)
}

/// Registry holding only the tomato fixture.
pub fn fixture_registry() -> DefinitionRegistry {
    let mut registry = DefinitionRegistry::new();
    registry.register_crop(tomato_definition());
    registry
}

/// Action runner that remembers every batch it was asked to run.
#[derive(Debug, Default)]
pub struct RecordingActions {
    /// Action batches in call order.
    pub runs: Vec<(Vec<String>, ActionContext)>,
}

impl RecordingActions {
    /// Every action run, flattened in call order.
    pub fn flattened(&self) -> Vec<String> {
        self.runs
            .iter()
            .flat_map(|(actions, _)| actions.iter().cloned())
            .collect()
    }
}

impl ActionRunner for RecordingActions {
    fn run_actions(&mut self, actions: &ActionSet, context: &ActionContext) {
        self.runs
            .push((actions.iter().map(str::to_owned).collect(), context.clone()));
    }
}

/// A `place_visual` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Target world.
    pub world: WorldId,
    /// Target position.
    pub pos: BlockPos,
    /// Model that was placed.
    pub model: String,
    /// Rotation it was placed with.
    pub rotation: FurnitureRotation,
}

/// Appearance service backed by an in-memory map of visuals.
#[derive(Debug, Default)]
pub struct RecordingAppearance {
    visuals: BTreeMap<(WorldId, BlockPos), (String, FurnitureRotation)>,
    /// `place_visual` calls in order.
    pub placements: Vec<Placement>,
    /// `remove_visual` calls in order.
    pub removals: Vec<(WorldId, BlockPos)>,
}

impl RecordingAppearance {
    /// Pretend `model` is already shown at `pos`.
    pub fn seed_visual(
        &mut self,
        world: WorldId,
        pos: BlockPos,
        model: impl Into<String>,
        rotation: FurnitureRotation,
    ) {
        self.visuals.insert((world, pos), (model.into(), rotation));
    }

    /// Model currently shown at `pos`.
    pub fn model_at(&self, world: WorldId, pos: BlockPos) -> Option<&str> {
        self.visuals
            .get(&(world, pos))
            .map(|(model, _)| model.as_str())
    }

    /// Rotation of the visual currently shown at `pos`.
    pub fn rotation_at(&self, world: WorldId, pos: BlockPos) -> Option<FurnitureRotation> {
        self.visuals.get(&(world, pos)).map(|(_, rotation)| *rotation)
    }
}

impl AppearanceService for RecordingAppearance {
    fn place_visual(
        &mut self,
        world: WorldId,
        pos: BlockPos,
        model: &str,
        rotation: FurnitureRotation,
    ) {
        self.visuals
            .insert((world, pos), (model.to_owned(), rotation));
        self.placements.push(Placement {
            world,
            pos,
            model: model.to_owned(),
            rotation,
        });
    }

    fn remove_visual(&mut self, world: WorldId, pos: BlockPos) -> FurnitureRotation {
        self.removals.push((world, pos));
        self.visuals
            .remove(&(world, pos))
            .map(|(_, rotation)| rotation)
            .unwrap_or_default()
    }
}

/// Resolves a stack to its custom id, falling back to the material name.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagIdentity;

impl ItemIdentity for TagIdentity {
    fn identity_of(&self, stack: &ItemStack) -> String {
        stack
            .custom_id
            .clone()
            .unwrap_or_else(|| stack.material.clone())
    }
}

/// Veto hook with a fixed answer that counts how often it was asked.
#[derive(Debug, Default)]
pub struct ScriptedVeto {
    /// Cancel every attempt when set.
    pub cancel: bool,
    /// Item ids of every attempt seen, in order.
    pub seen: Vec<String>,
}

impl ScriptedVeto {
    /// A veto that cancels everything.
    pub fn cancelling() -> Self {
        Self {
            cancel: true,
            seen: Vec::new(),
        }
    }
}

impl FertilizeVeto for ScriptedVeto {
    fn pre_fertilize(&mut self, attempt: &FertilizeAttempt<'_>) -> HostDecision {
        self.seen.push(attempt.item_id.to_owned());
        if self.cancel {
            HostDecision::Cancel
        } else {
            HostDecision::Proceed
        }
    }
}

/// The full set of recording collaborators a dispatch needs.
#[derive(Debug, Default)]
pub struct Collaborators {
    /// Action runner.
    pub actions: RecordingActions,
    /// Appearance service.
    pub appearance: RecordingAppearance,
    /// Item identity service.
    pub items: TagIdentity,
    /// Veto hook.
    pub veto: ScriptedVeto,
}

impl Collaborators {
    /// Borrow the collaborators as engine host services.
    pub fn services(&mut self) -> HostServices<'_> {
        HostServices {
            actions: &mut self.actions,
            appearance: &mut self.appearance,
            items: &self.items,
            veto: &mut self.veto,
        }
    }
}

/// A break routed to a [`ScriptedHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenBreak {
    /// Position consulted.
    pub pos: BlockPos,
    /// Why it was about to break.
    pub reason: BreakReason,
    /// Mechanic of the record found there.
    pub kind: MechanicKind,
}

/// Break handler answering from a per-position script. Unscripted positions
/// are removed.
#[derive(Debug, Default)]
pub struct ScriptedHandler {
    cancels: BTreeSet<BlockPos>,
    failures: BTreeSet<BlockPos>,
    /// Every consulted break, in order.
    pub seen: Vec<SeenBreak>,
}

impl ScriptedHandler {
    /// Cancel any break at `pos`.
    pub fn cancel_at(mut self, pos: BlockPos) -> Self {
        self.cancels.insert(pos);
        self
    }

    /// Return an error for any break at `pos`.
    pub fn fail_at(mut self, pos: BlockPos) -> Self {
        self.failures.insert(pos);
        self
    }
}

impl MechanicHandler for ScriptedHandler {
    fn on_break(&mut self, context: &BreakContext<'_>) -> Result<BreakVerdict> {
        self.seen.push(SeenBreak {
            pos: context.pos,
            reason: context.reason,
            kind: context.record.kind(),
        });
        if self.failures.contains(&context.pos) {
            anyhow::bail!("scripted failure at {}", context.pos);
        }
        Ok(if self.cancels.contains(&context.pos) {
            BreakVerdict::Cancel
        } else {
            BreakVerdict::Remove
        })
    }
}

/// One line of an engine trace captured by headless tests.
#[derive(Debug, Serialize)]
pub struct EventRecord<'a> {
    /// World the event happened in.
    pub world: WorldId,
    /// Position it concerned.
    pub pos: BlockPos,
    /// Short kind label, e.g. `fertilized` or `denied`.
    pub kind: &'a str,
    /// Free-form detail.
    pub payload: &'a str,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: File,
}

impl JsonlSink {
    /// Create a new sink at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    /// Append an event to the log.
    pub fn write(&mut self, event: &EventRecord<'_>) -> Result<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }
}
