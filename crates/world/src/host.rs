//! Boundary to the host world-simulation and its services.
//!
//! The engine never calls the host directly. It returns [`HostDecision`]s for
//! the integration glue to translate into the host's own cancellation flags,
//! and it reaches rendering, item identity, action execution and extension
//! hooks only through the traits below.

use overgrow_core::{
    ActionSet, BlockPos, BlockStateRecord, BoneMealRule, CropDefinition, CropState,
    FurnitureRotation, ItemStack, PositionKey, PotDefinition, RegistryKey, SprinklerDefinition,
    Stimulus, WorldId,
};

/// Whether the host should carry out the mutation it announced.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostDecision {
    /// Let the host mutation happen.
    Proceed,
    /// Cancel the host mutation.
    Cancel,
}

impl HostDecision {
    /// Returns true for [`HostDecision::Cancel`].
    pub fn is_cancel(self) -> bool {
        self == HostDecision::Cancel
    }
}

/// Something in the host world that caused a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// A player, by name.
    Player { name: String },
    /// A non-player entity.
    Entity { id: u64, kind: String },
    /// A block such as a dispenser or an exploding bed.
    Block { pos: BlockPos, kind: String },
}

/// Context handed to the action runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    pub world: WorldId,
    pub pos: BlockPos,
    pub actor: Option<Actor>,
}

/// Executes configured actions (sounds, particles, drops, commands...).
pub trait ActionRunner {
    /// Run `actions` in order. Fire-and-forget from the engine's point of view.
    fn run_actions(&mut self, actions: &ActionSet, context: &ActionContext);
}

/// Places and removes the visual furniture that represents a custom block.
pub trait AppearanceService {
    /// Show `model` at `pos` with the given rotation.
    fn place_visual(
        &mut self,
        world: WorldId,
        pos: BlockPos,
        model: &str,
        rotation: FurnitureRotation,
    );

    /// Remove whatever visual is at `pos`, returning its rotation.
    fn remove_visual(&mut self, world: WorldId, pos: BlockPos) -> FurnitureRotation;
}

/// Resolves host item stacks to item ids.
pub trait ItemIdentity {
    /// Stable id of the item in `stack`.
    fn identity_of(&self, stack: &ItemStack) -> String;
}

/// Read-only access to loaded mechanic definitions.
pub trait DefinitionSource {
    /// Crop definition by id.
    fn crop_definition(&self, id: &RegistryKey) -> Option<&CropDefinition>;

    /// Pot definition by id.
    fn pot_definition(&self, id: &RegistryKey) -> Option<&PotDefinition>;

    /// Sprinkler definition by id.
    fn sprinkler_definition(&self, _id: &RegistryKey) -> Option<&SprinklerDefinition> {
        None
    }

    /// Crop whose stage model is the item `item_id`.
    fn crop_for_stage_item(&self, _item_id: &str) -> Option<&CropDefinition> {
        None
    }

    /// Pot whose dry or wet model is the item `item_id`.
    fn pot_for_item(&self, _item_id: &str) -> Option<&PotDefinition> {
        None
    }
}

/// A fertilizer application that passed every built-in check.
#[derive(Debug, Clone, Copy)]
pub struct FertilizeAttempt<'a> {
    pub world: WorldId,
    pub pos: BlockPos,
    pub stimulus: Stimulus,
    pub item_id: &'a str,
    pub crop: &'a CropState,
    pub rule: &'a BoneMealRule,
    pub actor: Option<&'a Actor>,
}

/// Extension hook consulted right before a fertilizer application commits.
pub trait FertilizeVeto {
    /// Return [`HostDecision::Cancel`] to deny the application.
    fn pre_fertilize(&mut self, attempt: &FertilizeAttempt<'_>) -> HostDecision;
}

/// Veto hook that never objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVeto;

impl FertilizeVeto for NoVeto {
    fn pre_fertilize(&mut self, _attempt: &FertilizeAttempt<'_>) -> HostDecision {
        HostDecision::Proceed
    }
}

/// Why a tracked block is about to be destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakReason {
    /// Broken by a player.
    Player,
    /// Farmland trampled by an entity.
    Trample,
    /// Caught in an entity explosion.
    EntityExplosion,
    /// Caught in a block explosion.
    BlockExplosion,
}

/// A tracked position the host is about to destroy.
#[derive(Debug, Clone, Copy)]
pub struct BreakContext<'a> {
    pub world: WorldId,
    pub pos: BlockPos,
    pub record: &'a BlockStateRecord,
    pub reason: BreakReason,
    pub breaker: Option<&'a Actor>,
}

impl BreakContext<'_> {
    /// World-qualified position of the block.
    pub fn key(&self) -> PositionKey {
        PositionKey::new(self.world, self.pos)
    }
}

/// Verdict of a mechanic-specific break handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakVerdict {
    /// Keep the block; the host mutation must be cancelled.
    Cancel,
    /// Allow the destruction and drop the overlay record with it.
    Remove,
}

/// Mechanic-specific break logic (crop drops, pot water spill, sprinkler refund...).
pub trait MechanicHandler {
    /// Decide what happens to a tracked block the host wants to destroy.
    fn on_break(&mut self, context: &BreakContext<'_>) -> anyhow::Result<BreakVerdict>;
}

/// Collaborators a fertilizer dispatch talks to.
pub struct HostServices<'a> {
    pub actions: &'a mut dyn ActionRunner,
    pub appearance: &'a mut dyn AppearanceService,
    pub items: &'a dyn ItemIdentity,
    pub veto: &'a mut dyn FertilizeVeto,
}
