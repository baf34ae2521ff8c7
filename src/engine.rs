use crate::config::OvergrowConfig;
use overgrow_core::{BlockPos, ItemStack, WorldId};
use overgrow_world::{
    Actor, BlockStateOverlay, DefinitionRegistry, Denied, DispenseNotification,
    DispenserInventory, FertilizerDispatcher, GrowthOutcome, HostDecision, HostServices,
    ItemIdentity, ItemSpawnDecision, MechanicHandler, SnapshotHandle, WorldEventReconciler,
    WorldNotification,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// Everything one server needs: the overlay, loaded definitions, the
/// reconciler and the fertilizer dispatcher with its random source.
#[derive(Debug)]
pub struct OvergrowEngine {
    overlay: BlockStateOverlay,
    definitions: DefinitionRegistry,
    reconciler: WorldEventReconciler,
    dispatcher: FertilizerDispatcher,
}

impl OvergrowEngine {
    /// Build an engine over already-loaded definitions.
    pub fn new(config: &OvergrowConfig, definitions: DefinitionRegistry) -> Self {
        let rng = config
            .rng_seed
            .map(StdRng::seed_from_u64)
            .unwrap_or_else(StdRng::from_entropy);
        info!(
            crops = definitions.crop_count(),
            seeded = config.rng_seed.is_some(),
            "overgrow engine ready"
        );
        Self {
            overlay: BlockStateOverlay::new(),
            definitions,
            reconciler: WorldEventReconciler::new(config.reconciler),
            dispatcher: FertilizerDispatcher::new(rng),
        }
    }

    /// Apply a reloaded configuration. Tracked records and the random source are kept.
    pub fn apply_config(&mut self, config: &OvergrowConfig) {
        self.reconciler.refresh_policy(config.reconciler);
    }

    /// Swap in reloaded definitions. Records of crops that are no longer
    /// defined stay tracked and are denied fertilizer until they return.
    pub fn replace_definitions(&mut self, definitions: DefinitionRegistry) {
        info!(crops = definitions.crop_count(), "overgrow definitions reloaded");
        self.definitions = definitions;
    }

    pub fn overlay(&self) -> &BlockStateOverlay {
        &self.overlay
    }

    /// Mutable overlay access for placement and chunk-load glue.
    pub fn overlay_mut(&mut self) -> &mut BlockStateOverlay {
        &mut self.overlay
    }

    /// Read-only handle for persistence tasks on other threads.
    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.overlay.snapshot_handle()
    }

    pub fn definitions(&self) -> &DefinitionRegistry {
        &self.definitions
    }

    pub fn reconcile(
        &mut self,
        handler: &mut dyn MechanicHandler,
        notification: &WorldNotification,
    ) -> HostDecision {
        self.reconciler
            .reconcile(&mut self.overlay, handler, notification)
    }

    pub fn dispense(
        &mut self,
        services: &mut HostServices<'_>,
        inventory: &mut DispenserInventory,
        notification: &DispenseNotification,
    ) -> HostDecision {
        self.reconciler.on_dispense(
            &mut self.overlay,
            &mut self.dispatcher,
            &self.definitions,
            services,
            inventory,
            notification,
        )
    }

    pub fn fertilize(
        &mut self,
        services: &mut HostServices<'_>,
        world: WorldId,
        pos: BlockPos,
        player: Actor,
        item: &ItemStack,
    ) -> Result<GrowthOutcome, Denied> {
        self.reconciler.on_fertilize(
            &mut self.overlay,
            &mut self.dispatcher,
            &self.definitions,
            services,
            world,
            pos,
            player,
            item,
        )
    }

    pub fn item_spawn(&self, items: &dyn ItemIdentity, stack: &ItemStack) -> ItemSpawnDecision {
        self.reconciler.on_item_spawn(&self.definitions, items, stack)
    }

    /// Forget every record of an unloaded world.
    pub fn unload_world(&mut self, world: WorldId) -> usize {
        let dropped = self.overlay.drop_world(world);
        info!(%world, dropped, "world unloaded");
        dropped
    }
}
