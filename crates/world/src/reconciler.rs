//! Reconciles host world-mutation notifications with the overlay.
//!
//! Every entry point resolves to an explicit [`HostDecision`]. Each notification
//! is handled on its own; the reconciler keeps nothing between calls except the
//! policy snapshot. Batch notifications (explosions, trampling) commit
//! atomically: either every verdict allows the mutation and all affected
//! records are removed together, or the host mutation is cancelled before any
//! record is touched.

use crate::dispenser::DispenserInventory;
use crate::fertilizer::{
    Denied, DenyReason, FertilizeRequest, FertilizerDispatcher, GrowthOutcome,
};
use crate::host::{
    Actor, BreakContext, BreakReason, BreakVerdict, DefinitionSource, HostDecision, HostServices,
    ItemIdentity, MechanicHandler,
};
use crate::overlay::BlockStateOverlay;
use overgrow_core::{BlockPos, BlockStateRecord, Facing, ItemStack, Stimulus, WorldId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, error, warn};

/// Process-wide behaviour switches, read-mostly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerPolicy {
    /// Cancel every farmland trample outright.
    pub prevent_trampling: bool,
    /// Cancel every vanilla farmland moisture change.
    pub disable_moisture_mechanic: bool,
}

/// Host block kinds the reconciler distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostBlockKind {
    Farmland,
    Other(String),
}

/// A host world mutation, as reported by the integration glue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldNotification {
    /// A player is breaking a block.
    BlockBreak {
        world: WorldId,
        pos: BlockPos,
        player: Actor,
    },
    /// An entity explosion is about to destroy `positions`.
    EntityExplode {
        world: WorldId,
        source: Actor,
        positions: Vec<BlockPos>,
    },
    /// A block explosion is about to destroy `positions`.
    BlockExplode {
        world: WorldId,
        source: Actor,
        positions: Vec<BlockPos>,
    },
    /// A piston is about to move the blocks at `positions`.
    PistonMove {
        world: WorldId,
        piston: BlockPos,
        positions: Vec<BlockPos>,
    },
    /// A block is fading into another (e.g. farmland drying back to dirt).
    Fade {
        world: WorldId,
        pos: BlockPos,
        block: HostBlockKind,
    },
    /// An entity is trampling farmland at `pos` into dirt.
    Trample {
        world: WorldId,
        pos: BlockPos,
        entity: Actor,
    },
    /// Vanilla farmland moisture is about to change.
    MoistureChange { world: WorldId, pos: BlockPos },
}

/// A dispenser firing an item.
#[derive(Debug, Clone)]
pub struct DispenseNotification {
    pub world: WorldId,
    pub dispenser: BlockPos,
    pub facing: Facing,
    /// The stack the host is about to dispense.
    pub item: ItemStack,
}

/// What the host should do with an item entity it is about to spawn.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemSpawnDecision {
    /// Spawn the item unchanged.
    Proceed,
    /// Suppress the item entirely.
    Cancel,
    /// Spawn the item with id `item_id` instead, keeping the stack size.
    Replace { item_id: String },
}

/// Mediates between host notifications and overlay consistency.
#[derive(Debug, Clone, Default)]
pub struct WorldEventReconciler {
    policy: ReconcilerPolicy,
}

impl WorldEventReconciler {
    pub fn new(policy: ReconcilerPolicy) -> Self {
        Self { policy }
    }

    /// Current policy snapshot.
    pub fn policy(&self) -> &ReconcilerPolicy {
        &self.policy
    }

    /// Replace the policy snapshot, e.g. after a configuration reload.
    pub fn refresh_policy(&mut self, policy: ReconcilerPolicy) {
        debug!(?policy, "reconciler policy refreshed");
        self.policy = policy;
    }

    /// Decide the fate of a host mutation and update the overlay accordingly.
    pub fn reconcile(
        &self,
        overlay: &mut BlockStateOverlay,
        handler: &mut dyn MechanicHandler,
        notification: &WorldNotification,
    ) -> HostDecision {
        match notification {
            WorldNotification::BlockBreak { world, pos, player } => self.commit_batch(
                overlay,
                handler,
                *world,
                std::slice::from_ref(pos),
                BreakReason::Player,
                Some(player),
            ),
            WorldNotification::EntityExplode {
                world,
                source,
                positions,
            } => self.commit_batch(
                overlay,
                handler,
                *world,
                positions,
                BreakReason::EntityExplosion,
                Some(source),
            ),
            WorldNotification::BlockExplode {
                world,
                source,
                positions,
            } => self.commit_batch(
                overlay,
                handler,
                *world,
                positions,
                BreakReason::BlockExplosion,
                Some(source),
            ),
            WorldNotification::PistonMove {
                world,
                piston,
                positions,
            } => on_piston_move(overlay, *world, *piston, positions),
            WorldNotification::Fade { world, pos, block } => on_fade(overlay, *world, *pos, block),
            WorldNotification::Trample { world, pos, entity } => {
                if self.policy.prevent_trampling {
                    debug!(%world, %pos, "trampling prevented by policy");
                    return HostDecision::Cancel;
                }
                // The soil block and the crop standing on it both lose their host block.
                let affected: Vec<BlockPos> = std::iter::once(*pos).chain(pos.above()).collect();
                self.commit_batch(
                    overlay,
                    handler,
                    *world,
                    &affected,
                    BreakReason::Trample,
                    Some(entity),
                )
            }
            WorldNotification::MoistureChange { world, pos } => {
                if self.policy.disable_moisture_mechanic {
                    debug!(%world, %pos, "moisture change disabled by policy");
                    HostDecision::Cancel
                } else {
                    HostDecision::Proceed
                }
            }
        }
    }

    /// Route every tracked position to the handler once, stopping at the first
    /// cancel. Records are only removed once every verdict is in.
    fn commit_batch(
        &self,
        overlay: &mut BlockStateOverlay,
        handler: &mut dyn MechanicHandler,
        world: WorldId,
        positions: &[BlockPos],
        reason: BreakReason,
        breaker: Option<&Actor>,
    ) -> HostDecision {
        let mut seen = BTreeSet::new();
        let mut doomed = Vec::new();
        for &pos in positions {
            if !seen.insert(pos) {
                continue;
            }
            let Some(record) = overlay.get(world, pos) else {
                continue;
            };
            let context = BreakContext {
                world,
                pos,
                record: &record,
                reason,
                breaker,
            };
            match route(handler, &context) {
                BreakVerdict::Cancel => {
                    debug!(%world, %pos, ?reason, kind = %record.kind(), "host mutation cancelled");
                    return HostDecision::Cancel;
                }
                BreakVerdict::Remove => doomed.push(pos),
            }
        }

        if !doomed.is_empty() {
            let removed = overlay.remove_many(world, &doomed);
            if removed.len() != doomed.len() {
                warn!(
                    %world,
                    expected = doomed.len(),
                    removed = removed.len(),
                    "records disappeared while a batch was being reconciled"
                );
            }
        }
        HostDecision::Proceed
    }

    /// A dispenser fired at the block it faces.
    ///
    /// Fertilizer aimed at a tracked crop is handled here instead of by the
    /// host: on success one matching item leaves the dispenser and the host
    /// dispense is cancelled. A veto also cancels it. Any other denial lets
    /// the host dispense normally.
    #[allow(clippy::too_many_arguments)]
    pub fn on_dispense<R: Rng>(
        &self,
        overlay: &mut BlockStateOverlay,
        dispatcher: &mut FertilizerDispatcher<R>,
        definitions: &dyn DefinitionSource,
        services: &mut HostServices<'_>,
        inventory: &mut DispenserInventory,
        notification: &DispenseNotification,
    ) -> HostDecision {
        let world = notification.world;
        let Some(target) = notification.dispenser.relative(notification.facing) else {
            return HostDecision::Proceed;
        };
        if !overlay
            .get(world, target)
            .as_ref()
            .is_some_and(BlockStateRecord::is_crop)
        {
            return HostDecision::Proceed;
        }

        let item_id = services.items.identity_of(&notification.item);
        let Some(slot) = inventory.find_matching(&item_id, services.items) else {
            error!(
                %world,
                dispenser = %notification.dispenser,
                %item_id,
                "dispensed item not found in dispenser storage"
            );
            return HostDecision::Cancel;
        };

        let request = FertilizeRequest {
            world,
            pos: target,
            stimulus: Stimulus::Dispenser,
            item_id: &item_id,
            actor: Some(Actor::Block {
                pos: notification.dispenser,
                kind: "dispenser".to_string(),
            }),
        };
        match dispatcher.try_dispense(overlay, definitions, services, &request) {
            Ok(outcome) => {
                for _ in 0..outcome.consumed {
                    if let Err(err) = inventory.take_one(slot) {
                        error!(%err, "failed to consume dispensed fertilizer");
                    }
                }
                HostDecision::Cancel
            }
            Err(Denied {
                reason: DenyReason::ExternallyCancelled,
            }) => HostDecision::Cancel,
            Err(denied) => {
                debug!(%world, pos = %target, %denied, "dispense left to host");
                HostDecision::Proceed
            }
        }
    }

    /// A player applied fertilizer by hand. The caller removes
    /// `outcome.consumed` items from the player's hand on success.
    #[allow(clippy::too_many_arguments)]
    pub fn on_fertilize<R: Rng>(
        &self,
        overlay: &mut BlockStateOverlay,
        dispatcher: &mut FertilizerDispatcher<R>,
        definitions: &dyn DefinitionSource,
        services: &mut HostServices<'_>,
        world: WorldId,
        pos: BlockPos,
        player: Actor,
        item: &ItemStack,
    ) -> Result<GrowthOutcome, Denied> {
        let item_id = services.items.identity_of(item);
        let request = FertilizeRequest {
            world,
            pos,
            stimulus: Stimulus::Hand,
            item_id: &item_id,
            actor: Some(player),
        };
        dispatcher.try_dispense(overlay, definitions, services, &request)
    }

    /// An item entity is about to spawn, e.g. as a block drop.
    ///
    /// Stage model items exist only as crop visuals and never reach the world.
    /// A wet pot item is turned back into its dry form.
    pub fn on_item_spawn(
        &self,
        definitions: &dyn DefinitionSource,
        items: &dyn ItemIdentity,
        stack: &ItemStack,
    ) -> ItemSpawnDecision {
        let item_id = items.identity_of(stack);
        if let Some(crop) = definitions.crop_for_stage_item(&item_id) {
            debug!(%item_id, crop = %crop.id(), "stage item drop suppressed");
            return ItemSpawnDecision::Cancel;
        }
        match definitions.pot_for_item(&item_id) {
            Some(pot) if pot.dry_model != item_id => ItemSpawnDecision::Replace {
                item_id: pot.dry_model.clone(),
            },
            Some(_) | None => ItemSpawnDecision::Proceed,
        }
    }
}

fn route(handler: &mut dyn MechanicHandler, context: &BreakContext<'_>) -> BreakVerdict {
    handler.on_break(context).unwrap_or_else(|err| {
        warn!(
            key = %context.key(),
            "mechanic handler failed, cancelling host mutation: {err:#}"
        );
        BreakVerdict::Cancel
    })
}

fn on_piston_move(
    overlay: &BlockStateOverlay,
    world: WorldId,
    piston: BlockPos,
    positions: &[BlockPos],
) -> HostDecision {
    match positions.iter().find(|pos| overlay.contains(world, **pos)) {
        Some(pos) => {
            debug!(%world, %piston, %pos, "piston would move a tracked block");
            HostDecision::Cancel
        }
        None => HostDecision::Proceed,
    }
}

fn on_fade(
    overlay: &BlockStateOverlay,
    world: WorldId,
    pos: BlockPos,
    block: &HostBlockKind,
) -> HostDecision {
    if *block != HostBlockKind::Farmland {
        return HostDecision::Proceed;
    }
    let Some(above) = pos.above() else {
        return HostDecision::Proceed;
    };
    match overlay.get(world, above) {
        Some(BlockStateRecord::Crop(_)) => {
            debug!(%world, %pos, "farmland kept under tracked crop");
            HostDecision::Cancel
        }
        Some(
            BlockStateRecord::Pot(_)
            | BlockStateRecord::Sprinkler(_)
            | BlockStateRecord::GreenhouseGlass(_),
        )
        | None => HostDecision::Proceed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::DefinitionRegistry;
    use overgrow_core::{
        CropDefinition, CropState, PotDefinition, RegistryKey, SprinklerState, StageDefinition,
    };
    use std::collections::BTreeMap;

    const WORLD: WorldId = WorldId::new(0);

    struct Verdicts {
        by_pos: BTreeMap<BlockPos, BreakVerdict>,
        seen: Vec<(BlockPos, BreakReason)>,
    }

    impl Verdicts {
        fn allow_all() -> Self {
            Self {
                by_pos: BTreeMap::new(),
                seen: Vec::new(),
            }
        }

        fn cancel_at(pos: BlockPos) -> Self {
            let mut verdicts = Self::allow_all();
            verdicts.by_pos.insert(pos, BreakVerdict::Cancel);
            verdicts
        }
    }

    impl MechanicHandler for Verdicts {
        fn on_break(&mut self, context: &BreakContext<'_>) -> anyhow::Result<BreakVerdict> {
            self.seen.push((context.pos, context.reason));
            Ok(self
                .by_pos
                .get(&context.pos)
                .copied()
                .unwrap_or(BreakVerdict::Remove))
        }
    }

    struct Failing;

    impl MechanicHandler for Failing {
        fn on_break(&mut self, _context: &BreakContext<'_>) -> anyhow::Result<BreakVerdict> {
            anyhow::bail!("drop table missing")
        }
    }

    fn crop() -> BlockStateRecord {
        BlockStateRecord::Crop(CropState::planted(RegistryKey::parse("tomato").unwrap()))
    }

    fn sprinkler() -> BlockStateRecord {
        BlockStateRecord::Sprinkler(SprinklerState {
            config_id: RegistryKey::parse("brass_sprinkler").unwrap(),
            remaining_uses: 2,
        })
    }

    fn creeper() -> Actor {
        Actor::Entity {
            id: 42,
            kind: "creeper".into(),
        }
    }

    #[test]
    fn explosion_cancelled_by_handler_leaves_overlay_untouched() {
        let (a, b, c) = (
            BlockPos::new(0, 64, 0),
            BlockPos::new(1, 64, 0),
            BlockPos::new(2, 64, 0),
        );
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, a, sprinkler()).unwrap();
        overlay.put(WORLD, b, crop()).unwrap();
        overlay.put(WORLD, c, crop()).unwrap();
        let mut handler = Verdicts::cancel_at(b);

        let decision = WorldEventReconciler::default().reconcile(
            &mut overlay,
            &mut handler,
            &WorldNotification::EntityExplode {
                world: WORLD,
                source: creeper(),
                positions: vec![a, b, c],
            },
        );

        assert_eq!(decision, HostDecision::Cancel);
        assert_eq!(overlay.world_len(WORLD), 3);
        // `c` is never consulted once `b` cancels the batch.
        assert_eq!(
            handler.seen,
            vec![(a, BreakReason::EntityExplosion), (b, BreakReason::EntityExplosion)]
        );
    }

    #[test]
    fn explosion_with_single_tracked_position_cancels_as_a_whole() {
        let (a, b, c) = (
            BlockPos::new(0, 64, 0),
            BlockPos::new(1, 64, 0),
            BlockPos::new(2, 64, 0),
        );
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, b, crop()).unwrap();
        let mut handler = Verdicts::cancel_at(b);

        let decision = WorldEventReconciler::default().reconcile(
            &mut overlay,
            &mut handler,
            &WorldNotification::EntityExplode {
                world: WORLD,
                source: creeper(),
                positions: vec![a, b, c],
            },
        );

        assert!(decision.is_cancel());
        assert_eq!(handler.seen, vec![(b, BreakReason::EntityExplosion)]);
        assert_eq!(overlay.get(WORLD, b), Some(crop()));
    }

    #[test]
    fn explosion_allowed_removes_every_tracked_position() {
        let (a, b) = (BlockPos::new(0, 64, 0), BlockPos::new(5, 64, 5));
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, a, crop()).unwrap();
        overlay.put(WORLD, b, sprinkler()).unwrap();

        let decision = WorldEventReconciler::default().reconcile(
            &mut overlay,
            &mut Verdicts::allow_all(),
            &WorldNotification::BlockExplode {
                world: WORLD,
                source: Actor::Block {
                    pos: BlockPos::new(3, 64, 3),
                    kind: "respawn_anchor".into(),
                },
                positions: vec![a, BlockPos::new(1, 1, 1), b],
            },
        );

        assert_eq!(decision, HostDecision::Proceed);
        assert!(overlay.is_empty());
    }

    #[test]
    fn handler_failure_cancels() {
        let pos = BlockPos::new(0, 64, 0);
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, pos, crop()).unwrap();

        let decision = WorldEventReconciler::default().reconcile(
            &mut overlay,
            &mut Failing,
            &WorldNotification::BlockBreak {
                world: WORLD,
                pos,
                player: Actor::Player {
                    name: "alex".into(),
                },
            },
        );
        assert_eq!(decision, HostDecision::Cancel);
        assert!(overlay.contains(WORLD, pos));
    }

    #[test]
    fn piston_cancels_when_any_swept_block_is_tracked() {
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, BlockPos::new(0, 64, 2), sprinkler()).unwrap();
        let reconciler = WorldEventReconciler::default();
        let mut handler = Verdicts::allow_all();

        let blocked = reconciler.reconcile(
            &mut overlay,
            &mut handler,
            &WorldNotification::PistonMove {
                world: WORLD,
                piston: BlockPos::new(0, 64, 0),
                positions: vec![BlockPos::new(0, 64, 1), BlockPos::new(0, 64, 2)],
            },
        );
        let free = reconciler.reconcile(
            &mut overlay,
            &mut handler,
            &WorldNotification::PistonMove {
                world: WORLD,
                piston: BlockPos::new(9, 64, 0),
                positions: vec![BlockPos::new(9, 64, 1)],
            },
        );

        assert_eq!(blocked, HostDecision::Cancel);
        assert_eq!(free, HostDecision::Proceed);
        assert!(handler.seen.is_empty());
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn farmland_fade_under_crop_is_cancelled() {
        let soil = BlockPos::new(0, 63, 0);
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, soil.above().unwrap(), crop()).unwrap();
        let reconciler = WorldEventReconciler::default();
        let mut handler = Verdicts::allow_all();

        let fade = |block: HostBlockKind, pos: BlockPos| WorldNotification::Fade {
            world: WORLD,
            pos,
            block,
        };
        assert_eq!(
            reconciler.reconcile(&mut overlay, &mut handler, &fade(HostBlockKind::Farmland, soil)),
            HostDecision::Cancel
        );
        assert_eq!(
            reconciler.reconcile(
                &mut overlay,
                &mut handler,
                &fade(HostBlockKind::Farmland, BlockPos::new(4, 63, 4))
            ),
            HostDecision::Proceed
        );
        assert_eq!(
            reconciler.reconcile(
                &mut overlay,
                &mut handler,
                &fade(HostBlockKind::Other("ice".into()), soil)
            ),
            HostDecision::Proceed
        );
    }

    #[test]
    fn trampling_follows_policy() {
        let soil = BlockPos::new(0, 63, 0);
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, soil.above().unwrap(), crop()).unwrap();
        let trample = WorldNotification::Trample {
            world: WORLD,
            pos: soil,
            entity: creeper(),
        };

        let mut reconciler = WorldEventReconciler::new(ReconcilerPolicy {
            prevent_trampling: true,
            ..ReconcilerPolicy::default()
        });
        let mut handler = Verdicts::allow_all();
        assert_eq!(
            reconciler.reconcile(&mut overlay, &mut handler, &trample),
            HostDecision::Cancel
        );
        assert!(handler.seen.is_empty());

        reconciler.refresh_policy(ReconcilerPolicy::default());
        assert_eq!(
            reconciler.reconcile(&mut overlay, &mut handler, &trample),
            HostDecision::Proceed
        );
        assert_eq!(handler.seen, vec![(soil.above().unwrap(), BreakReason::Trample)]);
        assert!(overlay.is_empty());
    }

    #[test]
    fn moisture_change_follows_policy() {
        let mut overlay = BlockStateOverlay::new();
        let change = WorldNotification::MoistureChange {
            world: WORLD,
            pos: BlockPos::new(0, 63, 0),
        };
        let mut handler = Verdicts::allow_all();
        assert_eq!(
            WorldEventReconciler::default().reconcile(&mut overlay, &mut handler, &change),
            HostDecision::Proceed
        );
        let disabled = WorldEventReconciler::new(ReconcilerPolicy {
            disable_moisture_mechanic: true,
            ..ReconcilerPolicy::default()
        });
        assert_eq!(
            disabled.reconcile(&mut overlay, &mut handler, &change),
            HostDecision::Cancel
        );
    }

    #[test]
    fn repeated_positions_are_routed_once() {
        let pos = BlockPos::new(1, 64, 0);
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, pos, crop()).unwrap();
        let mut handler = Verdicts::allow_all();

        let decision = WorldEventReconciler::default().reconcile(
            &mut overlay,
            &mut handler,
            &WorldNotification::EntityExplode {
                world: WORLD,
                source: creeper(),
                positions: vec![pos, BlockPos::new(2, 64, 0), pos],
            },
        );

        assert_eq!(decision, HostDecision::Proceed);
        assert_eq!(handler.seen, vec![(pos, BreakReason::EntityExplosion)]);
        assert!(overlay.is_empty());
    }

    #[test]
    fn trample_at_the_top_of_the_world_only_routes_the_soil() {
        let soil = BlockPos::new(0, i32::MAX, 0);
        let mut overlay = BlockStateOverlay::new();
        overlay.put(WORLD, soil, sprinkler()).unwrap();
        let mut handler = Verdicts::allow_all();

        let decision = WorldEventReconciler::default().reconcile(
            &mut overlay,
            &mut handler,
            &WorldNotification::Trample {
                world: WORLD,
                pos: soil,
                entity: creeper(),
            },
        );

        assert_eq!(decision, HostDecision::Proceed);
        assert_eq!(handler.seen, vec![(soil, BreakReason::Trample)]);
        assert!(overlay.is_empty());
    }

    struct CustomIds;

    impl ItemIdentity for CustomIds {
        fn identity_of(&self, stack: &ItemStack) -> String {
            stack
                .custom_id
                .clone()
                .unwrap_or_else(|| stack.material.clone())
        }
    }

    #[test]
    fn item_spawns_hide_stage_models_and_dry_pots() {
        let mut definitions = DefinitionRegistry::new();
        definitions.register_crop(
            CropDefinition::new(
                RegistryKey::parse("tomato").unwrap(),
                10,
                vec![
                    StageDefinition::new(0).with_model("overgrow:tomato_stage_1"),
                    StageDefinition::new(10).with_model("overgrow:tomato_stage_2"),
                ],
            )
            .unwrap(),
        );
        definitions.register_pot(PotDefinition {
            id: RegistryKey::parse("clay_pot").unwrap(),
            max_water: 5,
            dry_model: "overgrow:clay_pot".into(),
            wet_model: "overgrow:clay_pot_wet".into(),
        });
        let reconciler = WorldEventReconciler::default();
        let spawn = |id: &str| {
            reconciler.on_item_spawn(
                &definitions,
                &CustomIds,
                &ItemStack::new("PAPER", 3).with_custom_id(id),
            )
        };

        assert_eq!(spawn("overgrow:tomato_stage_2"), ItemSpawnDecision::Cancel);
        assert_eq!(
            spawn("overgrow:clay_pot_wet"),
            ItemSpawnDecision::Replace {
                item_id: "overgrow:clay_pot".into()
            }
        );
        assert_eq!(spawn("overgrow:clay_pot"), ItemSpawnDecision::Proceed);
        assert_eq!(spawn("overgrow:tomato_seeds"), ItemSpawnDecision::Proceed);
    }
}
