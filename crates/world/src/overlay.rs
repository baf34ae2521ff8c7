//! Per-world overlay of custom block state.
//!
//! The overlay is the single source of truth for "does a custom mechanic exist
//! here". Mutations take `&mut self`, so the notification thread that owns the
//! [`BlockStateOverlay`] is the only writer. A background persistence task reads
//! through a [`SnapshotHandle`], which copies a region under a short read lock
//! and never observes a half-applied batch.

use crate::error::OverlayError;
use overgrow_core::{BlockPos, BlockStateRecord, PositionKey, WorldId};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Records of one world, keyed by position.
/// BTreeMap keeps iteration (and therefore snapshots) in a stable order.
type Region = BTreeMap<BlockPos, BlockStateRecord>;
type Regions = BTreeMap<WorldId, Region>;

fn read_regions(lock: &RwLock<Regions>) -> RwLockReadGuard<'_, Regions> {
    // Writers never leave a region half-updated, so a poisoned map is still consistent.
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_regions(lock: &RwLock<Regions>) -> RwLockWriteGuard<'_, Regions> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Authoritative store of custom block records across all loaded worlds.
#[derive(Debug, Default)]
pub struct BlockStateOverlay {
    regions: Arc<RwLock<Regions>>,
}

impl BlockStateOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only handle for snapshotting from another thread.
    pub fn snapshot_handle(&self) -> SnapshotHandle {
        SnapshotHandle {
            regions: Arc::clone(&self.regions),
        }
    }

    /// Record at `pos`, if any.
    pub fn get(&self, world: WorldId, pos: BlockPos) -> Option<BlockStateRecord> {
        read_regions(&self.regions)
            .get(&world)
            .and_then(|region| region.get(&pos))
            .cloned()
    }

    /// Returns true when a record exists at `pos`.
    pub fn contains(&self, world: WorldId, pos: BlockPos) -> bool {
        read_regions(&self.regions)
            .get(&world)
            .is_some_and(|region| region.contains_key(&pos))
    }

    /// Insert a record at an empty position.
    ///
    /// An occupied position is left untouched and reported as
    /// [`OverlayError::Conflict`].
    pub fn put(
        &mut self,
        world: WorldId,
        pos: BlockPos,
        record: BlockStateRecord,
    ) -> Result<(), OverlayError> {
        let mut regions = write_regions(&self.regions);
        let region = regions.entry(world).or_default();
        if let Some(existing) = region.get(&pos) {
            return Err(OverlayError::Conflict {
                key: PositionKey::new(world, pos),
                existing: existing.kind(),
            });
        }
        debug!(%world, %pos, kind = %record.kind(), "overlay put");
        region.insert(pos, record);
        Ok(())
    }

    /// Remove and return the record at `pos`; no-op when absent.
    pub fn remove(&mut self, world: WorldId, pos: BlockPos) -> Option<BlockStateRecord> {
        let mut regions = write_regions(&self.regions);
        let removed = remove_from(&mut regions, world, pos);
        if removed.is_some() {
            debug!(%world, %pos, "overlay remove");
        }
        removed
    }

    /// Remove every listed position under a single lock acquisition.
    ///
    /// Snapshot readers see either none or all of the removals. Returns the
    /// records that were actually present, in the order given.
    pub fn remove_many(
        &mut self,
        world: WorldId,
        positions: &[BlockPos],
    ) -> Vec<(BlockPos, BlockStateRecord)> {
        let mut regions = write_regions(&self.regions);
        let removed: Vec<_> = positions
            .iter()
            .filter_map(|&pos| remove_from(&mut regions, world, pos).map(|record| (pos, record)))
            .collect();
        debug!(%world, count = removed.len(), "overlay batch remove");
        removed
    }

    /// Atomic read-modify-write of the record at `pos`.
    pub fn mutate<F>(&mut self, world: WorldId, pos: BlockPos, f: F) -> Result<(), OverlayError>
    where
        F: FnOnce(BlockStateRecord) -> BlockStateRecord,
    {
        let mut regions = write_regions(&self.regions);
        let slot = regions
            .get_mut(&world)
            .and_then(|region| region.get_mut(&pos))
            .ok_or(OverlayError::NotFound {
                key: PositionKey::new(world, pos),
            })?;
        let current = slot.clone();
        *slot = f(current);
        Ok(())
    }

    /// Discard every record of `world` in one step. Returns how many were dropped.
    pub fn drop_world(&mut self, world: WorldId) -> usize {
        let dropped = write_regions(&self.regions)
            .remove(&world)
            .map_or(0, |region| region.len());
        debug!(%world, dropped, "overlay world dropped");
        dropped
    }

    /// Immutable copy of one world's records.
    pub fn snapshot(&self, world: WorldId) -> Option<RegionSnapshot> {
        snapshot_region(&read_regions(&self.regions), world)
    }

    /// Total number of records across all worlds.
    pub fn len(&self) -> usize {
        read_regions(&self.regions).values().map(Region::len).sum()
    }

    /// Returns true when no world holds any record.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of records in one world.
    pub fn world_len(&self, world: WorldId) -> usize {
        read_regions(&self.regions)
            .get(&world)
            .map_or(0, Region::len)
    }

    /// Worlds that currently hold at least one record.
    pub fn worlds(&self) -> Vec<WorldId> {
        read_regions(&self.regions).keys().copied().collect()
    }
}

fn remove_from(regions: &mut Regions, world: WorldId, pos: BlockPos) -> Option<BlockStateRecord> {
    let region = regions.get_mut(&world)?;
    let removed = region.remove(&pos);
    if region.is_empty() {
        regions.remove(&world);
    }
    removed
}

fn snapshot_region(regions: &Regions, world: WorldId) -> Option<RegionSnapshot> {
    regions.get(&world).map(|region| RegionSnapshot {
        world,
        entries: region
            .iter()
            .map(|(pos, record)| SnapshotEntry {
                pos: *pos,
                record: record.clone(),
            })
            .collect(),
    })
}

/// Read-only view of the overlay for persistence tasks.
#[derive(Debug, Clone)]
pub struct SnapshotHandle {
    regions: Arc<RwLock<Regions>>,
}

impl SnapshotHandle {
    /// Immutable copy of one world's records.
    pub fn snapshot(&self, world: WorldId) -> Option<RegionSnapshot> {
        snapshot_region(&read_regions(&self.regions), world)
    }

    /// Copies of every world, taken under one read lock.
    pub fn snapshot_all(&self) -> Vec<RegionSnapshot> {
        let regions = read_regions(&self.regions);
        regions
            .keys()
            .filter_map(|world| snapshot_region(&regions, *world))
            .collect()
    }
}

/// One position and its record inside a [`RegionSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub pos: BlockPos,
    pub record: BlockStateRecord,
}

/// Point-in-time copy of a world's overlay region, sorted by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSnapshot {
    world: WorldId,
    entries: Vec<SnapshotEntry>,
}

impl RegionSnapshot {
    /// World the snapshot was taken from.
    pub fn world(&self) -> WorldId {
        self.world
    }

    /// Record at `pos` at snapshot time.
    pub fn get(&self, pos: BlockPos) -> Option<&BlockStateRecord> {
        self.entries
            .binary_search_by_key(&pos, |entry| entry.pos)
            .ok()
            .map(|index| &self.entries[index].record)
    }

    /// Entries in position order.
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Number of records captured.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the region was empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use overgrow_core::{CropState, GlassState, PotState, RegistryKey};

    const OVERWORLD: WorldId = WorldId::new(0);
    const NETHER: WorldId = WorldId::new(1);

    fn crop(point: u32) -> BlockStateRecord {
        BlockStateRecord::Crop(CropState {
            config_id: RegistryKey::parse("tomato").unwrap(),
            point,
        })
    }

    fn pot() -> BlockStateRecord {
        BlockStateRecord::Pot(PotState {
            config_id: RegistryKey::parse("clay_pot").unwrap(),
            water_level: 0,
            fertilizer: None,
        })
    }

    #[test]
    fn put_then_get_returns_record() {
        let mut overlay = BlockStateOverlay::new();
        let pos = BlockPos::new(1, 64, 1);
        overlay.put(OVERWORLD, pos, crop(3)).unwrap();
        assert_eq!(overlay.get(OVERWORLD, pos), Some(crop(3)));
        assert!(overlay.contains(OVERWORLD, pos));
        assert!(overlay.get(NETHER, pos).is_none());
    }

    #[test]
    fn put_on_occupied_position_conflicts_and_keeps_original() {
        let mut overlay = BlockStateOverlay::new();
        let pos = BlockPos::new(0, 70, 0);
        overlay.put(OVERWORLD, pos, crop(5)).unwrap();

        let err = overlay.put(OVERWORLD, pos, pot()).unwrap_err();
        assert_eq!(
            err,
            OverlayError::Conflict {
                key: PositionKey::new(OVERWORLD, pos),
                existing: overgrow_core::MechanicKind::Crop,
            }
        );
        assert_eq!(err.to_string(), "crop record already present at world#0@(0, 70, 0)");
        assert_eq!(overlay.get(OVERWORLD, pos), Some(crop(5)));
        assert_eq!(overlay.len(), 1);
    }

    #[test]
    fn remove_returns_prior_record_and_is_noop_when_absent() {
        let mut overlay = BlockStateOverlay::new();
        let pos = BlockPos::new(2, 2, 2);
        assert!(overlay.remove(OVERWORLD, pos).is_none());
        overlay.put(OVERWORLD, pos, pot()).unwrap();
        assert_eq!(overlay.remove(OVERWORLD, pos), Some(pot()));
        assert!(overlay.remove(OVERWORLD, pos).is_none());
        assert!(overlay.is_empty());
        assert!(overlay.worlds().is_empty());
    }

    #[test]
    fn mutate_updates_in_place_or_reports_missing() {
        let mut overlay = BlockStateOverlay::new();
        let pos = BlockPos::new(4, 64, 4);
        overlay.put(OVERWORLD, pos, crop(1)).unwrap();

        overlay
            .mutate(OVERWORLD, pos, |record| match record {
                BlockStateRecord::Crop(mut state) => {
                    state.point += 9;
                    BlockStateRecord::Crop(state)
                }
                other => other,
            })
            .unwrap();
        assert_eq!(overlay.get(OVERWORLD, pos), Some(crop(10)));

        let missing = BlockPos::new(9, 9, 9);
        assert_eq!(
            overlay.mutate(OVERWORLD, missing, |record| record),
            Err(OverlayError::NotFound {
                key: PositionKey::new(OVERWORLD, missing),
            })
        );
    }

    #[test]
    fn drop_world_only_affects_that_world() {
        let mut overlay = BlockStateOverlay::new();
        let a = BlockPos::new(0, 64, 0);
        let b = BlockPos::new(1, 64, 0);
        overlay.put(OVERWORLD, a, crop(0)).unwrap();
        overlay.put(OVERWORLD, b, pot()).unwrap();
        overlay.put(NETHER, a, crop(7)).unwrap();

        assert_eq!(overlay.drop_world(OVERWORLD), 2);
        assert!(overlay.get(OVERWORLD, a).is_none());
        assert!(overlay.get(OVERWORLD, b).is_none());
        assert_eq!(overlay.get(NETHER, a), Some(crop(7)));
        assert_eq!(overlay.drop_world(OVERWORLD), 0);
    }

    #[test]
    fn remove_many_skips_absent_positions() {
        let mut overlay = BlockStateOverlay::new();
        let a = BlockPos::new(0, 1, 0);
        let b = BlockPos::new(0, 2, 0);
        overlay.put(OVERWORLD, a, crop(0)).unwrap();
        let removed = overlay.remove_many(OVERWORLD, &[a, b]);
        assert_eq!(removed, vec![(a, crop(0))]);
        assert_eq!(overlay.world_len(OVERWORLD), 0);
    }

    #[test]
    fn snapshot_is_detached_from_later_mutations() {
        let mut overlay = BlockStateOverlay::new();
        let handle = overlay.snapshot_handle();
        let pos = BlockPos::new(-3, 80, 12);
        let glass = BlockStateRecord::GreenhouseGlass(GlassState {
            config_id: RegistryKey::parse("greenhouse_glass").unwrap(),
        });
        overlay.put(OVERWORLD, pos, glass.clone()).unwrap();

        let snapshot = handle.snapshot(OVERWORLD).expect("region exists");
        overlay.remove(OVERWORLD, pos);

        assert_eq!(snapshot.world(), OVERWORLD);
        assert_eq!(snapshot.get(pos), Some(&glass));
        assert!(handle.snapshot(OVERWORLD).is_none());
    }

    #[test]
    fn snapshot_handle_is_usable_from_another_thread() {
        let mut overlay = BlockStateOverlay::new();
        for x in 0..16 {
            overlay
                .put(NETHER, BlockPos::new(x, 64, 0), crop(x as u32))
                .unwrap();
        }
        let handle = overlay.snapshot_handle();
        let len = std::thread::spawn(move || {
            handle
                .snapshot_all()
                .iter()
                .map(RegionSnapshot::len)
                .sum::<usize>()
        })
        .join()
        .unwrap();
        assert_eq!(len, 16);
    }

    #[test]
    fn snapshot_serializes_tagged_records_in_position_order() {
        let mut overlay = BlockStateOverlay::new();
        overlay.put(OVERWORLD, BlockPos::new(5, 64, 0), pot()).unwrap();
        overlay.put(OVERWORLD, BlockPos::new(-5, 64, 0), crop(12)).unwrap();

        let json = serde_json::to_value(overlay.snapshot(OVERWORLD).unwrap()).unwrap();
        assert_eq!(json["world"], 0);
        assert_eq!(json["entries"][0]["pos"]["x"], -5);
        assert_eq!(json["entries"][0]["record"]["kind"], "crop");
        assert_eq!(json["entries"][0]["record"]["point"], 12);
        assert_eq!(json["entries"][1]["record"]["kind"], "pot");
        assert_eq!(json["entries"][1]["record"]["config_id"], "overgrow:clay_pot");
    }
}
