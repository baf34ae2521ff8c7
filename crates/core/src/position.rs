//! Block positions and orientation helpers.

use crate::world::WorldId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer block coordinate inside a single world.
///
/// Implements Ord (x, then y, then z) so overlay regions iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockPos {
    /// East-west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North-south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from raw coordinates.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Offset by the given deltas. `None` when a coordinate leaves the `i32` range.
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// The block directly above, if there is one.
    pub fn above(self) -> Option<Self> {
        self.offset(0, 1, 0)
    }

    /// The block directly below, if there is one.
    pub fn below(self) -> Option<Self> {
        self.offset(0, -1, 0)
    }

    /// The neighbour on the given face, if there is one.
    pub fn relative(self, facing: Facing) -> Option<Self> {
        let (dx, dy, dz) = facing.delta();
        self.offset(dx, dy, dz)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A block position qualified by the world it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionKey {
    /// Owning world.
    pub world: WorldId,
    /// Block coordinate within that world.
    pub pos: BlockPos,
}

impl PositionKey {
    /// Pair a world with a position.
    pub const fn new(world: WorldId, pos: BlockPos) -> Self {
        Self { world, pos }
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.world, self.pos)
    }
}

/// Direction a directional block (dispenser, piston) faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Facing {
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl Facing {
    /// Unit offset toward the faced neighbour. North is -Z, east is +X.
    pub const fn delta(self) -> (i32, i32, i32) {
        match self {
            Facing::Down => (0, -1, 0),
            Facing::Up => (0, 1, 0),
            Facing::North => (0, 0, -1),
            Facing::South => (0, 0, 1),
            Facing::West => (-1, 0, 0),
            Facing::East => (1, 0, 0),
        }
    }
}

/// Rotation of a furniture-style visual placed for a custom block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FurnitureRotation {
    /// No explicit rotation; the visual uses its default orientation.
    #[default]
    None,
    /// Facing north.
    North,
    /// Facing east.
    East,
    /// Facing south.
    South,
    /// Facing west.
    West,
}

impl FurnitureRotation {
    /// The four cardinal rotations, in clockwise order.
    pub const CARDINAL: [FurnitureRotation; 4] = [
        FurnitureRotation::North,
        FurnitureRotation::East,
        FurnitureRotation::South,
        FurnitureRotation::West,
    ];

    /// Pick a cardinal rotation uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::CARDINAL[rng.gen_range(0..Self::CARDINAL.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn relative_follows_facing() {
        let origin = BlockPos::new(10, 64, -3);
        assert_eq!(origin.relative(Facing::Up), Some(BlockPos::new(10, 65, -3)));
        assert_eq!(origin.relative(Facing::North), Some(BlockPos::new(10, 64, -4)));
        assert_eq!(origin.relative(Facing::East), Some(BlockPos::new(11, 64, -3)));
        assert_eq!(origin.above().and_then(BlockPos::below), Some(origin));
    }

    #[test]
    fn neighbours_past_the_coordinate_range_do_not_exist() {
        let top = BlockPos::new(i32::MIN, i32::MAX, 0);
        assert_eq!(top.above(), None);
        assert_eq!(top.relative(Facing::West), None);
        assert_eq!(top.below(), Some(BlockPos::new(i32::MIN, i32::MAX - 1, 0)));
    }

    #[test]
    fn positions_order_by_x_then_y_then_z() {
        let mut positions = vec![
            BlockPos::new(1, 0, 0),
            BlockPos::new(0, 5, 0),
            BlockPos::new(0, 0, 9),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                BlockPos::new(0, 0, 9),
                BlockPos::new(0, 5, 0),
                BlockPos::new(1, 0, 0),
            ]
        );
    }

    #[test]
    fn random_rotation_is_never_none() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..64 {
            assert_ne!(FurnitureRotation::random(&mut rng), FurnitureRotation::None);
        }
    }
}
