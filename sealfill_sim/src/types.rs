// Core types shared across the crate.
//
// Defines spatial coordinates (`VoxelCoord`) with their compact 64-bit packed
// form, the six face directions (`FaceDirection`) and their axes (`Axis`),
// and the coarse block classification (`BlockKind`) that seal predicates read
// before falling back to collision geometry.
//
// See also: `shape.rs` for the per-voxel collision geometry, `flood_fill.rs`
// which queues packed coordinates, `seal.rs` which consumes `BlockKind`.
//
// **Critical constraint: determinism.** `FaceDirection::ALL` has a fixed
// order and the flood fill expands neighbors in exactly that order. Changing
// it changes discovery order.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// Number of bits used for X and Z in the packed form.
const PACKED_HORIZONTAL_BITS: u32 = 26;
/// Number of bits used for Y in the packed form.
const PACKED_VERTICAL_BITS: u32 = 12;

const PACKED_X_SHIFT: u32 = PACKED_VERTICAL_BITS + PACKED_HORIZONTAL_BITS;
const PACKED_Z_SHIFT: u32 = PACKED_VERTICAL_BITS;

const PACKED_HORIZONTAL_MASK: u64 = (1 << PACKED_HORIZONTAL_BITS) - 1;
const PACKED_VERTICAL_MASK: u64 = (1 << PACKED_VERTICAL_BITS) - 1;

/// A position in the 3D voxel grid. Each component is in voxel units.
///
/// The coordinate system uses right-handed conventions:
/// - X: east  (positive) / west  (negative)
/// - Y: up    (positive) / down  (negative)
/// - Z: south (positive) / north (negative)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    /// Smallest packable X/Z component.
    pub const MIN_HORIZONTAL: i32 = -(1 << (PACKED_HORIZONTAL_BITS - 1));
    /// Largest packable X/Z component.
    pub const MAX_HORIZONTAL: i32 = (1 << (PACKED_HORIZONTAL_BITS - 1)) - 1;
    /// Smallest packable Y component.
    pub const MIN_VERTICAL: i32 = -(1 << (PACKED_VERTICAL_BITS - 1));
    /// Largest packable Y component.
    pub const MAX_VERTICAL: i32 = (1 << (PACKED_VERTICAL_BITS - 1)) - 1;

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The face-adjacent coordinate one step in `direction`. Wraps around at
    /// the `i32` extremes; see `checked_relative`.
    pub fn relative(self, direction: FaceDirection) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self::new(
            self.x.wrapping_add(dx),
            self.y.wrapping_add(dy),
            self.z.wrapping_add(dz),
        )
    }

    /// The face-adjacent coordinate one step in `direction`, or `None` if a
    /// component would leave the `i32` range.
    pub fn checked_relative(self, direction: FaceDirection) -> Option<Self> {
        let (dx, dy, dz) = direction.offset();
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// Whether this coordinate survives a `pack()`/`unpack()` round trip.
    pub fn is_packable(self) -> bool {
        (Self::MIN_HORIZONTAL..=Self::MAX_HORIZONTAL).contains(&self.x)
            && (Self::MIN_HORIZONTAL..=Self::MAX_HORIZONTAL).contains(&self.z)
            && (Self::MIN_VERTICAL..=Self::MAX_VERTICAL).contains(&self.y)
    }

    /// Pack into a single `u64`: X in bits 38..64, Z in bits 12..38, Y in
    /// bits 0..12, each field two's complement.
    ///
    /// Only lossless for coordinates where `is_packable()` holds; outside
    /// that range the high bits of each component are discarded.
    pub fn pack(self) -> u64 {
        debug_assert!(self.is_packable(), "pack: {self} outside packable range");
        ((self.x as u64 & PACKED_HORIZONTAL_MASK) << PACKED_X_SHIFT)
            | ((self.z as u64 & PACKED_HORIZONTAL_MASK) << PACKED_Z_SHIFT)
            | (self.y as u64 & PACKED_VERTICAL_MASK)
    }

    /// Inverse of `pack()`. Sign-extends each field.
    pub fn unpack(packed: u64) -> Self {
        let packed = packed as i64;
        Self {
            x: (packed >> PACKED_X_SHIFT) as i32,
            z: ((packed << (64 - PACKED_X_SHIFT)) >> (64 - PACKED_HORIZONTAL_BITS)) as i32,
            y: ((packed << (64 - PACKED_VERTICAL_BITS)) >> (64 - PACKED_VERTICAL_BITS)) as i32,
        }
    }
}

impl fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// Axes and face directions
// ---------------------------------------------------------------------------

/// One of the three grid axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index into `[x, y, z]` component arrays.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The two axes spanning the plane perpendicular to this one.
    pub const fn perpendicular(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }
}

/// One of the six faces of a voxel, named by the direction it points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceDirection {
    /// -Y
    Down,
    /// +Y
    Up,
    /// -Z
    North,
    /// +Z
    South,
    /// -X
    West,
    /// +X
    East,
}

impl FaceDirection {
    /// All six directions in neighbor expansion order.
    pub const ALL: [FaceDirection; 6] = [
        FaceDirection::Down,
        FaceDirection::Up,
        FaceDirection::North,
        FaceDirection::South,
        FaceDirection::West,
        FaceDirection::East,
    ];

    pub const fn axis(self) -> Axis {
        match self {
            FaceDirection::Down | FaceDirection::Up => Axis::Y,
            FaceDirection::North | FaceDirection::South => Axis::Z,
            FaceDirection::West | FaceDirection::East => Axis::X,
        }
    }

    /// True for +X, +Y, +Z.
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            FaceDirection::Up | FaceDirection::South | FaceDirection::East
        )
    }

    /// Unit step `(dx, dy, dz)` in this direction.
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            FaceDirection::Down => (0, -1, 0),
            FaceDirection::Up => (0, 1, 0),
            FaceDirection::North => (0, 0, -1),
            FaceDirection::South => (0, 0, 1),
            FaceDirection::West => (-1, 0, 0),
            FaceDirection::East => (1, 0, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            FaceDirection::Down => FaceDirection::Up,
            FaceDirection::Up => FaceDirection::Down,
            FaceDirection::North => FaceDirection::South,
            FaceDirection::South => FaceDirection::North,
            FaceDirection::West => FaceDirection::East,
            FaceDirection::East => FaceDirection::West,
        }
    }
}

// ---------------------------------------------------------------------------
// Block classification
// ---------------------------------------------------------------------------

/// Coarse classification a seal predicate checks before looking at geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Empty space. Always passable.
    Air,
    /// Explicitly lets the fill through regardless of shape (grates, vents).
    PassesFill,
    /// Explicitly stops the fill regardless of shape (sealed bulkheads).
    BlocksFill,
    /// Decided by collision geometry.
    Other,
}
