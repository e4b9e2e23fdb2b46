// Dense 3D voxel grid.
//
// The world is stored as a flat `Vec<VoxelType>` indexed by
// `x + z * size_x + y * size_x * size_z`, giving O(1) read/write access.
// Out-of-bounds writes are rejected. Out-of-bounds reads follow the world's
// `BoundaryPolicy`: `OpenAir` reads `Air` (fills escape into the void until
// their limit), `Sealed` fails with `GridError::OutOfBounds` (fills that
// reach the edge abort).
//
// Each `VoxelType` maps to a fixed `BlockKind` and collision `SolidShape`;
// `VoxelWorld` implements `SealGrid` on top of that mapping.
//
// See also: `seal.rs` for the `SealGrid` trait and `full_seal` predicate,
// `shape.rs` for the shape types, `config.rs` for `WorldParams`.
//
// **Critical constraint: determinism.** The flood fill assumes the grid does
// not change during a run. Do not mutate a world while a fill over it is in
// progress on another thread.

use crate::config::WorldParams;
use crate::error::GridError;
use crate::seal::SealGrid;
use crate::shape::{Bounds, SolidShape};
use crate::types::{BlockKind, VoxelCoord};
use serde::{Deserialize, Serialize};

/// The material/type of a single voxel in the world grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoxelType {
    #[default]
    Air,
    /// Full-cube structural plating.
    Hull,
    /// Bottom half-height plate.
    Slab,
    /// Top half-height plate.
    TopSlab,
    /// Full-cube grating. Solid to walk on, open to the fill.
    Grate,
    /// Sealed door. Blocks the fill regardless of shape.
    Bulkhead,
    /// Thin vertical pipe through the cell center.
    Pipe,
    /// Stair block rising toward +Z.
    Stair,
}

impl VoxelType {
    /// Coarse classification consulted before geometry.
    pub fn kind(self) -> BlockKind {
        match self {
            VoxelType::Air => BlockKind::Air,
            VoxelType::Grate => BlockKind::PassesFill,
            VoxelType::Bulkhead => BlockKind::BlocksFill,
            VoxelType::Hull
            | VoxelType::Slab
            | VoxelType::TopSlab
            | VoxelType::Pipe
            | VoxelType::Stair => BlockKind::Other,
        }
    }

    /// Collision geometry in the voxel's local unit space.
    pub fn collision_shape(self) -> SolidShape {
        match self {
            VoxelType::Air => SolidShape::empty(),
            VoxelType::Hull | VoxelType::Grate | VoxelType::Bulkhead => SolidShape::full_cube(),
            VoxelType::Slab => SolidShape::cuboid([0.0, 0.0, 0.0], [1.0, 0.5, 1.0]),
            VoxelType::TopSlab => SolidShape::cuboid([0.0, 0.5, 0.0], [1.0, 1.0, 1.0]),
            VoxelType::Pipe => SolidShape::cuboid([0.375, 0.0, 0.375], [0.625, 1.0, 0.625]),
            VoxelType::Stair => SolidShape::from_boxes([
                Bounds::new([0.0, 0.0, 0.0], [1.0, 0.5, 1.0]),
                Bounds::new([0.0, 0.5, 0.5], [1.0, 1.0, 1.0]),
            ]),
        }
    }
}

/// What a world returns for reads outside its bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryPolicy {
    /// Out-of-bounds cells read as `Air`.
    #[default]
    OpenAir,
    /// Out-of-bounds reads fail with `GridError::OutOfBounds`.
    Sealed,
}

/// Dense 3D voxel grid.
#[derive(Clone, Debug, Default)]
pub struct VoxelWorld {
    /// Flat storage: index = x + z * size_x + y * size_x * size_z.
    voxels: Vec<VoxelType>,
    pub size_x: u32,
    pub size_y: u32,
    pub size_z: u32,
    pub boundary: BoundaryPolicy,
}

impl VoxelWorld {
    /// An all-`Air` world with `OpenAir` boundaries.
    pub fn new(size_x: u32, size_y: u32, size_z: u32) -> Self {
        let cells: usize = [size_x, size_y, size_z]
            .into_iter()
            .map(|n| n as usize)
            .product();
        tracing::trace!(size_x, size_y, size_z, cells, "allocating voxel world");
        Self {
            voxels: vec![VoxelType::Air; cells],
            size_x,
            size_y,
            size_z,
            boundary: BoundaryPolicy::default(),
        }
    }

    /// Create an all-`Air` world from validated parameters.
    pub fn from_params(params: &WorldParams) -> Self {
        let [x, y, z] = params.size;
        Self::new(x, y, z).with_boundary(params.out_of_bounds)
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn in_bounds(&self, coord: VoxelCoord) -> bool {
        self.index(coord).is_some()
    }

    /// Flat storage slot for `coord`, or `None` outside the world.
    fn index(&self, coord: VoxelCoord) -> Option<usize> {
        let x = u32::try_from(coord.x).ok().filter(|&x| x < self.size_x)? as usize;
        let y = u32::try_from(coord.y).ok().filter(|&y| y < self.size_y)? as usize;
        let z = u32::try_from(coord.z).ok().filter(|&z| z < self.size_z)? as usize;
        let row = self.size_x as usize;
        let layer = row * self.size_z as usize;
        Some(x + z * row + y * layer)
    }

    /// Read a voxel, applying the boundary policy outside the world.
    pub fn try_get(&self, coord: VoxelCoord) -> Result<VoxelType, GridError> {
        match (self.index(coord), self.boundary) {
            (Some(i), _) => Ok(self.voxels[i]),
            (None, BoundaryPolicy::OpenAir) => Ok(VoxelType::Air),
            (None, BoundaryPolicy::Sealed) => Err(GridError::OutOfBounds(coord)),
        }
    }

    /// Write a voxel. Returns `false` and changes nothing outside the world.
    pub fn set(&mut self, coord: VoxelCoord, voxel: VoxelType) -> bool {
        let Some(i) = self.index(coord) else {
            return false;
        };
        self.voxels[i] = voxel;
        true
    }

    /// Set every voxel in the inclusive box spanned by `a` and `b`.
    /// Out-of-bounds parts are skipped.
    pub fn fill_box(&mut self, a: VoxelCoord, b: VoxelCoord, voxel: VoxelType) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for z in a.z.min(b.z)..=a.z.max(b.z) {
                for x in a.x.min(b.x)..=a.x.max(b.x) {
                    self.set(VoxelCoord::new(x, y, z), voxel);
                }
            }
        }
    }

    /// Set the one-voxel-thick shell of the inclusive box spanned by `a`
    /// and `b`, leaving the interior untouched.
    pub fn hollow_box(&mut self, a: VoxelCoord, b: VoxelCoord, voxel: VoxelType) {
        let (lo, hi) = (
            VoxelCoord::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            VoxelCoord::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        );
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                for x in lo.x..=hi.x {
                    let on_shell = x == lo.x
                        || x == hi.x
                        || y == lo.y
                        || y == hi.y
                        || z == lo.z
                        || z == hi.z;
                    if on_shell {
                        self.set(VoxelCoord::new(x, y, z), voxel);
                    }
                }
            }
        }
    }
}

impl SealGrid for VoxelWorld {
    fn block_kind(&self, coord: VoxelCoord) -> Result<BlockKind, GridError> {
        self.try_get(coord).map(VoxelType::kind)
    }

    fn solid_shape(&self, coord: VoxelCoord) -> Result<SolidShape, GridError> {
        self.try_get(coord).map(VoxelType::collision_shape)
    }
}
