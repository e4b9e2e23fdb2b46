// Grid access for seal checks and the reference "full seal" predicate.
//
// `SealGrid` is the narrow read-only view of the world that seal predicates
// need: a block's coarse `BlockKind` and its collision `SolidShape`. Reads
// may fail (e.g. a sealed world refusing out-of-bounds reads); failures are
// `GridError`s and abort the fill that triggered them.
//
// `full_seal()` decides whether the fill may enter a cell, in order:
//   1. `Air` and `PassesFill` always pass; `BlocksFill` never does.
//   2. An empty collision shape passes.
//   3. If the shape's envelope does not cover the plane perpendicular to the
//      approach axis, it cannot seal that axis: pass.
//   4. Otherwise pass unless the face pointing in the approach direction is
//      sturdy. A face the shape presents nothing on is sturdy, so it blocks.
//
// `direction` is always the direction of travel, from the expanding cell
// toward `coord`; the face tested is the one pointing that way.
//
// See also: `sturdiness.rs` for steps 3 and 4, `flood_fill.rs` for the engine
// that calls this per edge, `world.rs` for the stock `SealGrid`.

use crate::config::FillParams;
use crate::error::{GridError, Result};
use crate::flood_fill::{FilledRegion, FloodFiller};
use crate::shape::SolidShape;
use crate::sturdiness::{is_face_sturdy, is_side_solid};
use crate::types::{BlockKind, FaceDirection, VoxelCoord};

/// Read-only access to the blocking state of a voxel grid.
pub trait SealGrid {
    fn block_kind(&self, coord: VoxelCoord) -> std::result::Result<BlockKind, GridError>;

    fn solid_shape(&self, coord: VoxelCoord) -> std::result::Result<SolidShape, GridError>;
}

/// May the fill enter `coord` while travelling in `direction`?
pub fn full_seal<G: SealGrid + ?Sized>(
    grid: &G,
    coord: VoxelCoord,
    direction: FaceDirection,
) -> std::result::Result<bool, GridError> {
    match grid.block_kind(coord)? {
        BlockKind::Air | BlockKind::PassesFill => return Ok(true),
        BlockKind::BlocksFill => return Ok(false),
        BlockKind::Other => {}
    }
    let shape = grid.solid_shape(coord)?;
    if shape.is_empty() || !is_side_solid(&shape, direction.axis()) {
        return Ok(true);
    }
    Ok(!is_face_sturdy(&shape, direction))
}

/// Flood the sealed region around `seed` with `full_seal`, using the limit
/// and queue sizing from `params`.
pub fn sealed_region<G: SealGrid + ?Sized>(
    grid: &G,
    seed: VoxelCoord,
    params: &FillParams,
) -> Result<FilledRegion> {
    let mut filler = FloodFiller::from_params(params);
    Ok(filler.try_run(grid, seed, params.max_cells, full_seal)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Bounds;
    use std::collections::BTreeMap;

    /// Sparse test grid: unlisted cells are air.
    #[derive(Default)]
    struct SparseGrid {
        cells: BTreeMap<VoxelCoord, (BlockKind, SolidShape)>,
    }

    impl SparseGrid {
        fn with(mut self, coord: VoxelCoord, kind: BlockKind, shape: SolidShape) -> Self {
            self.cells.insert(coord, (kind, shape));
            self
        }
    }

    impl SealGrid for SparseGrid {
        fn block_kind(&self, coord: VoxelCoord) -> std::result::Result<BlockKind, GridError> {
            Ok(self.cells.get(&coord).map_or(BlockKind::Air, |(k, _)| *k))
        }

        fn solid_shape(&self, coord: VoxelCoord) -> std::result::Result<SolidShape, GridError> {
            Ok(self
                .cells
                .get(&coord)
                .map_or_else(SolidShape::empty, |(_, s)| s.clone()))
        }
    }

    /// Grid whose every read fails.
    struct BrokenGrid;

    impl SealGrid for BrokenGrid {
        fn block_kind(&self, coord: VoxelCoord) -> std::result::Result<BlockKind, GridError> {
            Err(GridError::OutOfBounds(coord))
        }

        fn solid_shape(&self, coord: VoxelCoord) -> std::result::Result<SolidShape, GridError> {
            Err(GridError::OutOfBounds(coord))
        }
    }

    const C: VoxelCoord = VoxelCoord::new(0, 0, 0);

    #[test]
    fn air_always_passes() {
        let grid = SparseGrid::default();
        for dir in FaceDirection::ALL {
            assert!(full_seal(&grid, C, dir).unwrap());
        }
    }

    #[test]
    fn kind_overrides_shape() {
        // A full cube tagged PassesFill still passes; an empty shape tagged
        // BlocksFill still blocks.
        let passes = SparseGrid::default().with(C, BlockKind::PassesFill, SolidShape::full_cube());
        let blocks = SparseGrid::default().with(C, BlockKind::BlocksFill, SolidShape::empty());
        for dir in FaceDirection::ALL {
            assert!(full_seal(&passes, C, dir).unwrap());
            assert!(!full_seal(&blocks, C, dir).unwrap());
        }
    }

    #[test]
    fn empty_shape_passes() {
        let grid = SparseGrid::default().with(C, BlockKind::Other, SolidShape::empty());
        for dir in FaceDirection::ALL {
            assert!(full_seal(&grid, C, dir).unwrap());
        }
    }

    #[test]
    fn full_cube_blocks_from_every_side() {
        let grid = SparseGrid::default().with(C, BlockKind::Other, SolidShape::full_cube());
        for dir in FaceDirection::ALL {
            assert!(!full_seal(&grid, C, dir).unwrap());
        }
    }

    #[test]
    fn slab_blocks_vertical_travel_both_ways() {
        let slab = SolidShape::cuboid([0.0, 0.0, 0.0], [1.0, 0.5, 1.0]);
        let grid = SparseGrid::default().with(C, BlockKind::Other, slab);
        // Moving down into the slab tests its bottom face, which is sturdy.
        assert!(!full_seal(&grid, C, FaceDirection::Down).unwrap());
        // Moving up tests the top face. Nothing reaches it, which also seals.
        assert!(!full_seal(&grid, C, FaceDirection::Up).unwrap());
        // Horizontal envelope never covers the side plane.
        assert!(full_seal(&grid, C, FaceDirection::East).unwrap());
        assert!(full_seal(&grid, C, FaceDirection::North).unwrap());
    }

    #[test]
    fn top_slab_blocks_travel_moving_down() {
        let top = SolidShape::cuboid([0.0, 0.5, 0.0], [1.0, 1.0, 1.0]);
        let grid = SparseGrid::default().with(C, BlockKind::Other, top);
        assert!(!full_seal(&grid, C, FaceDirection::Down).unwrap());
        assert!(!full_seal(&grid, C, FaceDirection::Up).unwrap());
        assert!(full_seal(&grid, C, FaceDirection::West).unwrap());
    }

    #[test]
    fn post_passes_along_every_axis() {
        let post = SolidShape::cuboid([0.375, 0.0, 0.375], [0.625, 1.0, 0.625]);
        let grid = SparseGrid::default().with(C, BlockKind::Other, post);
        for dir in FaceDirection::ALL {
            assert!(full_seal(&grid, C, dir).unwrap(), "{dir:?}");
        }
    }

    #[test]
    fn multi_box_face_leaks() {
        let stairs = SolidShape::from_boxes([
            Bounds::new([0.0, 0.0, 0.0], [1.0, 0.5, 1.0]),
            Bounds::new([0.0, 0.5, 0.5], [1.0, 1.0, 1.0]),
        ]);
        let grid = SparseGrid::default().with(C, BlockKind::Other, stairs);
        assert!(full_seal(&grid, C, FaceDirection::South).unwrap());
        assert!(!full_seal(&grid, C, FaceDirection::Down).unwrap());
    }

    #[test]
    fn grid_errors_propagate() {
        assert_eq!(
            full_seal(&BrokenGrid, C, FaceDirection::Up),
            Err(GridError::OutOfBounds(C))
        );
    }

    #[test]
    fn sealed_region_surfaces_grid_errors() {
        let err = sealed_region(&BrokenGrid, C, &FillParams::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::SealError::Grid(GridError::OutOfBounds(_))
        ));
    }

    #[test]
    fn sealed_region_in_closed_box() {
        let mut grid = SparseGrid::default();
        for dir in FaceDirection::ALL {
            grid = grid.with(C.relative(dir), BlockKind::Other, SolidShape::full_cube());
        }
        let region = sealed_region(&grid, C, &FillParams::default()).unwrap();
        assert_eq!(region.cells(), &[C]);
    }
}
