// sealfill_sim: bounded flood fill for sealed-volume detection.
//
// This crate discovers the connected set of open cells around a seed in a 3D
// voxel grid, capped at a fixed size, with passability decided per face by a
// pluggable predicate. The reference predicate (`seal::full_seal`) analyzes
// each voxel's collision geometry to decide whether the face being crossed is
// fully covered. Consumers (atmosphere, oxygen, light-like spread) decide
// what to do with the resulting region; that logic lives elsewhere.
//
// Module overview:
// - `types.rs`:      VoxelCoord (+ 64-bit packing), Axis, FaceDirection, BlockKind.
// - `shape.rs`:      Bounds, SolidShape, and the lazy per-face projection.
// - `sturdiness.rs`: Face coverage tests (is a face fully sealed?).
// - `flood_fill.rs`: Bounded BFS engine, FilledRegion, FloodFiller, parallel batch fill.
// - `seal.rs`:       SealGrid trait + the `full_seal` reference predicate.
// - `world.rs`:      Dense in-memory VoxelWorld implementing SealGrid.
// - `config.rs`:     SealConfig (FillParams + WorldParams), loaded from JSON.
// - `error.rs`:      GridError, ConfigError, SealError.
//
// **Critical constraint: determinism.** A fill is a pure function of
// `(grid, seed, limit, predicate)` as long as the predicate is pure and the
// grid is not mutated during the run. Neighbor expansion order is fixed by
// `FaceDirection::ALL`.

pub mod config;
pub mod error;
pub mod flood_fill;
pub mod seal;
pub mod shape;
pub mod sturdiness;
pub mod types;
pub mod world;

pub use error::{Result, SealError};
