// Bounded breadth-first flood fill over the voxel grid.
//
// Discovers the connected set of cells reachable from a seed, where each step
// to a face-adjacent neighbor is gated by a caller-supplied predicate
// `(grid, neighbor, direction) -> passable`. Stops once `limit` cells have
// been recorded or the frontier is exhausted.
//
// ## Algorithm
//
// FIFO queue of packed coordinates (`VoxelCoord::pack`) plus an insertion-
// ordered visited set (`FilledRegion`):
//   1. Enqueue the seed. The seed is never tested by the predicate.
//   2. While the queue is non-empty and fewer than `limit` cells are visited:
//      dequeue, skip if already visited, record, then for each direction in
//      `FaceDirection::ALL` ask the predicate about the neighbor and enqueue
//      it if approved and not yet visited.
//   3. Return the visited set.
//
// Dedup happens at dequeue time. A cell can be enqueued once per incoming
// direction before it is first visited; later copies are skipped.
//
// `direction` passed to the predicate is the direction of travel from the
// expanding cell toward the neighbor.
//
// Neighbors outside the packable coordinate range are never queried or
// enqueued. A seed outside that range yields a region holding only the seed,
// flagged truncated when `limit > 1` since its neighbors were never explored.
//
// ## Errors
//
// Predicates return `Result<bool, E>`. The first `Err` aborts the fill and is
// returned unchanged; no partial region is produced. `flood_fill` is the
// infallible form for `bool` predicates.
//
// ## Instrumentation
//
// Each run is wrapped in a `sealfill_flood_fill` tracing span. The span guard
// is dropped on every exit path, including error returns.
//
// See also: `seal.rs` for the reference `full_seal` predicate, `types.rs` for
// the packed coordinate layout, `config.rs` for `FillParams`.
//
// **Critical constraint: determinism.** For a pure predicate, the result
// (including order) depends only on grid state, seed, and limit. The visited
// index uses `FxHashSet`, which has no per-process random state, and is only
// used for membership; order comes from the `cells` vector.

use crate::config::FillParams;
use crate::types::{FaceDirection, VoxelCoord};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::convert::Infallible;

// ---------------------------------------------------------------------------
// Result set
// ---------------------------------------------------------------------------

/// Cells discovered by a flood fill, in first-visited order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilledRegion {
    cells: Vec<VoxelCoord>,
    index: FxHashSet<VoxelCoord>,
    truncated: bool,
}

impl FilledRegion {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
            index: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
            truncated: false,
        }
    }

    /// Record `coord`. Returns `false` if it was already present.
    fn insert(&mut self, coord: VoxelCoord) -> bool {
        if !self.index.insert(coord) {
            return false;
        }
        self.cells.push(coord);
        true
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.index.contains(&coord)
    }

    /// All cells in first-visited order.
    pub fn cells(&self) -> &[VoxelCoord] {
        &self.cells
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VoxelCoord> {
        self.cells.iter()
    }

    /// The first cell visited, i.e. the seed. `None` for an empty region.
    pub fn seed(&self) -> Option<VoxelCoord> {
        self.cells.first().copied()
    }

    /// True when the fill hit its limit while unvisited, predicate-approved
    /// cells were still queued, or when the seed could not be expanded at
    /// all. A truncated region is a lower bound on the real connected set.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_cells(self) -> Vec<VoxelCoord> {
        self.cells
    }
}

impl<'a> IntoIterator for &'a FilledRegion {
    type Item = &'a VoxelCoord;
    type IntoIter = std::slice::Iter<'a, VoxelCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Flood-fill runner that keeps its queue allocation between runs.
///
/// Each run is independent; only the queue's backing storage is reused.
#[derive(Clone, Debug)]
pub struct FloodFiller {
    queue: VecDeque<u64>,
    /// Upper bound on up-front allocation for large limits.
    initial_capacity: usize,
}

impl Default for FloodFiller {
    fn default() -> Self {
        Self::from_params(&FillParams::default())
    }
}

impl FloodFiller {
    /// A runner that preallocates at most `initial_capacity` queue and
    /// result slots per run.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            initial_capacity,
        }
    }

    pub fn from_params(params: &FillParams) -> Self {
        Self::with_capacity(params.initial_queue_capacity)
    }

    /// Run a fill with an infallible predicate.
    pub fn run<G, P>(
        &mut self,
        grid: &G,
        seed: VoxelCoord,
        limit: usize,
        mut predicate: P,
    ) -> FilledRegion
    where
        G: ?Sized,
        P: FnMut(&G, VoxelCoord, FaceDirection) -> bool,
    {
        let Ok(region) = self.try_run(grid, seed, limit, |g, coord, dir| {
            Ok::<bool, Infallible>(predicate(g, coord, dir))
        });
        region
    }

    /// Run a fill with a fallible predicate. The first predicate error aborts
    /// the fill and is returned as-is.
    pub fn try_run<G, E, P>(
        &mut self,
        grid: &G,
        seed: VoxelCoord,
        limit: usize,
        mut predicate: P,
    ) -> Result<FilledRegion, E>
    where
        G: ?Sized,
        P: FnMut(&G, VoxelCoord, FaceDirection) -> Result<bool, E>,
    {
        let _span = tracing::debug_span!("sealfill_flood_fill", seed = %seed, limit).entered();

        let capacity = limit.min(self.initial_capacity);
        let mut region = FilledRegion::with_capacity(capacity);
        if limit == 0 {
            tracing::debug!("limit is zero, nothing to fill");
            return Ok(region);
        }
        if !seed.is_packable() {
            tracing::warn!(%seed, "seed outside packable range, not expanding");
            region.insert(seed);
            region.truncated = limit > 1;
            return Ok(region);
        }

        self.queue.clear();
        self.queue.reserve(capacity);
        self.queue.push_back(seed.pack());

        while region.len() < limit {
            let Some(packed) = self.queue.pop_front() else {
                break;
            };
            let coord = VoxelCoord::unpack(packed);
            if !region.insert(coord) {
                continue;
            }

            for direction in FaceDirection::ALL {
                let Some(neighbor) = coord
                    .checked_relative(direction)
                    .filter(|n| n.is_packable())
                else {
                    tracing::trace!(%coord, ?direction, "neighbor outside packable range");
                    continue;
                };
                if !predicate(grid, neighbor, direction)? {
                    continue;
                }
                if !region.contains(neighbor) {
                    self.queue.push_back(neighbor.pack());
                }
            }
        }

        region.truncated = region.len() >= limit
            && self
                .queue
                .iter()
                .any(|&packed| !region.contains(VoxelCoord::unpack(packed)));
        self.queue.clear();

        tracing::debug!(
            cells = region.len(),
            truncated = region.truncated,
            "flood fill finished"
        );
        Ok(region)
    }
}

// ---------------------------------------------------------------------------
// Free-function entry points
// ---------------------------------------------------------------------------

/// Flood fill from `seed` with an infallible predicate, visiting at most
/// `limit` cells. `limit == 0` returns an empty region.
pub fn flood_fill<G, P>(grid: &G, seed: VoxelCoord, limit: usize, predicate: P) -> FilledRegion
where
    G: ?Sized,
    P: FnMut(&G, VoxelCoord, FaceDirection) -> bool,
{
    FloodFiller::default().run(grid, seed, limit, predicate)
}

/// Flood fill from `seed` with a fallible predicate. See
/// [`FloodFiller::try_run`].
pub fn try_flood_fill<G, E, P>(
    grid: &G,
    seed: VoxelCoord,
    limit: usize,
    predicate: P,
) -> Result<FilledRegion, E>
where
    G: ?Sized,
    P: FnMut(&G, VoxelCoord, FaceDirection) -> Result<bool, E>,
{
    FloodFiller::default().try_run(grid, seed, limit, predicate)
}

/// Independent fills for many seeds over one read-only grid, run in
/// parallel. Results come back in seed order. If any fill fails, the error
/// from the earliest failing seed is returned.
///
/// Each worker thread reuses one `FloodFiller` across the seeds it handles.
pub fn flood_fill_many<G, E, P>(
    grid: &G,
    seeds: &[VoxelCoord],
    limit: usize,
    predicate: P,
) -> Result<Vec<FilledRegion>, E>
where
    G: Sync + ?Sized,
    E: Send,
    P: Fn(&G, VoxelCoord, FaceDirection) -> Result<bool, E> + Sync,
{
    let results: Vec<Result<FilledRegion, E>> = seeds
        .par_iter()
        .map_init(FloodFiller::default, |filler, &seed| {
            filler.try_run(grid, seed, limit, &predicate)
        })
        .collect();
    results.into_iter().collect()
}
