// Data-driven configuration.
//
// Tunable parameters live in `SealConfig`, loaded from JSON. Two groups:
// `FillParams` (flood-fill limit and queue sizing) and `WorldParams` (grid
// dimensions and out-of-bounds behavior for `VoxelWorld`). Every field has a
// default, so a config file only needs to name what it changes.
//
// See also: `flood_fill.rs` and `seal.rs` which read `FillParams`, `world.rs`
// which builds a `VoxelWorld` from `WorldParams`.
//
// **Critical constraint: determinism.** The fill limit directly bounds which
// cells a region contains. Callers comparing regions across processes must
// use identical configs.

use crate::error::{ConfigError, Result};
use crate::types::VoxelCoord;
use crate::world::BoundaryPolicy;
use serde::{Deserialize, Serialize};

/// Flood-fill parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillParams {
    /// Maximum number of cells a single fill may visit. Zero disables
    /// filling (every region is empty).
    pub max_cells: usize,
    /// Cap on per-run up-front allocation for the queue and result set.
    /// Runs with a larger `max_cells` grow on demand past this.
    pub initial_queue_capacity: usize,
}

impl Default for FillParams {
    fn default() -> Self {
        Self {
            max_cells: 2048,
            initial_queue_capacity: 4096,
        }
    }
}

/// Voxel world parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    /// World dimensions in voxels, `[x, y, z]`.
    pub size: [u32; 3],
    /// What reads outside `size` return.
    pub out_of_bounds: BoundaryPolicy,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            size: [64, 64, 64],
            out_of_bounds: BoundaryPolicy::OpenAir,
        }
    }
}

impl WorldParams {
    /// Largest world whose every cell, and every cell one step outside it,
    /// packs losslessly.
    pub const MAX_SIZE: [u32; 3] = [
        VoxelCoord::MAX_HORIZONTAL as u32,
        VoxelCoord::MAX_VERTICAL as u32,
        VoxelCoord::MAX_HORIZONTAL as u32,
    ];

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self
            .size
            .iter()
            .zip(Self::MAX_SIZE)
            .any(|(&size, max)| size > max)
        {
            return Err(ConfigError::WorldTooLarge {
                size: self.size,
                limit: Self::MAX_SIZE,
            });
        }
        Ok(())
    }
}

/// Complete configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SealConfig {
    pub fill: FillParams,
    pub world: WorldParams,
}

impl SealConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SealConfig = serde_json::from_str(json).map_err(ConfigError::from)?;
        config.validate()?;
        tracing::debug!(
            max_cells = config.fill.max_cells,
            size = ?config.world.size,
            "loaded seal config"
        );
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(ConfigError::from)?)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.world.validate()
    }
}
