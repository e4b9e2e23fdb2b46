// Error types.
//
// Limits of zero are not errors (the fill returns an empty region), and
// flood-fill predicates bring their own error type, which the engine returns
// unchanged. What lives here are the errors this crate itself raises: grid
// reads that leave a sealed world, and bad configuration.

use crate::types::VoxelCoord;
use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum SealError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while reading the voxel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("voxel {0} is outside the world")]
    OutOfBounds(VoxelCoord),
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("world size {size:?} exceeds the addressable range {limit:?}")]
    WorldTooLarge { size: [u32; 3], limit: [u32; 3] },
}

/// Convenience alias for results using [`SealError`].
pub type Result<T> = std::result::Result<T, SealError>;
