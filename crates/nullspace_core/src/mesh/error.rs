use thiserror::Error;

use super::MeshKind;

/// Reasons a procedural mesh could not be generated or failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("grid dimensions must be even and non-zero (got {x_dim}x{z_dim})")]
    InvalidGridDimensions { x_dim: u32, z_dim: u32 },
    #[error("sphere needs at least one latitude and one longitude step (got {latitudes}x{longitudes})")]
    InvalidSphereSteps { latitudes: u32, longitudes: u32 },
    #[error("{kind:?} array of {what} elements does not fit in 32 bits")]
    TooLarge { kind: MeshKind, what: &'static str },
    #[error("mesh kind {0:?} has no generator")]
    Unsupported(MeshKind),
    #[error("index {index} at position {position} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        index: u32,
        position: usize,
        vertex_count: usize,
    },
}
