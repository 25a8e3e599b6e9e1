use nullspace_core::{MeshError, MeshKind};
use thiserror::Error;

/// Everything that can go wrong between a mesh request and a draw call.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("mesh generation failed: {0}")]
    Mesh(#[from] MeshError),
    /// The device refused to create one of the shared buffers.  Callers treat
    /// this as fatal.
    #[error("failed to upload {kind:?} buffers: {reason}")]
    Upload { kind: MeshKind, reason: String },
}
