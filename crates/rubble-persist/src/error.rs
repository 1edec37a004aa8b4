use rubble_core::error::CoreError;

/// Errors that can occur while exporting or importing voxel snapshots.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot must be a JSON array of voxels")]
    NotAnArray,

    #[error("voxel {index} has neither a numeric 'color' nor a 'c' hex string")]
    MissingColor { index: usize },

    #[error("voxel {index}: {source}")]
    BadColor {
        index: usize,
        #[source]
        source: CoreError,
    },
}
