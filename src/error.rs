use std::path::PathBuf;

/// Errors raised while setting up the hero scene
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("drawing surface `{id}` not found")]
    SurfaceNotFound { id: String },

    #[error("GPU setup failed: {0}")]
    Gpu(String),

    #[error("failed to read config {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

pub type SceneResult<T> = std::result::Result<T, SceneError>;
