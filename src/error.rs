//! Error types for configuration, route loading and file watching

use std::path::PathBuf;

/// Invalid affine configuration; fatal at startup
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("affine scale must be greater than zero, got {0}")]
    NonPositiveScale(f64),
    #[error("affine parameter `{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// Failure to produce a route snapshot from the route document
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode route document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure to establish or keep the route file watch
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("route path {} has no file name", .0.display())]
    NoFileName(PathBuf),
    #[error(transparent)]
    Notify(#[from] notify::Error),
    #[error("failed to spawn watcher thread: {0}")]
    Spawn(#[source] std::io::Error),
}
