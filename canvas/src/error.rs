//! Error type shared by the parsing, config, and persistence paths.

/// Error returned when engine input cannot be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    /// A point pair in a point string was not `x,y` with two finite numbers.
    #[error("invalid point `{0}`")]
    InvalidPoint(String),
    /// A point string contained no points at all.
    #[error("point list is empty")]
    EmptyPoints,
    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// JSON could not be encoded or decoded.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
