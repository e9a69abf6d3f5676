//! Error types for churros-graphs
//!
//! Every failure is fatal for a run: errors propagate with `?` up to `main`,
//! which prints them and exits. Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for churros-graphs operations
pub type Result<T> = std::result::Result<T, ChurrosGraphsError>;

/// Error type for churros-graphs operations
#[derive(Error, Debug)]
pub enum ChurrosGraphsError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query transport failures (non-success status, missing `data`)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response payload does not have the expected shape
    #[error("Unexpected response shape: {0}")]
    Shape(String),

    /// Response cache could not be read or written
    #[error("Cache I/O error: {0}")]
    CacheIo(String),

    /// Query text violates the named-operation convention
    #[error("Query error: {0}")]
    Query(String),

    /// Graphviz rendering errors
    #[error("Render error: {0}")]
    Render(#[from] graphviz::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChurrosGraphsError::Shape("missing field `groups`".to_string());
        assert_eq!(
            err.to_string(),
            "Unexpected response shape: missing field `groups`"
        );

        let err = ChurrosGraphsError::CacheIo("querycache.json: denied".to_string());
        assert!(err.to_string().starts_with("Cache I/O error"));
    }

    #[test]
    fn test_render_error_conversion() {
        let err: ChurrosGraphsError = graphviz::Error::NotInstalled.into();
        assert!(matches!(err, ChurrosGraphsError::Render(_)));
        assert!(err.to_string().contains("not installed"));
    }
}
