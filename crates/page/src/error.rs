use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or navigating a page.
#[derive(Debug, Error)]
pub enum PageError {
    /// The fixture file could not be read.
    #[error("failed to read page fixture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON fixture or script parse failure.
    #[error("invalid JSON fixture")]
    Json(#[from] serde_json::Error),
    /// YAML fixture or script parse failure.
    #[error("invalid YAML fixture")]
    Yaml(#[from] serde_yaml::Error),
    /// A location or link target that is not a valid URL.
    #[error("invalid page location '{url}': {source}")]
    InvalidLocation {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
