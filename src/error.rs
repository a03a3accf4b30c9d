//! Error types.
//!
//! [`SearchError`] covers everything that can go wrong while talking to a
//! search backend.  It never escapes [`crate::provider::SearchProvider::search`];
//! a failing source is logged and treated as "no results".

use thiserror::Error;

/// Failure of a single search attempt (one source or one mirror).
#[derive(Debug, Error)]
pub enum SearchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Connection, DNS, TLS or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    /// The body was not the JSON we expected.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The results page carried no embedded data blob.
    #[error("embedded data marker not found")]
    MarkerNotFound,

    /// The embedded data did not have the expected nesting.
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

impl From<ureq::Error> for SearchError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => SearchError::Status(code),
            ureq::Error::Transport(t) => SearchError::Transport(t.to_string()),
        }
    }
}

/// Failure loading or saving the defaults file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("HOME environment variable not set")]
    HomeNotSet,

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
