//! Error types for the harvester.
//!
//! None of these are recovered from: each one ends the run.

use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum HarvestError {
    /// Transport failure, timeout, or a non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed body is not well-formed XML.
    #[error("Failed to parse feed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Content outside the root element, an unclosed element, or an unbound
    /// namespace prefix.
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HarvestError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::Xml(_) | Self::MalformedFeed(_))
    }
}

pub type HarvestResult<T> = Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = HarvestError::io(
            "/data/runs/raw.xml",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("/data/runs/raw.xml"));
        assert!(message.contains("denied"));
        assert!(!err.is_parse_error());
    }

    #[test]
    fn test_malformed_feed_is_parse_error() {
        let err = HarvestError::MalformedFeed("text after the root element".to_string());
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("after the root element"));
    }
}
