//! Reader and configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Why a counter reader could not produce a value. Never fatal: the
/// aggregator degrades the affected snapshot field and moves on.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("command `{program}` failed: {detail}")]
    Command { program: String, detail: String },
    #[error("malformed {what}: {detail}")]
    Malformed { what: &'static str, detail: String },
    #[error("interface {0} not found in network counter table")]
    InterfaceNotFound(String),
    #[error("media server request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0} not configured")]
    NotConfigured(&'static str),
}

impl ReaderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(what: &'static str, detail: impl Into<String>) -> Self {
        Self::Malformed {
            what,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid port {value:?} in {source_name}")]
    InvalidPort {
        source_name: &'static str,
        value: String,
    },
}
