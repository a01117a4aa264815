//! # Tooling Error Types
//!
//! Unified error handling for metadata extraction, rendering and output.
//! Every stage returns one of these; only the CLI entry point turns them
//! into a process exit.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Tooling operation result type
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for a generation run. None of these are retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a query error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }

    /// Create a parse error anchored at a 1-based source line
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a template compilation/execution error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template(message.into())
    }

    /// Create a formatter error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    /// Create an IO error tied to the path being read or written
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Short stage name used in CLI diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Connection(_) => "connection",
            Error::Query(_) => "query",
            Error::Parse { .. } => "parse",
            Error::Template(_) => "template",
            Error::Format(_) => "format",
            Error::Io { .. } => "io",
            Error::Config(_) => "config",
        }
    }
}

impl From<askama::Error> for Error {
    fn from(e: askama::Error) -> Self {
        Self::Template(e.to_string())
    }
}
