//! Source formatting for generated Go files.
//!
//! Generated code always passes through a [`SourceFormatter`] before it is
//! written. A formatter failure means the template produced malformed code
//! and aborts the run.

mod builtin;
mod gofmt;

pub use builtin::BuiltinFormatter;
pub use gofmt::Gofmt;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Turns rendered source into its final on-disk form.
pub trait SourceFormatter: fmt::Debug {
    fn format(&self, source: &str) -> Result<String>;
}

/// Leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl SourceFormatter for Passthrough {
    fn format(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Which formatter a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// In-process bracket check and re-indent
    #[default]
    Builtin,
    /// External `gofmt` binary
    Gofmt,
    /// No formatting
    None,
}

impl FormatterKind {
    /// Instantiate the formatter. `gofmt_path` only matters for
    /// [`FormatterKind::Gofmt`] and defaults to `gofmt` on `PATH`.
    pub fn build(self, gofmt_path: Option<PathBuf>) -> Box<dyn SourceFormatter> {
        match self {
            FormatterKind::Builtin => Box::new(BuiltinFormatter),
            FormatterKind::Gofmt => Box::new(match gofmt_path {
                Some(path) => Gofmt::new(path),
                None => Gofmt::default(),
            }),
            FormatterKind::None => Box::new(Passthrough),
        }
    }
}

impl FromStr for FormatterKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(FormatterKind::Builtin),
            "gofmt" => Ok(FormatterKind::Gofmt),
            "none" | "off" => Ok(FormatterKind::None),
            other => Err(Error::config(format!(
                "unknown formatter '{other}' (expected builtin, gofmt or none)"
            ))),
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterKind::Builtin => write!(f, "builtin"),
            FormatterKind::Gofmt => write!(f, "gofmt"),
            FormatterKind::None => write!(f, "none"),
        }
    }
}
