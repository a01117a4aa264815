//! CLI configuration file: defaults for options not given as flags or
//! environment variables.

pub(crate) mod loader;

pub(crate) use loader::{expand_path, load_cli_config};

use metagen_tooling::format::FormatterKind;
use serde::Deserialize;

/// Connection defaults under `[database]`.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct DatabaseSection {
    /// `host:port`
    pub addr: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Schema (database) name
    pub name: Option<String>,
}

/// Contents of `.metagen.toml`.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Formatter for generated Go code.
    pub formatter: Option<FormatterKind>,

    /// `gofmt` binary used when `formatter = "gofmt"`.
    pub gofmt_path: Option<String>,

    /// Directory of `.tera` override templates.
    pub template_dir: Option<String>,

    /// Default `--dir` for the schema commands.
    pub output_dir: Option<String>,

    /// Default `--type` for `comment-extract`.
    pub const_type: Option<String>,

    #[serde(default)]
    pub database: DatabaseSection,
}
