//! Command handlers for the metagen CLI.
//!
//! Each handler merges flags with the config file into a job, runs the
//! matching pipeline from `metagen_tooling`, and reports the written file.

pub(crate) mod comment_extract;
pub(crate) mod schema;

pub(crate) use comment_extract::handle_comment_extract;
pub(crate) use schema::{handle_schema_to_markdown, handle_schema_to_struct};

use std::path::PathBuf;

use metagen_tooling::codegen::Renderer;
use metagen_tooling::format::FormatterKind;
use metagen_tooling::pipeline::GeneratedFile;
use metagen_tooling::Result;

use crate::cli_config::{expand_path, CliConfig};
use crate::output;

/// Build the renderer from flags, falling back to the config file.
pub(crate) fn build_renderer(
    config: &CliConfig,
    formatter: Option<FormatterKind>,
    template_dir: Option<PathBuf>,
) -> Result<Renderer> {
    let kind = formatter.or(config.formatter).unwrap_or_default();
    let gofmt_path = config.gofmt_path.as_deref().map(expand_path);
    tracing::debug!(formatter = %kind, "Selected formatter");

    let renderer = Renderer::new(kind.build(gofmt_path));
    match template_dir.or_else(|| config.template_dir.as_deref().map(expand_path)) {
        Some(dir) => renderer.with_template_dir(&dir),
        None => Ok(renderer),
    }
}

fn report(generated: &GeneratedFile, source: &str) {
    tracing::debug!(path = %generated.path.display(), bytes = generated.bytes, "Generation finished");
    output::success(summary_line(generated, source));
}

fn summary_line(generated: &GeneratedFile, source: &str) -> String {
    format!("Generated {} from {source}", generated.path.display())
}
