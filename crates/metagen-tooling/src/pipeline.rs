//! End-to-end generation runs.
//!
//! Each run reads its metadata, renders it, and writes one file. The job
//! structs carry every option explicitly; nothing here reads flags or the
//! environment. A file is only written once rendering and formatting have
//! both succeeded, and an existing file at the target path is replaced.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::codegen::{ConstContext, MarkdownContext, RenderMode, Renderer, StructContext};
use crate::comment::{default_output_path, extract};
use crate::error::{Error, Result};
use crate::schema::SchemaCatalog;

/// A file written by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Options for generating a `GetMsg` lookup file from a Go source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstLookupJob {
    pub input: PathBuf,
    /// Defaults to `<input without .go>_msg.go`
    pub output: Option<PathBuf>,
    /// Go type of the constants, `int` unless they have a named type
    pub const_type: String,
    /// Package to use when the input has no package clause
    pub fallback_package: Option<String>,
}

impl ConstLookupJob {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// Options shared by the schema-driven pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaJob {
    pub schema: String,
    pub table: String,
    /// Directory that receives `<table>.<ext>`
    pub dir: PathBuf,
    /// Go package for struct output, defaults to one derived from the table
    pub package: Option<String>,
}

impl SchemaJob {
    pub fn output_path(&self, mode: RenderMode) -> PathBuf {
        self.dir.join(format!("{}.{}", self.table, mode.extension()))
    }
}

/// Read constant comments from `job.input` and write the lookup file.
pub fn run_const_lookup(job: &ConstLookupJob, renderer: &Renderer) -> Result<GeneratedFile> {
    let source = fs::read_to_string(&job.input).map_err(|e| Error::io(&job.input, e))?;
    let extracted = extract(&source)?;
    let package = extracted.resolve_package(job.fallback_package.as_deref())?;

    let ctx = ConstContext::new(&package, &job.const_type, &extracted.comments);
    let code = renderer.render_constants(&ctx)?;
    write_output(&job.output_path(), &code)
}

/// Document `job.table` as `<dir>/<table>.md`.
pub async fn run_schema_markdown<C>(
    catalog: &mut C,
    job: &SchemaJob,
    renderer: &Renderer,
) -> Result<GeneratedFile>
where
    C: SchemaCatalog + ?Sized,
{
    let table = catalog.fetch_table(&job.schema, &job.table).await?;
    let doc = renderer.render_markdown(&MarkdownContext::from(&table))?;
    write_output(&job.output_path(RenderMode::Markdown), &doc)
}

/// Generate the Go model of `job.table` as `<dir>/<table>.go`.
pub async fn run_schema_struct<C>(
    catalog: &mut C,
    job: &SchemaJob,
    renderer: &Renderer,
) -> Result<GeneratedFile>
where
    C: SchemaCatalog + ?Sized,
{
    let table = catalog.fetch_table(&job.schema, &job.table).await?;
    let ctx = StructContext::from_table(&table, job.package.as_deref());
    let code = renderer.render_struct(&ctx)?;
    write_output(&job.output_path(RenderMode::Struct), &code)
}

fn write_output(path: &Path, contents: &str) -> Result<GeneratedFile> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "Wrote generated file");
    Ok(GeneratedFile {
        path: path.to_path_buf(),
        bytes: contents.len(),
    })
}
