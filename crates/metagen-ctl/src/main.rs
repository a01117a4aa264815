//! metagen-ctl: generate Go lookup tables, Go models and Markdown docs from
//! Go constant comments and MySQL table schemas.
//!
//! Flags win over environment variables, which win over `.metagen.toml`,
//! which wins over built-in defaults. All of that is resolved here and in
//! [`commands`]; the pipelines in `metagen_tooling` only see explicit jobs.

mod cli_config;
mod commands;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use metagen_tooling::format::FormatterKind;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "metagen-ctl", version, about, styles = output::clap_styles())]
struct Cli {
    /// Enable debug logging for metagen crates (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a GetMsg lookup file from the constant comments of a Go file
    CommentExtract(CommentExtractArgs),
    /// Document a MySQL table as <dir>/<table>.md
    SchemaToMarkdown(SchemaToMarkdownArgs),
    /// Generate a gorm-tagged Go struct for a MySQL table as <dir>/<table>.go
    SchemaToStruct(SchemaToStructArgs),
}

// Formatting and template options for Go output.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct RenderArgs {
    /// Formatter for generated Go code: builtin, gofmt or none
    #[arg(long)]
    pub formatter: Option<FormatterKind>,

    /// Directory of .tera files overriding the built-in templates
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct CommentExtractArgs {
    /// Go source file to read
    #[arg(short, long, env = "GOFILE")]
    pub input: PathBuf,

    /// Output file [default: <input>_msg.go]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Go type of the constants [default: int]
    #[arg(short = 't', long = "type")]
    pub const_type: Option<String>,

    /// Package name when the input has no package clause
    #[arg(long, env = "GOPACKAGE")]
    pub package: Option<String>,

    #[command(flatten)]
    pub render: RenderArgs,
}

// Connection and target options shared by the schema commands.
#[derive(Debug, Clone, Args)]
pub(crate) struct SchemaArgs {
    /// MySQL address as host:port [default: 127.0.0.1:3306]
    #[arg(long, env = "METAGEN_DB_ADDR")]
    pub addr: Option<String>,

    /// MySQL user [default: root]
    #[arg(long, env = "METAGEN_DB_USER")]
    pub user: Option<String>,

    /// MySQL password [default: empty]
    #[arg(long, env = "METAGEN_DB_PASS", hide_env_values = true)]
    pub pass: Option<String>,

    /// Database (schema) name
    #[arg(long, env = "METAGEN_DB_NAME")]
    pub db: Option<String>,

    /// Table to read
    #[arg(long)]
    pub table: String,

    /// Output directory [default: ./]
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SchemaToMarkdownArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Directory of .tera files overriding the built-in templates
    #[arg(long)]
    pub template_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct SchemaToStructArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Go package name [default: derived from the table name]
    #[arg(long)]
    pub package: Option<String>,

    #[command(flatten)]
    pub render: RenderArgs,
}

fn init_tracing(verbose: bool) {
    let filter = match (verbose, EnvFilter::try_from_default_env()) {
        (false, Ok(filter)) => filter,
        (verbose, _) => {
            let level = if verbose { "debug" } else { "warn" };
            EnvFilter::new(format!("metagen_ctl={level},metagen_tooling={level}"))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli_config::load_cli_config();

    let result = match cli.command {
        Commands::CommentExtract(args) => commands::handle_comment_extract(args, &config),
        Commands::SchemaToMarkdown(args) => {
            commands::handle_schema_to_markdown(args, &config).await
        }
        Commands::SchemaToStruct(args) => commands::handle_schema_to_struct(args, &config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e);
            if cli.verbose {
                output::dim(format!("failed stage: {}", e.kind()));
            }
            ExitCode::FAILURE
        }
    }
}
