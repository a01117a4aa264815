//! `schema-to-markdown` and `schema-to-struct`: one MySQL table → one file.

use std::path::PathBuf;

use metagen_tooling::pipeline::{run_schema_markdown, run_schema_struct, SchemaJob};
use metagen_tooling::schema::{DatabaseConfig, MySqlCatalog};
use metagen_tooling::{Error, Result};

use super::{build_renderer, report};
use crate::cli_config::{expand_path, CliConfig};
use crate::{SchemaArgs, SchemaToMarkdownArgs, SchemaToStructArgs};

const DEFAULT_ADDR: &str = "127.0.0.1:3306";
const DEFAULT_USER: &str = "root";
const DEFAULT_OUTPUT_DIR: &str = "./";

pub(crate) async fn handle_schema_to_markdown(
    args: SchemaToMarkdownArgs,
    config: &CliConfig,
) -> Result<()> {
    let renderer = build_renderer(config, None, args.template_dir.clone())?;
    let database = database_config(&args.schema, config)?;
    let job = schema_job(&args.schema, &database, None, config);

    let mut catalog = MySqlCatalog::connect(&database).await?;
    let outcome = run_schema_markdown(&mut catalog, &job, &renderer).await;
    let generated = catalog.finish(outcome).await?;

    report(&generated, &format!("{}.{}", job.schema, job.table));
    Ok(())
}

pub(crate) async fn handle_schema_to_struct(
    args: SchemaToStructArgs,
    config: &CliConfig,
) -> Result<()> {
    let renderer = build_renderer(config, args.render.formatter, args.render.template_dir.clone())?;
    let database = database_config(&args.schema, config)?;
    let job = schema_job(&args.schema, &database, args.package.clone(), config);

    let mut catalog = MySqlCatalog::connect(&database).await?;
    let outcome = run_schema_struct(&mut catalog, &job, &renderer).await;
    let generated = catalog.finish(outcome).await?;

    report(&generated, &format!("{}.{}", job.schema, job.table));
    Ok(())
}

/// Flags (and their environment variables) first, then `[database]`, then
/// defaults. There is no default database name.
fn database_config(args: &SchemaArgs, config: &CliConfig) -> Result<DatabaseConfig> {
    let section = &config.database;
    let database = args
        .db
        .clone()
        .or_else(|| section.name.clone())
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| {
            Error::config("no database name given (--db, METAGEN_DB_NAME or [database] name)")
        })?;

    Ok(DatabaseConfig {
        addr: args
            .addr
            .clone()
            .or_else(|| section.addr.clone())
            .unwrap_or_else(|| DEFAULT_ADDR.to_string()),
        user: args
            .user
            .clone()
            .or_else(|| section.user.clone())
            .unwrap_or_else(|| DEFAULT_USER.to_string()),
        password: args
            .pass
            .clone()
            .or_else(|| section.password.clone())
            .unwrap_or_default(),
        database,
    })
}

fn schema_job(
    args: &SchemaArgs,
    database: &DatabaseConfig,
    package: Option<String>,
    config: &CliConfig,
) -> SchemaJob {
    let dir = args
        .dir
        .clone()
        .or_else(|| config.output_dir.as_deref().map(expand_path))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    SchemaJob {
        schema: database.database.clone(),
        table: args.table.clone(),
        dir,
        package,
    }
}
