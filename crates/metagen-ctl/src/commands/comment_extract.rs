//! `comment-extract`: constant comments of a Go file → `GetMsg` lookup file.

use metagen_tooling::codegen::constants::DEFAULT_CONST_TYPE;
use metagen_tooling::pipeline::{run_const_lookup, ConstLookupJob};
use metagen_tooling::Result;

use super::{build_renderer, report};
use crate::cli_config::CliConfig;
use crate::CommentExtractArgs;

pub(crate) fn handle_comment_extract(args: CommentExtractArgs, config: &CliConfig) -> Result<()> {
    let renderer = build_renderer(config, args.render.formatter, args.render.template_dir.clone())?;
    let job = const_lookup_job(&args, config);
    tracing::debug!(?job, "Running comment-extract");

    let generated = run_const_lookup(&job, &renderer)?;
    report(&generated, &job.input.display().to_string());
    Ok(())
}

fn const_lookup_job(args: &CommentExtractArgs, config: &CliConfig) -> ConstLookupJob {
    let const_type = args
        .const_type
        .clone()
        .or_else(|| config.const_type.clone())
        .unwrap_or_else(|| DEFAULT_CONST_TYPE.to_string());

    ConstLookupJob {
        input: args.input.clone(),
        output: args.output.clone(),
        const_type,
        fallback_package: args.package.clone(),
    }
}
