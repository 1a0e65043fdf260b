//! Implementation of the default generation action.
//!
//! Responsibility: merge flags with config, call the core generate service,
//! and display results. No business logic lives here.

use tracing::{debug, instrument};

use incgen_adapters::LocalFilesystem;
use incgen_core::{
    application::{GenerateService, RawFlags},
    domain::{ModuleContext, Style},
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Run generation in the current directory.
#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let service = GenerateService::new(Box::new(LocalFilesystem::new()));
    run(&service, args, config, output)
}

/// Generation against an arbitrary service.
pub fn run(
    service: &GenerateService,
    args: GenerateArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let style = style_for(&args, config);
    let flags = raw_flags(&args, config);
    debug!(?style, ?flags, dry_run = args.dry_run, "Generation requested");

    let ctx = service.resolve(&flags, style)?;

    if args.dry_run {
        return preview(service, &ctx, output);
    }

    let report = service.generate(&ctx)?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        for path in &report.created {
            output.created(path)?;
        }
    }
    Ok(())
}

fn preview(service: &GenerateService, ctx: &ModuleContext, output: &OutputManager) -> CliResult<()> {
    let files = service.preview(ctx)?;

    if output.is_json() {
        output.json(&files)?;
        return Ok(());
    }

    output.info(&format!("Dry run: {} files would be created", files.len()))?;
    for file in &files {
        output.print("")?;
        output.header(&format!("── {}", file.disk_name))?;
        output.print(file.content.trim_end_matches('\n'))?;
    }
    Ok(())
}

/// Flags override config; boolean flags can only switch a setting on.
fn style_for(args: &GenerateArgs, config: &AppConfig) -> Style {
    Style {
        layout: args.layout.map_or(config.generation.layout, Into::into),
        guard_rule: args
            .guard_style
            .map_or(config.generation.guard_style, Into::into),
        strict_guards: args.strict_guards || config.generation.strict_guards,
    }
}

fn raw_flags(args: &GenerateArgs, config: &AppConfig) -> RawFlags {
    RawFlags {
        name: args.name.clone(),
        dir: args.dir,
        once: args.once || config.generation.once,
        public_only: args.public_only,
        add: args.add.clone(),
    }
}
