//! Implementation of the `mvcforge create project` command.
//!
//! Responsibility: wire the network, cache, and archive adapters into the
//! bootstrap service and display results. No business logic lives here.

use std::time::Duration;

use tracing::{info, instrument};

use mvcforge_adapters::{DirSkeletonCache, GithubSkeletonSource, LocalFilesystem, TarGzExtractor};
use mvcforge_core::application::BootstrapService;

use crate::{
    cli::{OutputFormat, ProjectArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `mvcforge create project` command.
#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(
    args: ProjectArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let source = GithubSkeletonSource::new(
        &config.skeleton.repository,
        Duration::from_secs(config.skeleton.timeout_secs),
    )
    .map_err(CliError::Core)?;
    let cache = DirSkeletonCache::new(config.cache_dir());

    let service = BootstrapService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(source),
        Box::new(cache),
        Box::new(TarGzExtractor::new()),
    );

    output.header(&format!(
        "Creating application at {}...",
        args.path.display()
    ))?;
    info!(repository = %config.skeleton.repository, "Bootstrap started");

    let report = service.create_project(&args.path).map_err(CliError::Core)?;

    info!(revision = %report.revision, from_cache = report.from_cache, "Bootstrap completed");

    if output.format() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "path": report.path,
                "revision": report.revision,
                "from_cache": report.from_cache,
            })
        );
        return Ok(());
    }

    if report.from_cache {
        output.info(&format!(
            "Used cached skeleton archive (revision {})",
            short_revision(&report.revision)
        ))?;
    }
    output.success(&format!(
        "Application created at {} (skeleton revision {})",
        report.path.display(),
        short_revision(&report.revision)
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", report.path.display()))?;
        output.print("  mvcforge create module <name>")?;
    }

    Ok(())
}

/// Git revisions are 40 hex chars; seven is plenty for display.
fn short_revision(revision: &str) -> &str {
    if revision.len() > 7 && revision.bytes().all(|b| b.is_ascii_hexdigit()) {
        &revision[..7]
    } else {
        revision
    }
}
