//! Implementation of the `mvcforge create module` command.
//!
//! Responsibility: translate CLI arguments into a `ScaffoldRequest`, call
//! the core scaffold service, and display results. No business logic lives
//! here.

use tracing::{info, instrument};

use mvcforge_adapters::LocalFilesystem;
use mvcforge_core::application::{ConfigRegistration, ScaffoldService};
use mvcforge_core::domain::ScaffoldRequest;

use crate::{
    cli::{ModuleArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `mvcforge create module` command.
#[instrument(skip_all, fields(module = %args.name))]
pub fn execute(
    args: ModuleArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = ScaffoldRequest::at(args.path)
        .module(&args.name)
        .ignore_conventions(args.ignore_conventions)
        .no_docblocks(args.no_docblocks || !config.generator.docblocks);

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    info!(module = %args.name, "Module scaffold started");
    let report = service.create_module(&request).map_err(CliError::Core)?;
    info!(module = %report.name, "Module scaffold completed");

    if output.format() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "module": report.name,
                "path": report.path,
                "registration": registration_json(&report.registration),
            })
        );
        return Ok(());
    }

    output.success(&format!(
        "Module '{}' created at {}",
        report.name,
        report.path.display()
    ))?;
    report_registration(&report.registration, &output)?;

    Ok(())
}

/// JSON rendition of a registration outcome.
pub(crate) fn registration_json(registration: &ConfigRegistration) -> serde_json::Value {
    match registration {
        ConfigRegistration::Updated { config, backup } => serde_json::json!({
            "status": "updated",
            "config": config,
            "backup": backup,
        }),
        ConfigRegistration::AlreadyRegistered => serde_json::json!({
            "status": "already-registered",
        }),
        ConfigRegistration::Skipped => serde_json::json!({
            "status": "skipped",
        }),
    }
}

/// Shared display of a registration-document outcome.
pub(crate) fn report_registration(
    registration: &ConfigRegistration,
    output: &OutputManager,
) -> CliResult<()> {
    match registration {
        ConfigRegistration::Updated { config, backup } => {
            output.info(&format!("Updated {}", config.display()))?;
            output.info(&format!(
                "Previous configuration saved as {}",
                backup.display()
            ))?;
        }
        ConfigRegistration::AlreadyRegistered => {
            output.warning("Already registered; configuration left untouched")?;
        }
        ConfigRegistration::Skipped => {}
    }
    Ok(())
}
