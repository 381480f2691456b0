//! Implementation of the `mvcforge create action` command.

use tracing::{info, instrument};

use mvcforge_adapters::LocalFilesystem;
use mvcforge_core::application::ScaffoldService;
use mvcforge_core::domain::ScaffoldRequest;

use crate::{
    cli::{ActionArgs, OutputFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `mvcforge create action` command.
#[instrument(skip_all, fields(action = %args.name, controller = %args.controller))]
pub fn execute(
    args: ActionArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = ScaffoldRequest::at(args.path)
        .module(&args.module)
        .controller(&args.controller)
        .action(&args.name)
        .ignore_conventions(args.ignore_conventions)
        .no_docblocks(args.no_docblocks || !config.generator.docblocks);

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    info!(action = %args.name, "Action merge started");
    let report = service.create_action(&request).map_err(CliError::Core)?;
    info!(method = %report.method, "Action merge completed");

    if output.format() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "action": report.method,
                "controller_file": report.controller_file,
                "view_script": report.view_script,
            })
        );
        return Ok(());
    }

    output.success(&format!(
        "Action {} added to {}",
        report.method,
        report.controller_file.display()
    ))?;
    output.info(&format!("View script: {}", report.view_script.display()))?;

    Ok(())
}
