//! Implementation of the `mvcforge create controller` command.

use tracing::{info, instrument};

use mvcforge_adapters::LocalFilesystem;
use mvcforge_core::application::ScaffoldService;
use mvcforge_core::domain::ScaffoldRequest;

use crate::{
    cli::{ControllerArgs, OutputFormat, global::GlobalArgs},
    commands::module::{registration_json, report_registration},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `mvcforge create controller` command.
#[instrument(skip_all, fields(controller = %args.name, module = %args.module))]
pub fn execute(
    args: ControllerArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let request = ScaffoldRequest::at(args.path)
        .module(&args.module)
        .controller(&args.name)
        .ignore_conventions(args.ignore_conventions)
        .no_config(args.no_config)
        .single_route(args.single_route)
        .no_docblocks(args.no_docblocks || !config.generator.docblocks);

    let service = ScaffoldService::new(Box::new(LocalFilesystem::new()));

    info!(controller = %args.name, "Controller scaffold started");
    let report = service.create_controller(&request).map_err(CliError::Core)?;
    info!(class = %report.class, "Controller scaffold completed");

    if output.format() == OutputFormat::Json {
        println!(
            "{}",
            serde_json::json!({
                "controller": report.class,
                "file": report.file,
                "view_script": report.view_script,
                "registration": registration_json(&report.registration),
            })
        );
        return Ok(());
    }

    output.success(&format!(
        "Controller {} created at {}",
        report.class,
        report.file.display()
    ))?;
    output.info(&format!("View script: {}", report.view_script.display()))?;
    report_registration(&report.registration, &output)?;

    Ok(())
}
