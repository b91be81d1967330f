use crate::cli::RenderArgs;
use crate::config::builder::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::RenderProgress;
use restraintvis::{
    core::io::cif::CifFile,
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: RenderArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let app = build_config(&args)?;

    info!("Loading input structure from {:?}", &app.input_path);
    let container =
        CifFile::read_first_block(&app.input_path).map_err(|e| CliError::FileParsing {
            path: app.input_path.clone(),
            source: e.into(),
        })?;

    let progress = RenderProgress::new();
    let reporter = ProgressReporter::with_callback(progress.callback());

    info!("Invoking the visualization workflow...");
    let result = workflows::visualize::run(&container, &app.core_config, &reporter)?;

    result
        .document
        .write_to_path(&app.output_path)
        .map_err(|e| CliError::Output {
            path: app.output_path.clone(),
            source: e.into(),
        })?;

    println!(
        "✓ Scene with {} restraint(s) written to: {}",
        result.restraints.len(),
        app.output_path.display()
    );
    Ok(())
}
