//! CLI logic for the usegraph layout tool.
//!
//! This module contains the core CLI logic for the usegraph layout tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use usegraph::{UsegraphError, ViewBuilder, config::AppConfig};

/// Run the usegraph CLI application
///
/// This function decodes the input use case, lays it out and writes the
/// positioned graph view as JSON to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `UsegraphError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Invalid JSON input
/// - Layout invariant violations
/// - Export errors
pub fn run(args: &Args) -> Result<(), UsegraphError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing use case"
    );

    // Load configuration
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(engine) = args.engine {
        info!(engine:%; "Overriding configured layout engine");
        app_config = AppConfig::new(app_config.layout().clone().with_engine(engine));
    }

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    let builder = ViewBuilder::new(app_config);
    let (run, json) = builder.layout_json(&source)?;

    for degradation in run.degradations() {
        warn!(degradation:%; "Scope laid out with fallback geometry");
    }
    if !run.diagnostics().is_empty() {
        warn!(
            diagnostics = run.diagnostics().len();
            "Input was repaired while loading"
        );
    }

    // Write output file
    fs::write(&args.output, json)?;

    info!(output_file = args.output; "Graph view exported successfully");

    Ok(())
}
