//! CLI logic for the Strata layout tool.
//!
//! This module contains the core CLI logic: load configuration, lay out the
//! model, replay any requested expand/collapse toggles through the runtime
//! re-layout, and export the result.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, io::Write};

use log::{info, warn};

use strata::{DiagramBuilder, StrataError, animation::TransitionBoard};

/// Run the Strata CLI application
///
/// # Errors
///
/// Returns `StrataError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Declaration errors
/// - Layout errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), StrataError> {
    info!(
        input_path = args.input,
        format:? = args.format;
        "Processing model"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let mut model = builder.parse(&source)?;
    let mut graph = builder.layout(&model)?;

    let mut board = TransitionBoard::new();
    for name in &args.toggles {
        let Some(layer) = model
            .topology()
            .find(name)
            .filter(|&layer| graph.index_of(layer).is_some())
        else {
            warn!(layer = name.as_str(); "Ignoring toggle for layer outside the layout");
            continue;
        };
        let Some(state) = model.footprints_mut().toggle(layer) else {
            warn!(layer = name.as_str(); "Ignoring toggle for layer without footprint");
            continue;
        };
        let generation = graph.on_footprint_changed(layer, model.footprints(), &mut board)?;
        info!(layer = name.as_str(), state:?, generation = generation.value(); "Toggled layer");
    }
    for transition in board.transitions() {
        info!(
            layer:% = transition.layer(),
            distance = transition.distance(),
            generation = transition.generation().value();
            "Transition"
        );
    }

    let rendered = builder.render(&graph, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!(output_file = path.as_str(); "Layout exported successfully");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
