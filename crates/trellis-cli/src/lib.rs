//! CLI logic for the Trellis graph tool.
//!
//! Reads a graph file with a registered format, builds the graph (which runs
//! the layout) and writes the laid-out graph back with the same format.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use trellis::{Graph, Registry, TrellisError, config::ExtensionConfig};

/// Run the Trellis CLI application
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown formats, renderers or layouts
/// - Malformed input and invalid elements
/// - Layout errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        format = args.format;
        "Processing graph"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(layout) = &args.layout {
        app_config = app_config.with_layout(ExtensionConfig::new(layout));
    }

    let registry = Registry::with_builtins();
    let format = registry.format(&ExtensionConfig::new(&args.format))?;

    let source = fs::read_to_string(&args.input)?;
    let data = format.parse(&source)?;

    let graph = Graph::builder()
        .with_config(app_config)
        .with_data(data)
        .build(&registry)?;

    let output = format.serialize(&graph.snapshot())?;
    fs::write(&args.output, output)?;

    info!(
        output_file = args.output,
        nodes = graph.nodes().len(),
        edges = graph.edges().len();
        "Graph exported successfully"
    );

    Ok(())
}
