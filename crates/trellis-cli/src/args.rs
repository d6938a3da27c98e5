//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the graph format,
//! configuration file selection, layout override and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Trellis graph tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output graph file
    #[arg(short, long, default_value = "out.json")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Registered format used to read the input and write the output
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Layout to run instead of the configured one
    #[arg(short, long)]
    pub layout: Option<String>,

    /// Silence all logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
