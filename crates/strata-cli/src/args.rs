//! Command-line argument definitions for the Strata CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the export format,
//! configuration file selection, runtime toggles, and logging verbosity.

use clap::Parser;

use strata::export::OutputFormat;

/// Command-line arguments for the Strata layout tool
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the model declaration (TOML)
    #[arg(help = "Path to the model file")]
    pub input: String,

    /// Path to the output file; stdout when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Export format (text, json, dot)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Expand or collapse a layer after the initial layout; repeatable
    #[arg(short, long = "toggle", value_name = "LAYER")]
    pub toggles: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
