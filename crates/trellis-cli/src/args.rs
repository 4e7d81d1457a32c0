//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input path, which pipeline stage
//! output to emit, configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// Which pipeline stage output to emit.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// The assembled rendering-service URL
    #[default]
    Url,
    /// The URL-safe encoded token
    Token,
    /// The rendered PlantUML markup
    Markup,
    /// The parsed diagram model as JSON
    Model,
}

/// Command-line arguments for the Trellis diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input DSL file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Pipeline stage output to emit
    #[arg(short, long, value_enum, default_value_t = Emit::Url)]
    pub emit: Emit,

    /// Path to write the output to (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
