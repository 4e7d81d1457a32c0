//! CLI logic for the Trellis diagram tool.
//!
//! This module contains the core CLI logic for the Trellis diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Emit};

use std::{fs, io};

use log::info;

use trellis::{DiagramBuilder, TrellisError};

/// Run the Trellis CLI application
///
/// This function processes the input file through the Trellis pipeline and
/// emits the requested stage output (URL, token, markup, or model JSON) to
/// stdout or to the requested output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Compression or encoding errors
pub fn run(args: &Args) -> Result<(), TrellisError> {
    info!(
        input_path = args.input,
        emit:? = args.emit;
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process the source through the pipeline; parsing is best-effort and
    // never fails, so every emit mode starts from a parsed model.
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.parse(&source);

    let output = match args.emit {
        Emit::Model => serde_json::to_string_pretty(&diagram).map_err(io::Error::other)?,
        Emit::Markup => builder.render_markup(&diagram),
        Emit::Token => builder.encode(&builder.render_markup(&diagram))?,
        Emit::Url => {
            let token = builder.encode(&builder.render_markup(&diagram))?;
            builder.render_url(&token)
        }
    };

    match &args.output {
        Some(path) => {
            fs::write(path, &output)?;
            info!(output_file = path.as_str(); "Output written");
        }
        None => println!("{output}"),
    }

    Ok(())
}
