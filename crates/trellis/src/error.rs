//! Error types for Trellis operations.
//!
//! This module provides the main error type [`TrellisError`] which wraps
//! the error conditions that can occur during pipeline processing. Note
//! that parsing is absent: the parser is total and skips malformed
//! fragments instead of failing.

use std::io;

use thiserror::Error;

use crate::encode::{CompressionError, EncodingError};

/// The main error type for Trellis operations.
///
/// All pipeline errors are returned to the immediate caller; no partial
/// output is emitted on failure (either a full token is produced, or
/// nothing is).
#[derive(Debug, Error)]
pub enum TrellisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Compression(#[from] CompressionError),

    #[error("{0}")]
    Encoding(#[from] EncodingError),

    #[error("Configuration error: {0}")]
    Config(String),
}
