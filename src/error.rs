//! Error types for slide-forge.
//!
//! Only geometry, export and renderer problems are errors. Unrecognised
//! style keywords, missing image sources and ragged tables are recorded as
//! [`Warning`](crate::warning::Warning)s instead.

use std::io;
use thiserror::Error;

/// Result type alias for slide-forge operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A position or size value that is neither inches nor a percentage.
    #[error("Invalid dimension: {0:?} (expected inches or a percentage like \"50%\")")]
    InvalidDimension(String),

    /// A page size with a non-positive or non-finite side.
    #[error("Invalid page size: {width}in x {height}in")]
    InvalidPageSize { width: f64, height: f64 },

    /// A named layout that is not one of the known presets.
    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    /// Export was requested without a destination name.
    #[error("fileName is required")]
    MissingFileName,

    /// The external renderer failed. Never retried.
    #[error("Renderer failure: {0}")]
    Renderer(String),

    /// I/O error while writing the rendered artifact.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A deck document that could not be deserialized.
    #[error("Invalid deck: {0}")]
    Deck(#[from] serde_json::Error),
}
