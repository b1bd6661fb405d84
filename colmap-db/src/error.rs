// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Error types for COLMAP database operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for COLMAP database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during COLMAP database operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database file not found
    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    /// The images table has neither the known prior columns nor a
    /// pose_priors table
    #[error(
        "Unrecognized COLMAP images schema: missing known prior columns \
         and pose_priors table (absent: {})",
        .missing.join(", ")
    )]
    UnrecognizedImagesSchema { missing: Vec<String> },

    /// BLOB payload is not a whole number of 8-byte elements
    #[error("Blob length {len} is not a multiple of 8 bytes")]
    BlobLength { len: usize },

    /// BLOB payload decoded to the wrong number of elements
    #[error("Blob holds {actual} elements, expected {expected}")]
    BlobShape { expected: usize, actual: usize },

    /// Camera model name not in the fixed enumeration
    #[error("Unknown camera model: {0}")]
    UnknownCameraModel(String),

    /// Camera model code not in the fixed enumeration
    #[error("Unknown camera model id: {0}")]
    UnknownCameraModelId(i64),
}
