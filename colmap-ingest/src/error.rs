// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Error types for ingestion drivers.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// Database error
    #[error("Database error: {0}")]
    Db(#[from] colmap_db::Error),

    /// IO error with context
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A text line failed to parse
    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A camera id the input expects to pre-exist matched no row
    #[error("Camera {camera_id} does not exist in the database")]
    MissingCamera { camera_id: i64 },

    /// Read-back after a camera load disagreed with the input
    #[error("Camera {camera_id} failed read-back verification: {message}")]
    Verify { camera_id: i64, message: String },
}

impl IngestError {
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }
}

/// Helper trait for adding context to IO errors
pub trait IoContext<T> {
    fn io_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> IoContext<T> for std::io::Result<T> {
    fn io_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| IngestError::io(f(), e))
    }
}
