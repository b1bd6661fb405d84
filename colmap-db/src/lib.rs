// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! SQLite database interface for COLMAP reconstruction metadata.
//!
//! This crate writes externally produced camera calibrations and image pose
//! priors into the database file of the COLMAP structure-from-motion
//! pipeline. It is a compatible writer only; the surrounding tables are a
//! fixed external contract and COLMAP itself remains the owner of the data.
//!
//! The layout COLMAP uses for per-image pose priors has changed across
//! releases: older databases carry seven prior columns directly on the
//! `images` table, newer ones keep a separate `pose_priors` table keyed by
//! image id. [`ColmapDb`] probes the layout once per connection and exposes
//! one stable write operation regardless of which physical layout backs it.
//!
//! # Example
//!
//! ```ignore
//! use colmap_db::{ColmapDb, OpenMode};
//!
//! let db = ColmapDb::open("colmap/database.db", OpenMode::ReadWrite)?;
//! db.update_image_pose(1, [1.0, 0.0, 0.0, 0.0], [0.1, 0.2, 0.3], 2)?;
//! ```

mod blob;
mod connection;
mod error;
mod prior;
mod query;
mod schema;
mod types;
mod write;

pub use blob::{decode_f64_array, decode_f64s, encode_f64s};
pub use connection::{ColmapDb, OpenMode};
pub use error::{Error, Result};
pub use prior::PosePriorStorage;
pub use schema::MAX_IMAGE_ID;
pub use types::*;
