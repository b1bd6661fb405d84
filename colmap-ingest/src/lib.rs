// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Ingestion drivers for COLMAP calibration and pose text dumps.
//!
//! Parses the whitespace-delimited `cameras.txt` / `images.txt` exports and
//! streams the records into a [`colmap_db::ColmapDb`]. Each driver stages
//! one full pass inside a single transaction and commits once at the end;
//! any parse or write failure aborts the remaining rows of that pass.

mod cameras;
mod error;
mod images;

pub use cameras::{CameraRecord, load_cameras, parse_camera_line, read_cameras_file, verify_cameras};
pub use error::{IngestError, IoContext, Result};
pub use images::{ImagePoseRecord, load_images, parse_image_line, read_images_file};
