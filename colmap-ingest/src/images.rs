// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Image-list ingestion.
//!
//! One non-comment, non-empty line per image:
//! `IMAGE_ID QW QX QY QZ TX TY TZ CAMERA_ID [NAME]`. The trailing name is
//! not consumed here; image rows already carry their names.

use std::fs;
use std::path::Path;

use colmap_db::ColmapDb;
use tracing::{debug, info};

use crate::error::{IngestError, IoContext, Result};

/// One parsed image pose-prior record.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePoseRecord {
    pub image_id: i64,
    /// Prior orientation (qw, qx, qy, qz)
    pub qvec: [f64; 4],
    /// Prior position (tx, ty, tz)
    pub tvec: [f64; 3],
    pub camera_id: i64,
}

/// Parse one whitespace-delimited image line.
pub fn parse_image_line(line: &str) -> std::result::Result<ImagePoseRecord, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 9 {
        return Err(format!("expected at least 9 fields, got {}", fields.len()));
    }
    let image_id = fields[0]
        .parse::<i64>()
        .map_err(|_| format!("invalid image id '{}'", fields[0]))?;

    let mut pose = [0.0; 7];
    for (value, field) in pose.iter_mut().zip(&fields[1..8]) {
        *value = field
            .parse::<f64>()
            .map_err(|_| format!("invalid pose component '{field}'"))?;
    }

    let camera_id = fields[8]
        .parse::<i64>()
        .map_err(|_| format!("invalid camera id '{}'", fields[8]))?;

    Ok(ImagePoseRecord {
        image_id,
        qvec: [pose[0], pose[1], pose[2], pose[3]],
        tvec: [pose[4], pose[5], pose[6]],
        camera_id,
    })
}

/// Read an image list, skipping comment and blank lines.
pub fn read_images_file(path: &Path) -> Result<Vec<ImagePoseRecord>> {
    let contents = fs::read_to_string(path)
        .io_context(|| format!("Failed to read image list at {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = parse_image_line(line).map_err(|message| IngestError::Parse {
            path: path.to_owned(),
            line: idx + 1,
            message,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Load an image list into the database.
///
/// All pose writes are staged in one transaction and committed together at
/// the end of the pass; any failure discards the whole pass.
pub fn load_images(db: &ColmapDb, path: &Path) -> Result<usize> {
    let records = read_images_file(path)?;

    let tx = db.transaction()?;
    for record in &records {
        let affected =
            db.update_image_pose(record.image_id, record.qvec, record.tvec, record.camera_id)?;
        if affected == 0 {
            debug!("Image {} matched no row", record.image_id);
        }
    }
    tx.commit().map_err(colmap_db::Error::from)?;

    info!("Loaded {} image poses from {}", records.len(), path.display());
    Ok(records.len())
}
