// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Camera-list ingestion.
//!
//! One non-comment line per camera:
//! `CAMERA_ID MODEL WIDTH HEIGHT PARAMS[..]`, at most eight parameters
//! consumed per line.

use std::fs;
use std::path::Path;

use colmap_db::{CameraModel, ColmapDb};
use tracing::info;

use crate::error::{IngestError, IoContext, Result};

/// Maximum number of intrinsic parameters consumed from one line.
const MAX_CAMERA_PARAMS: usize = 8;

/// One parsed camera calibration record.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRecord {
    pub camera_id: i64,
    pub model: CameraModel,
    pub width: i64,
    pub height: i64,
    pub params: Vec<f64>,
}

/// Parse one whitespace-delimited camera line.
pub fn parse_camera_line(line: &str) -> std::result::Result<CameraRecord, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(format!("expected at least 4 fields, got {}", fields.len()));
    }
    let camera_id = fields[0]
        .parse::<i64>()
        .map_err(|_| format!("invalid camera id '{}'", fields[0]))?;
    let model =
        CameraModel::from_name(fields[1]).map_err(|_| format!("unknown camera model '{}'", fields[1]))?;
    let width = fields[2]
        .parse::<i64>()
        .map_err(|_| format!("invalid width '{}'", fields[2]))?;
    let height = fields[3]
        .parse::<i64>()
        .map_err(|_| format!("invalid height '{}'", fields[3]))?;
    let params = fields[4..]
        .iter()
        .take(MAX_CAMERA_PARAMS)
        .map(|field| {
            field
                .parse::<f64>()
                .map_err(|_| format!("invalid parameter '{field}'"))
        })
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    Ok(CameraRecord {
        camera_id,
        model,
        width,
        height,
        params,
    })
}

/// Read a camera list, skipping comment and blank lines.
pub fn read_cameras_file(path: &Path) -> Result<Vec<CameraRecord>> {
    let contents = fs::read_to_string(path)
        .io_context(|| format!("Failed to read camera list at {}", path.display()))?;

    let mut records = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = parse_camera_line(line).map_err(|message| IngestError::Parse {
            path: path.to_owned(),
            line: idx + 1,
            message,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Load a camera list into the database.
///
/// All updates are staged in one transaction and committed together at the
/// end of the pass; any failure discards the whole pass. Every camera id is
/// expected to pre-exist. After the commit the camera table is re-read and
/// checked against the input.
pub fn load_cameras(db: &ColmapDb, path: &Path) -> Result<usize> {
    let records = read_cameras_file(path)?;

    let tx = db.transaction()?;
    for record in &records {
        let affected = db.update_camera(
            record.model,
            record.width,
            record.height,
            &record.params,
            record.camera_id,
        )?;
        if affected == 0 {
            return Err(IngestError::MissingCamera {
                camera_id: record.camera_id,
            });
        }
    }
    tx.commit().map_err(colmap_db::Error::from)?;

    verify_cameras(db, &records)?;
    info!("Loaded {} cameras from {}", records.len(), path.display());
    Ok(records.len())
}

/// Re-read the camera table and check it against the parsed input.
///
/// Model, width, and height must match exactly; parameters within
/// floating-point tolerance.
pub fn verify_cameras(db: &ColmapDb, records: &[CameraRecord]) -> Result<()> {
    for record in records {
        let row = db
            .query_camera(record.camera_id)?
            .ok_or_else(|| IngestError::MissingCamera {
                camera_id: record.camera_id,
            })?;
        if row.model != record.model || row.width != record.width || row.height != record.height {
            return Err(IngestError::Verify {
                camera_id: record.camera_id,
                message: format!(
                    "stored {}/{}x{} differs from input {}/{}x{}",
                    row.model.name(),
                    row.width,
                    row.height,
                    record.model.name(),
                    record.width,
                    record.height
                ),
            });
        }
        if !allclose(&row.params, &record.params) {
            return Err(IngestError::Verify {
                camera_id: record.camera_id,
                message: format!(
                    "stored params {:?} differ from input {:?}",
                    row.params, record.params
                ),
            });
        }
    }
    Ok(())
}

/// Elementwise `|a - b| <= atol + rtol * |b|` with numpy's default
/// tolerances.
fn allclose(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= 1e-8 + 1e-5 * y.abs())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_parse_full_line() {
        let record =
            parse_camera_line("1 OPENCV 1920 1080 520.0 520.0 960.0 540.0 -0.05 0.01 0.0 0.0")
                .unwrap();
        assert_eq!(record.camera_id, 1);
        assert_eq!(record.model, CameraModel::OpenCv);
        assert_eq!(record.width, 1920);
        assert_eq!(record.height, 1080);
        assert_eq!(
            record.params,
            vec![520.0, 520.0, 960.0, 540.0, -0.05, 0.01, 0.0, 0.0]
        );
    }

    #[test]
    fn test_parse_short_param_list() {
        let record = parse_camera_line("2 SIMPLE_PINHOLE 640 480 500.0 320.0 240.0").unwrap();
        assert_eq!(record.model, CameraModel::SimplePinhole);
        assert_eq!(record.params, vec![500.0, 320.0, 240.0]);
    }

    #[test]
    fn test_parse_caps_params_at_eight() {
        let record = parse_camera_line(
            "3 FULL_OPENCV 100 100 1.0 2.0 3.0 4.0 5.0 6.0 7.0 8.0 9.0 10.0 11.0 12.0",
        )
        .unwrap();
        assert_eq!(record.params.len(), 8);
        assert_eq!(record.params[7], 8.0);
    }

    #[rstest]
    #[case("1 OPENCV 1920", "expected at least 4 fields")]
    #[case("x OPENCV 1920 1080", "invalid camera id")]
    #[case("1 WIDEANGLE 1920 1080", "unknown camera model")]
    #[case("1 OPENCV w 1080", "invalid width")]
    #[case("1 OPENCV 1920 h", "invalid height")]
    #[case("1 OPENCV 1920 1080 abc", "invalid parameter")]
    fn test_parse_rejects(#[case] line: &str, #[case] message_prefix: &str) {
        let err = parse_camera_line(line).unwrap_err();
        assert!(
            err.starts_with(message_prefix),
            "'{err}' does not start with '{message_prefix}'"
        );
    }

    #[test]
    fn test_read_skips_comments_and_blanks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cameras.txt");
        std::fs::write(
            &path,
            "# Camera list with one line of data per camera:\n\
             #   CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[]\n\
             \n\
             1 PINHOLE 1920 1080 520.0 520.0 960.0 540.0\n",
        )
        .unwrap();

        let records = read_cameras_file(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].camera_id, 1);
    }

    #[test]
    fn test_read_reports_line_numbers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cameras.txt");
        std::fs::write(&path, "# header\n1 PINHOLE 1920 1080 1 1 1 1\nbogus\n").unwrap();

        match read_cameras_file(&path).unwrap_err() {
            IngestError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_allclose_tolerance() {
        assert!(allclose(&[1.0, 2.0], &[1.0 + 5e-6, 2.0]));
        assert!(!allclose(&[1.0, 2.0], &[1.1, 2.0]));
        assert!(!allclose(&[1.0], &[1.0, 2.0]));
    }
}
