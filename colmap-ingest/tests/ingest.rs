// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! End-to-end ingestion tests: text fixtures on disk through the drivers
//! into a database file, then read back.

use std::path::PathBuf;

use colmap_db::{CameraModel, ColmapDb, OpenMode};
use colmap_ingest::{IngestError, load_cameras, load_images};

struct Fixture {
    _dir: tempfile::TempDir,
    root: PathBuf,
    db: ColmapDb,
}

/// A fresh database with the full schema and a handful of pre-existing
/// camera and image rows, as an earlier reconstruction stage would leave
/// them.
fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_owned();
    let db = ColmapDb::open(root.join("database.db"), OpenMode::Create).unwrap();
    db.create_schema().unwrap();

    for camera_id in 1..=2 {
        db.connection()
            .execute(
                "INSERT INTO cameras (camera_id, model, width, height, params, prior_focal_length) \
                 VALUES (?1, 0, 0, 0, NULL, 0)",
                [camera_id],
            )
            .unwrap();
    }
    for image_id in 1..=2 {
        db.connection()
            .execute(
                "INSERT INTO images (image_id, name, camera_id, prior_qw, prior_qx, prior_qy, \
                 prior_qz, prior_tx, prior_ty, prior_tz) \
                 VALUES (?1, 'frame_' || ?1 || '.png', 1, 0, 0, 0, 0, 0, 0, 0)",
                [image_id],
            )
            .unwrap();
    }
    Fixture { _dir: dir, root, db }
}

fn write_file(root: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = root.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_camera_pass() {
    let f = fixture();
    let path = write_file(
        &f.root,
        "cameras.txt",
        "# CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[]\n\
         1 OPENCV 1920 1080 520.0 520.0 960.0 540.0 -0.05 0.01 0.0 0.0\n\
         2 SIMPLE_RADIAL 1280 720 800.0 640.0 360.0 -0.02\n",
    );

    assert_eq!(load_cameras(&f.db, &path).unwrap(), 2);

    let cameras = f.db.query_all_cameras().unwrap();
    assert_eq!(cameras.len(), 2);
    assert_eq!(cameras[0].model, CameraModel::OpenCv);
    assert_eq!(cameras[0].params.len(), 8);
    assert!(cameras[0].prior_focal_length);
    assert_eq!(cameras[1].model, CameraModel::SimpleRadial);
    assert_eq!(cameras[1].params, vec![800.0, 640.0, 360.0, -0.02]);
}

/// A camera id absent from the database aborts the pass and rolls back the
/// rows already staged.
#[test]
fn test_camera_pass_missing_id_discards_pass() {
    let f = fixture();
    let path = write_file(
        &f.root,
        "cameras.txt",
        "1 OPENCV 1920 1080 520.0 520.0 960.0 540.0\n\
         99 PINHOLE 640 480 500.0 500.0 320.0 240.0\n",
    );

    match load_cameras(&f.db, &path).unwrap_err() {
        IngestError::MissingCamera { camera_id } => assert_eq!(camera_id, 99),
        other => panic!("expected MissingCamera, got {other:?}"),
    }

    // Camera 1 was staged before the failure; the rollback undid it.
    let row = f.db.query_camera(1).unwrap().unwrap();
    assert_eq!(row.model, CameraModel::SimplePinhole);
    assert_eq!(row.width, 0);
}

#[test]
fn test_camera_pass_malformed_line() {
    let f = fixture();
    let path = write_file(
        &f.root,
        "cameras.txt",
        "1 OPENCV 1920 1080 520.0\n1 OPENCV not-a-width 1080 520.0\n",
    );

    match load_cameras(&f.db, &path).unwrap_err() {
        IngestError::Parse { line, message, .. } => {
            assert_eq!(line, 2);
            assert!(message.contains("not-a-width"));
        }
        other => panic!("expected Parse, got {other:?}"),
    }
    // Parsing failed before the pass opened; nothing written.
    assert_eq!(f.db.query_camera(1).unwrap().unwrap().width, 0);
}

#[test]
fn test_image_pass_inline_layout() {
    let f = fixture();
    let path = write_file(
        &f.root,
        "images.txt",
        "# IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME\n\
         1 1.0 0.0 0.0 0.0 0.1 0.2 0.3 2 frame_1.png\n\
         2 0.5 0.5 0.5 0.5 -1.0 2.0 -3.0 1 frame_2.png\n",
    );

    assert_eq!(load_images(&f.db, &path).unwrap(), 2);

    let row: (f64, f64, f64, i64) = f
        .db
        .connection()
        .query_row(
            "SELECT prior_qw, prior_tx, prior_tz, camera_id FROM images WHERE image_id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .unwrap();
    assert_eq!(row, (1.0, 0.1, 0.3, 2));
    assert_eq!(f.db.query_image_camera(2).unwrap(), Some(1));
}

#[test]
fn test_image_pass_separate_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let db = ColmapDb::open(dir.path().join("database.db"), OpenMode::Create).unwrap();
    db.connection()
        .execute_batch(
            "CREATE TABLE images (
                image_id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
                name TEXT NOT NULL UNIQUE,
                camera_id INTEGER NOT NULL);
            CREATE TABLE pose_priors (
                image_id INTEGER PRIMARY KEY NOT NULL,
                position BLOB,
                coordinate_system INTEGER NOT NULL,
                position_covariance BLOB);
            INSERT INTO images (image_id, name, camera_id) VALUES (1, 'frame_1.png', 1);",
        )
        .unwrap();

    let path = dir.path().join("images.txt");
    std::fs::write(&path, "1 1.0 0.0 0.0 0.0 0.1 0.2 0.3 2 frame_1.png\n").unwrap();

    assert_eq!(load_images(&db, &path).unwrap(), 1);
    assert_eq!(db.query_image_camera(1).unwrap(), Some(2));

    let prior = db.query_pose_prior(1).unwrap().unwrap();
    assert_eq!(prior.position, [0.1, 0.2, 0.3]);
    assert_eq!(prior.coordinate_system, -1);
    assert!(prior.position_covariance.iter().all(|v| v.is_nan()));
}

#[test]
fn test_image_pass_malformed_line_discards_pass() {
    let f = fixture();
    let path = write_file(
        &f.root,
        "images.txt",
        "1 1.0 0.0 0.0 0.0 0.1 0.2 0.3 2 frame_1.png\n\
         2 1.0 0.0 0.0 oops 0.4 0.5 0.6 1 frame_2.png\n",
    );

    match load_images(&f.db, &path).unwrap_err() {
        IngestError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("expected Parse, got {other:?}"),
    }
    // Whole pass discarded, including the valid first line.
    assert_eq!(f.db.query_image_camera(1).unwrap(), Some(1));
}

#[test]
fn test_missing_input_file() {
    let f = fixture();
    match load_cameras(&f.db, &f.root.join("absent.txt")).unwrap_err() {
        IngestError::Io { message, .. } => assert!(message.contains("absent.txt")),
        other => panic!("expected Io, got {other:?}"),
    }
}
