// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Read queries, used for post-ingestion verification.

use rusqlite::params;

use crate::blob::{decode_f64_array, decode_f64s};
use crate::connection::ColmapDb;
use crate::error::Result;
use crate::types::{CameraModel, CameraRow, PosePriorRow};

impl ColmapDb {
    /// Query one camera by id.
    ///
    /// Returns `None` if the camera is not in the database.
    pub fn query_camera(&self, camera_id: i64) -> Result<Option<CameraRow>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT camera_id, model, width, height, params, prior_focal_length \
             FROM cameras WHERE camera_id = ?1",
        )?;

        let raw = stmt.query_row(params![camera_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, Option<Vec<u8>>>(4)?,
                row.get::<_, Option<i64>>(5)?,
            ))
        });

        match raw {
            Ok(raw) => Ok(Some(camera_row(raw)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Query every camera, ordered by id.
    pub fn query_all_cameras(&self) -> Result<Vec<CameraRow>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT camera_id, model, width, height, params, prior_focal_length \
             FROM cameras ORDER BY camera_id",
        )?;

        let mut cameras = Vec::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            cameras.push(camera_row((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))?);
        }
        Ok(cameras)
    }

    /// Query the pose prior stored for an image in the separate-table
    /// layout.
    ///
    /// Returns `None` if no prior row exists for the image.
    pub fn query_pose_prior(&self, image_id: i64) -> Result<Option<PosePriorRow>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT image_id, position, coordinate_system, position_covariance \
             FROM pose_priors WHERE image_id = ?1",
        )?;

        let raw = stmt.query_row(params![image_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, Vec<u8>>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, Vec<u8>>(3)?,
            ))
        });

        match raw {
            Ok((image_id, position, coordinate_system, covariance)) => Ok(Some(PosePriorRow {
                image_id,
                position: decode_f64_array(&position)?,
                coordinate_system,
                position_covariance: decode_f64_array(&covariance)?,
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Query the camera association of an image.
    pub fn query_image_camera(&self, image_id: i64) -> Result<Option<i64>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT camera_id FROM images WHERE image_id = ?1")?;

        match stmt.query_row(params![image_id], |row| row.get(0)) {
            Ok(camera_id) => Ok(Some(camera_id)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

type RawCameraRow = (i64, i64, i64, i64, Option<Vec<u8>>, Option<i64>);

fn camera_row(
    (camera_id, model, width, height, blob, prior_focal_length): RawCameraRow,
) -> Result<CameraRow> {
    Ok(CameraRow {
        camera_id,
        model: CameraModel::from_code(model)?,
        width,
        height,
        params: decode_f64s(&blob.unwrap_or_default())?,
        prior_focal_length: prior_focal_length.unwrap_or(0) != 0,
    })
}
