// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Write operations for calibration and pose-prior injection.

use rusqlite::params;

use crate::blob::encode_f64s;
use crate::connection::ColmapDb;
use crate::error::Result;
use crate::prior::PosePriorStorage;
use crate::types::{CameraModel, COORDINATE_SYSTEM_UNSPECIFIED};

impl ColmapDb {
    /// Overwrite a camera's intrinsic model.
    ///
    /// Issues an UPDATE keyed by `camera_id`; the row must already exist.
    /// Returns the number of affected rows so callers can detect an absent
    /// id. The focal length is always marked as a prior estimate when
    /// written through this path.
    pub fn update_camera(
        &self,
        model: CameraModel,
        width: i64,
        height: i64,
        camera_params: &[f64],
        camera_id: i64,
    ) -> Result<usize> {
        let affected = self.conn.execute(
            "UPDATE cameras SET model=?1, width=?2, height=?3, params=?4, \
             prior_focal_length=1 WHERE camera_id=?5",
            params![
                model.code(),
                width,
                height,
                encode_f64s(camera_params),
                camera_id
            ],
        )?;
        Ok(affected)
    }

    /// Write one image's camera association and prior pose.
    ///
    /// Dispatches on the layout resolved by [`ColmapDb::prior_storage`];
    /// exactly one branch executes per call. In the separate-table layout
    /// only the position is persisted — the orientation quaternion is
    /// dropped, matching upstream behavior — together with an unspecified
    /// coordinate-system tag and an all-NaN covariance. Returns the number
    /// of images rows the write matched.
    pub fn update_image_pose(
        &self,
        image_id: i64,
        qvec: [f64; 4],
        tvec: [f64; 3],
        camera_id: i64,
    ) -> Result<usize> {
        match self.prior_storage()? {
            PosePriorStorage::InlineColumns {
                q_columns,
                t_columns,
            } => {
                let assignments: Vec<String> = q_columns
                    .iter()
                    .chain(t_columns.iter())
                    .map(|column| format!("{column}=?"))
                    .collect();
                let sql = format!(
                    "UPDATE images SET {}, camera_id=? WHERE image_id=?",
                    assignments.join(", ")
                );
                let affected = self.conn.execute(
                    &sql,
                    params![
                        qvec[0], qvec[1], qvec[2], qvec[3], tvec[0], tvec[1], tvec[2], camera_id,
                        image_id
                    ],
                )?;
                Ok(affected)
            }
            PosePriorStorage::SeparateTable => {
                let affected = self.conn.execute(
                    "UPDATE images SET camera_id=?1 WHERE image_id=?2",
                    params![camera_id, image_id],
                )?;
                self.conn.execute(
                    "INSERT OR REPLACE INTO pose_priors \
                     (image_id, position, coordinate_system, position_covariance) \
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        image_id,
                        encode_f64s(&tvec),
                        COORDINATE_SYSTEM_UNSPECIFIED,
                        encode_f64s(&[f64::NAN; 9]),
                    ],
                )?;
                Ok(affected)
            }
        }
    }
}
