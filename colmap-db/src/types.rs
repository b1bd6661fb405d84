// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Camera models and database row types.

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{Error, Result};

/// Coordinate-system tag stored with a pose prior; -1 means the reference
/// frame is unspecified.
pub const COORDINATE_SYSTEM_UNSPECIFIED: i64 = -1;

/// COLMAP intrinsic camera model codes.
///
/// The integer values are part of the database contract and must match the
/// upstream enumeration exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(i64)]
pub enum CameraModel {
    SimplePinhole = 0,
    Pinhole = 1,
    SimpleRadial = 2,
    Radial = 3,
    OpenCv = 4,
    FullOpenCv = 5,
    SimpleRadialFisheye = 6,
    RadialFisheye = 7,
    OpenCvFisheye = 8,
    Fov = 9,
    ThinPrismFisheye = 10,
}

impl CameraModel {
    /// Parse the model name used in COLMAP text exports.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "SIMPLE_PINHOLE" => Ok(CameraModel::SimplePinhole),
            "PINHOLE" => Ok(CameraModel::Pinhole),
            "SIMPLE_RADIAL" => Ok(CameraModel::SimpleRadial),
            "RADIAL" => Ok(CameraModel::Radial),
            "OPENCV" => Ok(CameraModel::OpenCv),
            "FULL_OPENCV" => Ok(CameraModel::FullOpenCv),
            "SIMPLE_RADIAL_FISHEYE" => Ok(CameraModel::SimpleRadialFisheye),
            "RADIAL_FISHEYE" => Ok(CameraModel::RadialFisheye),
            "OPENCV_FISHEYE" => Ok(CameraModel::OpenCvFisheye),
            "FOV" => Ok(CameraModel::Fov),
            "THIN_PRISM_FISHEYE" => Ok(CameraModel::ThinPrismFisheye),
            _ => Err(Error::UnknownCameraModel(name.to_string())),
        }
    }

    /// Parse the numeric model code stored in the database.
    pub fn from_code(code: i64) -> Result<Self> {
        Self::try_from(code).map_err(|_| Error::UnknownCameraModelId(code))
    }

    /// The model name used in COLMAP text exports.
    pub fn name(&self) -> &'static str {
        match self {
            CameraModel::SimplePinhole => "SIMPLE_PINHOLE",
            CameraModel::Pinhole => "PINHOLE",
            CameraModel::SimpleRadial => "SIMPLE_RADIAL",
            CameraModel::Radial => "RADIAL",
            CameraModel::OpenCv => "OPENCV",
            CameraModel::FullOpenCv => "FULL_OPENCV",
            CameraModel::SimpleRadialFisheye => "SIMPLE_RADIAL_FISHEYE",
            CameraModel::RadialFisheye => "RADIAL_FISHEYE",
            CameraModel::OpenCvFisheye => "OPENCV_FISHEYE",
            CameraModel::Fov => "FOV",
            CameraModel::ThinPrismFisheye => "THIN_PRISM_FISHEYE",
        }
    }

    /// Canonical intrinsic parameter count for this model.
    ///
    /// Informational; the writer stores whatever parameter vector the input
    /// supplied.
    pub fn num_params(&self) -> usize {
        match self {
            CameraModel::SimplePinhole => 3,
            CameraModel::Pinhole => 4,
            CameraModel::SimpleRadial => 4,
            CameraModel::Radial => 5,
            CameraModel::OpenCv => 8,
            CameraModel::FullOpenCv => 12,
            CameraModel::SimpleRadialFisheye => 4,
            CameraModel::RadialFisheye => 5,
            CameraModel::OpenCvFisheye => 8,
            CameraModel::Fov => 5,
            CameraModel::ThinPrismFisheye => 12,
        }
    }

    /// The numeric model code stored in the database.
    pub fn code(&self) -> i64 {
        (*self).into()
    }
}

/// A row from the cameras table, with params decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRow {
    pub camera_id: i64,
    pub model: CameraModel,
    pub width: i64,
    pub height: i64,
    pub params: Vec<f64>,
    /// Whether the focal length is a prior estimate rather than a
    /// calibrated value
    pub prior_focal_length: bool,
}

/// A row from the pose_priors table, with BLOBs decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PosePriorRow {
    pub image_id: i64,
    /// Prior position (tx, ty, tz)
    pub position: [f64; 3],
    /// Reference frame tag; [`COORDINATE_SYSTEM_UNSPECIFIED`] when unknown
    pub coordinate_system: i64,
    /// Row-major 3x3 position covariance; all-NaN when unknown
    pub position_covariance: [f64; 9],
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("SIMPLE_PINHOLE", CameraModel::SimplePinhole, 0, 3)]
    #[case("PINHOLE", CameraModel::Pinhole, 1, 4)]
    #[case("SIMPLE_RADIAL", CameraModel::SimpleRadial, 2, 4)]
    #[case("RADIAL", CameraModel::Radial, 3, 5)]
    #[case("OPENCV", CameraModel::OpenCv, 4, 8)]
    #[case("FULL_OPENCV", CameraModel::FullOpenCv, 5, 12)]
    #[case("SIMPLE_RADIAL_FISHEYE", CameraModel::SimpleRadialFisheye, 6, 4)]
    #[case("RADIAL_FISHEYE", CameraModel::RadialFisheye, 7, 5)]
    #[case("OPENCV_FISHEYE", CameraModel::OpenCvFisheye, 8, 8)]
    #[case("FOV", CameraModel::Fov, 9, 5)]
    #[case("THIN_PRISM_FISHEYE", CameraModel::ThinPrismFisheye, 10, 12)]
    fn test_model_table(
        #[case] name: &str,
        #[case] model: CameraModel,
        #[case] code: i64,
        #[case] num_params: usize,
    ) {
        assert_eq!(CameraModel::from_name(name).unwrap(), model);
        assert_eq!(model.name(), name);
        assert_eq!(model.code(), code);
        assert_eq!(CameraModel::from_code(code).unwrap(), model);
        assert_eq!(model.num_params(), num_params);
    }

    #[test]
    fn test_unknown_model_rejected() {
        assert!(matches!(
            CameraModel::from_name("EQUIRECTANGULAR"),
            Err(Error::UnknownCameraModel(_))
        ));
        assert!(matches!(
            CameraModel::from_code(11),
            Err(Error::UnknownCameraModelId(11))
        ));
    }
}
