use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geometry::face_rect::{CropRegion, FaceRect};
use crate::shared::constants::{IDEAL_FACE_FRAC_MAX, IDEAL_FACE_FRAC_MIN, MIN_FACE_HEIGHT};

/// Discrete framing verdict for one candidate image.
///
/// The associated bonus table is strictly ordered, so a candidate with a
/// better framing status always starts from a higher base score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramingStatus {
    Ok,
    TooClose,
    TooFar,
    FaceTooSmall,
    MultiFace,
    NoFace,
}

impl FramingStatus {
    pub fn bonus(self) -> f64 {
        match self {
            FramingStatus::Ok => 2.0,
            FramingStatus::TooClose => 1.0,
            FramingStatus::TooFar => 0.5,
            FramingStatus::FaceTooSmall => 0.3,
            FramingStatus::MultiFace => 0.2,
            FramingStatus::NoFace => 0.0,
        }
    }
}

/// Derive the framing status for an image with at least one face.
///
/// Priority order: several faces beat all other verdicts, then an
/// absolutely tiny face, then the face-fraction band.
pub fn derive_status(face_count: usize, face_height: i32, face_frac: f64) -> FramingStatus {
    if face_count > 1 {
        FramingStatus::MultiFace
    } else if face_height < MIN_FACE_HEIGHT {
        FramingStatus::FaceTooSmall
    } else if face_frac < IDEAL_FACE_FRAC_MIN {
        FramingStatus::TooFar
    } else if face_frac > IDEAL_FACE_FRAC_MAX {
        FramingStatus::TooClose
    } else {
        FramingStatus::Ok
    }
}

/// Everything measured about one candidate image, computed once at
/// analysis time and immutable afterwards.
#[derive(Debug, Clone)]
pub struct CandidateAssessment {
    pub path: PathBuf,
    pub face: Option<FaceRect>,
    pub crop: CropRegion,
    /// Face height over crop side; 0 when no face.
    pub face_frac: f64,
    pub status: FramingStatus,
    /// Laplacian variance; higher is sharper.
    pub sharpness: f64,
    pub mean_brightness: f64,
    /// Height over width.
    pub aspect_ratio: f64,
    /// 0 = centered, toward 1 = corner; 0.5 neutral when no face.
    pub face_centrality: f64,
    pub has_text: bool,
    pub bad_brightness: bool,
}

impl CandidateAssessment {
    /// An ideal pick: well framed, no text overlay, brightness in range.
    /// Anything else that still wins selection is a fallback.
    pub fn acceptable(&self) -> bool {
        self.status == FramingStatus::Ok && !self.has_text && !self.bad_brightness
    }
}
