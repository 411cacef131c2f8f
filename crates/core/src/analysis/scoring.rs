//! Scalar suitability score for a candidate assessment.
//!
//! The weights rank true portraits above group shots, text-overlaid
//! graphics, and badly framed faces, while still producing a usable
//! ordering when every candidate is flawed. Scoring never excludes a
//! candidate; only unreadable images are dropped earlier.

use crate::analysis::candidate::CandidateAssessment;
use crate::shared::constants::SHARPNESS_NORM;

pub const TEXT_PENALTY: f64 = 1.5;
pub const BRIGHTNESS_PENALTY: f64 = 0.5;

const PORTRAIT_BONUS: f64 = 0.3;
const WIDE_PENALTY: f64 = -0.5;
/// Below this height/width ratio an image is likely a group or crowd shot.
const WIDE_ASPECT_CUTOFF: f64 = 0.55;

const CENTERED_BONUS: f64 = 0.2;
const OFF_CENTER_PENALTY: f64 = -0.2;

/// Higher is better. Deterministic in the assessment alone.
pub fn score(a: &CandidateAssessment) -> f64 {
    let mut total = a.status.bonus();

    total += (a.sharpness / SHARPNESS_NORM).min(1.0);

    if a.has_text {
        total -= TEXT_PENALTY;
    }
    if a.bad_brightness {
        total -= BRIGHTNESS_PENALTY;
    }

    total += aspect_bonus(a.aspect_ratio);
    total += centrality_bonus(a.face_centrality);

    total
}

/// Prefer portrait or square; penalize very wide frames.
fn aspect_bonus(aspect: f64) -> f64 {
    if aspect >= 1.0 {
        PORTRAIT_BONUS
    } else if aspect < WIDE_ASPECT_CUTOFF {
        WIDE_PENALTY
    } else {
        0.0
    }
}

/// Prefer a face near the center of the frame.
fn centrality_bonus(centrality: f64) -> f64 {
    if centrality <= 0.2 {
        CENTERED_BONUS
    } else if centrality > 0.5 {
        OFF_CENTER_PENALTY
    } else {
        0.0
    }
}
