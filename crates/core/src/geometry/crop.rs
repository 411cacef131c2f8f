//! Square crop derivation from image dimensions and an optional face box.
//!
//! Both functions are pure and deterministic: the same inputs always yield
//! the same region, and the result is exactly square and fully inside the
//! image.

use crate::geometry::face_rect::{CropRegion, FaceRect};
use crate::shared::constants::{CROP_FACE_SCALE, FACE_OFFSET_UP, TARGET_SIZE};

/// Largest centered square that fits inside the image. Used when no face
/// was detected.
pub fn centered_square(img_width: u32, img_height: u32) -> CropRegion {
    let w = img_width as i32;
    let h = img_height as i32;
    let side = w.min(h);
    let x1 = (w - side) / 2;
    let y1 = (h - side) / 2;
    CropRegion {
        x1,
        y1,
        x2: x1 + side,
        y2: y1 + side,
    }
}

/// Head-and-bust crop around a face box.
///
/// The side is `face_height * CROP_FACE_SCALE` (at least half the target
/// size), centered horizontally on the face and shifted up so the face
/// occupies the upper portion of the frame. The window is clamped by
/// shifting, not shrinking; only when the image itself is smaller than the
/// side is the excess trimmed symmetrically from the larger dimension.
pub fn face_crop(img_width: u32, img_height: u32, face: &FaceRect) -> CropRegion {
    let w_img = img_width as i32;
    let h_img = img_height as i32;
    let (fcx, fcy) = face.center();

    let side = ((face.height as f64 * CROP_FACE_SCALE) as i32).max(TARGET_SIZE as i32 / 2);

    let cx = fcx;
    let cy = fcy - side as f64 * (FACE_OFFSET_UP - 0.5);

    let mut x1 = (cx - side as f64 / 2.0) as i32;
    let mut y1 = (cy - side as f64 / 2.0) as i32;

    // Shift back inside the image
    x1 = x1.min(w_img - side).max(0);
    y1 = y1.min(h_img - side).max(0);
    let mut x2 = (x1 + side).min(w_img);
    let mut y2 = (y1 + side).min(h_img);

    // Image smaller than the ideal side: trim the larger dimension
    // symmetrically down to a square
    let w_crop = x2 - x1;
    let h_crop = y2 - y1;
    if w_crop > h_crop {
        let d = (w_crop - h_crop) / 2;
        x1 += d;
        x2 -= w_crop - h_crop - d;
    } else if h_crop > w_crop {
        let d = (h_crop - w_crop) / 2;
        y1 += d;
        y2 -= h_crop - w_crop - d;
    }

    CropRegion { x1, y1, x2, y2 }
}
