//! Per-image measurements feeding the suitability score.

use crate::geometry::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Mean luma over the whole frame.
pub fn mean_brightness(frame: &Frame) -> f64 {
    let luma = frame.luma();
    let n = luma.len();
    if n == 0 {
        return 0.0;
    }
    luma.iter().map(|&v| v as f64).sum::<f64>() / n as f64
}

/// Variance of the 4-neighbor Laplacian over the luma plane.
///
/// Higher means sharper: crisp edges produce strong second-derivative
/// responses. Frames smaller than 3x3 score 0.
pub fn laplacian_variance(frame: &Frame) -> f64 {
    let luma = frame.luma();
    let (h, w) = (luma.nrows(), luma.ncols());
    if h < 3 || w < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let count = ((h - 2) * (w - 2)) as f64;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let response = (luma[[y - 1, x]] + luma[[y + 1, x]] + luma[[y, x - 1]]
                + luma[[y, x + 1]]
                - 4.0 * luma[[y, x]]) as f64;
            sum += response;
            sum_sq += response * response;
        }
    }
    let mean = sum / count;
    sum_sq / count - mean * mean
}

/// Height over width; 1.0 for a degenerate zero-width image.
pub fn aspect_ratio(width: u32, height: u32) -> f64 {
    if width == 0 {
        return 1.0;
    }
    height as f64 / width as f64
}

/// Distance from the face center to the image center, normalized by the
/// image diagonal: 0 is perfectly centered, values toward 1 approach a
/// corner.
pub fn face_centrality(face: &FaceRect, img_width: u32, img_height: u32) -> f64 {
    let (fcx, fcy) = face.center();
    let cx = img_width as f64 / 2.0;
    let cy = img_height as f64 / 2.0;
    let dist = ((fcx - cx).powi(2) + (fcy - cy).powi(2)).sqrt();
    let diag = ((img_width as f64).powi(2) + (img_height as f64).powi(2)).sqrt();
    if diag > 0.0 {
        dist / diag
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(vec![value; (width * height * 3) as usize], width, height)
    }

    #[test]
    fn test_mean_brightness_uniform() {
        let frame = flat_frame(10, 10, 77);
        assert_relative_eq!(mean_brightness(&frame), 77.0, epsilon = 1e-3);
    }

    #[test]
    fn test_laplacian_variance_flat_is_zero() {
        let frame = flat_frame(20, 20, 128);
        assert_relative_eq!(laplacian_variance(&frame), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_laplacian_variance_edge_is_positive() {
        // Vertical step edge down the middle
        let mut data = Vec::new();
        for _ in 0..20 {
            for x in 0..20 {
                let v = if x < 10 { 0u8 } else { 255u8 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        let frame = Frame::new(data, 20, 20);
        assert!(laplacian_variance(&frame) > 100.0);
    }

    #[test]
    fn test_laplacian_variance_tiny_frame_is_zero() {
        let frame = flat_frame(2, 2, 10);
        assert_relative_eq!(laplacian_variance(&frame), 0.0);
    }

    #[test]
    fn test_aspect_ratio() {
        assert_relative_eq!(aspect_ratio(100, 100), 1.0);
        assert_relative_eq!(aspect_ratio(200, 100), 0.5);
        assert_relative_eq!(aspect_ratio(100, 200), 2.0);
        assert_relative_eq!(aspect_ratio(0, 100), 1.0);
    }

    #[test]
    fn test_face_centrality_centered_is_zero() {
        let face = FaceRect {
            x: 40,
            y: 40,
            width: 20,
            height: 20,
        };
        assert_relative_eq!(face_centrality(&face, 100, 100), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_face_centrality_corner_face() {
        // Face center (1, 1) in a 100x100 image: dist = sqrt(2 * 49^2)
        let face = FaceRect {
            x: 0,
            y: 0,
            width: 2,
            height: 2,
        };
        let expected = (2.0f64 * 49.0 * 49.0).sqrt() / (2.0f64 * 100.0 * 100.0).sqrt();
        assert_relative_eq!(face_centrality(&face, 100, 100), expected, epsilon = 1e-9);
    }
}
