//! Pixel-level adjustment primitives for the batch style pass.
//!
//! Small, deterministic operations on `image::RgbImage` buffers. The
//! contrast and saturation adjustments pivot on luma so a factor of 1.0
//! is an exact identity.

use image::RgbImage;

/// Contrast multiplier applied during style normalization.
pub const STYLE_CONTRAST: f64 = 1.05;
/// Saturation multiplier applied during style normalization.
pub const STYLE_SATURATION: f64 = 1.02;
/// Unsharp mask blur radius (gaussian sigma, px).
pub const STYLE_UNSHARP_SIGMA: f32 = 0.6;
/// Unsharp mask threshold: channel deltas at or below this are left alone.
pub const STYLE_UNSHARP_THRESHOLD: i32 = 2;

/// Median over all channel samples of the image, 0.0 for an empty image.
///
/// Even sample counts average the two middle values, matching the usual
/// statistical median.
pub fn median_brightness(img: &RgbImage) -> f64 {
    let samples = img.as_raw();
    if samples.is_empty() {
        return 0.0;
    }
    let mut hist = [0u64; 256];
    for &v in samples {
        hist[v as usize] += 1;
    }
    let n = samples.len() as u64;
    if n % 2 == 1 {
        nth_sample(&hist, n / 2) as f64
    } else {
        let lo = nth_sample(&hist, n / 2 - 1) as f64;
        let hi = nth_sample(&hist, n / 2) as f64;
        (lo + hi) / 2.0
    }
}

/// Value of the k-th (0-based) sample in sorted order, via the histogram.
fn nth_sample(hist: &[u64; 256], k: u64) -> u8 {
    let mut seen = 0u64;
    for (value, &count) in hist.iter().enumerate() {
        seen += count;
        if seen > k {
            return value as u8;
        }
    }
    255
}

/// Multiply every channel by `ratio`, clamping to [0, 255].
pub fn scale_brightness(img: &mut RgbImage, ratio: f64) {
    for px in img.pixels_mut() {
        for c in 0..3 {
            px[c] = scale_channel(px[c], ratio);
        }
    }
}

/// Contrast around the image's mean luma: 1.0 is identity, >1.0 spreads
/// values away from the mean.
pub fn adjust_contrast(img: &mut RgbImage, factor: f64) {
    let pivot = mean_luma(img);
    for px in img.pixels_mut() {
        for c in 0..3 {
            let v = pivot + (px[c] as f64 - pivot) * factor;
            px[c] = clamp_channel(v);
        }
    }
}

/// Saturation as a per-pixel blend between the luma gray and the original
/// color: 0.0 yields grayscale, 1.0 is identity.
pub fn adjust_saturation(img: &mut RgbImage, factor: f64) {
    for px in img.pixels_mut() {
        let gray = luma(px[0], px[1], px[2]);
        for c in 0..3 {
            let v = gray + (px[c] as f64 - gray) * factor;
            px[c] = clamp_channel(v);
        }
    }
}

/// Light sharpening via the `image` crate's unsharp mask.
pub fn unsharp_mask(img: &RgbImage, sigma: f32, threshold: i32) -> RgbImage {
    image::imageops::unsharpen(img, sigma, threshold)
}

fn luma(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

fn mean_luma(img: &RgbImage) -> f64 {
    let count = (img.width() as u64 * img.height() as u64).max(1);
    let sum: f64 = img.pixels().map(|p| luma(p[0], p[1], p[2])).sum();
    sum / count as f64
}

fn scale_channel(v: u8, ratio: f64) -> u8 {
    clamp_channel(v as f64 * ratio)
}

fn clamp_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;

    fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn test_median_brightness_uniform() {
        let img = uniform(10, 10, [90, 90, 90]);
        assert_relative_eq!(median_brightness(&img), 90.0);
    }

    #[test]
    fn test_median_brightness_averages_middle_pair() {
        // Two pixels: samples are [10,10,10, 20,20,20] -> median 15
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([10, 10, 10]));
        img.put_pixel(1, 0, Rgb([20, 20, 20]));
        assert_relative_eq!(median_brightness(&img), 15.0);
    }

    #[test]
    fn test_scale_brightness_multiplies_and_clamps() {
        let mut img = uniform(2, 2, [100, 200, 0]);
        scale_brightness(&mut img, 1.5);
        let px = img.get_pixel(0, 0);
        assert_eq!(px.0, [150, 255, 0]);
    }

    #[test]
    fn test_adjust_contrast_identity_at_one() {
        let mut img = uniform(4, 4, [37, 141, 202]);
        let before = img.clone();
        adjust_contrast(&mut img, 1.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_adjust_contrast_spreads_from_mean() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([50, 50, 50]));
        img.put_pixel(1, 0, Rgb([150, 150, 150]));
        adjust_contrast(&mut img, 2.0);
        // mean luma = 100; 50 -> 0, 150 -> 200
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [200, 200, 200]);
    }

    #[test]
    fn test_adjust_saturation_zero_is_grayscale() {
        let mut img = uniform(2, 2, [200, 50, 10]);
        adjust_saturation(&mut img, 0.0);
        let px = img.get_pixel(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_adjust_saturation_identity_at_one() {
        let mut img = uniform(2, 2, [200, 50, 10]);
        let before = img.clone();
        adjust_saturation(&mut img, 1.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_unsharp_mask_preserves_dimensions() {
        let img = uniform(8, 6, [128, 128, 128]);
        let out = unsharp_mask(&img, STYLE_UNSHARP_SIGMA, STYLE_UNSHARP_THRESHOLD);
        assert_eq!(out.dimensions(), (8, 6));
    }
}
