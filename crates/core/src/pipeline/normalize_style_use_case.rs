use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use crate::imaging::enhance::{
    self, STYLE_CONTRAST, STYLE_SATURATION, STYLE_UNSHARP_SIGMA, STYLE_UNSHARP_THRESHOLD,
};
use crate::shared::constants::{
    IMAGE_EXTENSIONS, JPEG_QUALITY, NORMALIZE_RATIO_MAX, NORMALIZE_RATIO_MIN,
};

/// Optional second pass over a directory of finished avatars: pull every
/// image's median brightness toward the set's median-of-medians, then
/// apply a light uniform style (contrast, saturation, unsharp mask).
///
/// Rewrites files in place, so running it twice drifts the set further;
/// it is off unless explicitly requested.
pub struct NormalizeStyleUseCase;

impl NormalizeStyleUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Returns the number of images rewritten. An empty directory is a
    /// no-op, not an error.
    pub fn execute(&self, dir: &Path) -> Result<usize, Box<dyn std::error::Error>> {
        let files = image_files(dir)?;
        if files.is_empty() {
            log::info!("no images to normalize in {}", dir.display());
            return Ok(0);
        }

        let mut images = Vec::with_capacity(files.len());
        for path in &files {
            let img = image::open(path)?.to_rgb8();
            let median = enhance::median_brightness(&img);
            images.push((path.clone(), img, median));
        }

        let reference = median_of(images.iter().map(|(_, _, m)| *m).collect());
        log::info!(
            "normalizing {} image(s) toward median brightness {reference:.1}",
            images.len()
        );

        for (path, mut img, median) in images {
            let ratio = (reference / median.max(1.0)).clamp(NORMALIZE_RATIO_MIN, NORMALIZE_RATIO_MAX);
            enhance::scale_brightness(&mut img, ratio);
            enhance::adjust_contrast(&mut img, STYLE_CONTRAST);
            enhance::adjust_saturation(&mut img, STYLE_SATURATION);
            let img = enhance::unsharp_mask(&img, STYLE_UNSHARP_SIGMA, STYLE_UNSHARP_THRESHOLD);
            write_jpeg(&path, &img)?;
            log::debug!("{}: brightness ratio {ratio:.3}", path.display());
        }

        Ok(files.len())
    }
}

impl Default for NormalizeStyleUseCase {
    fn default() -> Self {
        Self::new()
    }
}

fn image_files(dir: &Path) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn median_of(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        (values[n / 2 - 1] + values[n / 2]) / 2.0
    }
}

fn write_jpeg(path: &Path, img: &RgbImage) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(path)?;
    let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
    img.write_with_encoder(encoder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::Rgb;

    fn write_uniform(path: &Path, value: u8) {
        let img = RgbImage::from_pixel(40, 40, Rgb([value, value, value]));
        write_jpeg(path, &img).unwrap();
    }

    fn median_at(path: &Path) -> f64 {
        enhance::median_brightness(&image::open(path).unwrap().to_rgb8())
    }

    #[test]
    fn test_medians_pull_toward_reference_with_clamped_ratio() {
        let tmp = tempfile::tempdir().unwrap();
        let dark = tmp.path().join("a.jpg");
        let bright = tmp.path().join("b.jpg");
        write_uniform(&dark, 60);
        write_uniform(&bright, 200);

        let count = NormalizeStyleUseCase::new().execute(tmp.path()).unwrap();
        assert_eq!(count, 2);

        // Reference is 130; both ratios clamp (130/60 -> 1.3, 130/200 -> 0.7),
        // so the dark image lands near 78 and the bright one near 140.
        let dark_median = median_at(&dark);
        let bright_median = median_at(&bright);
        assert!(
            (74.0..=82.0).contains(&dark_median),
            "dark median {dark_median}"
        );
        assert!(
            (136.0..=144.0).contains(&bright_median),
            "bright median {bright_median}"
        );
    }

    #[test]
    fn test_empty_directory_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let count = NormalizeStyleUseCase::new().execute(tmp.path()).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_non_image_files_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("report.json"), b"{}").unwrap();
        let count = NormalizeStyleUseCase::new().execute(tmp.path()).unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_median_of_handles_even_and_odd_counts() {
        assert_relative_eq!(median_of(vec![3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median_of(vec![1.0, 2.0, 3.0, 4.0]), 2.5);
    }
}
