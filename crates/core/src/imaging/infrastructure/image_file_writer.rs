use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};

use crate::geometry::face_rect::CropRegion;
use crate::imaging::domain::image_writer::ImageWriter;
use crate::shared::constants::JPEG_QUALITY;
use crate::shared::frame::Frame;

/// Crops, resamples with Lanczos3, and encodes to JPEG via the `image`
/// crate. Creates missing parent directories.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write_cropped(
        &self,
        path: &Path,
        frame: &Frame,
        crop: &CropRegion,
        target_size: u32,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Failed to create image from frame data")?;

        let side = crop.side();
        if side <= 0 || !crop.fits_within(frame.width(), frame.height()) {
            return Err(format!("Crop region {crop:?} outside frame bounds").into());
        }
        let cropped = imageops::crop_imm(&img, crop.x1 as u32, crop.y1 as u32, side as u32, side as u32)
            .to_image();

        let resized = imageops::resize(&cropped, target_size, target_size, FilterType::Lanczos3);

        let file = File::create(path)?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), JPEG_QUALITY);
        resized.write_with_encoder(encoder)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(width: u32, height: u32, rgb: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&rgb);
        }
        Frame::new(data, width, height)
    }

    fn full_crop(side: i32) -> CropRegion {
        CropRegion {
            x1: 0,
            y1: 0,
            x2: side,
            y2: side,
        }
    }

    #[test]
    fn test_write_creates_file_at_target_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpg");
        let frame = make_frame(200, 200, [120, 130, 140]);
        let writer = ImageFileWriter::new();
        writer
            .write_cropped(&path, &frame, &full_crop(200), 64)
            .unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.width(), 64);
        assert_eq!(img.height(), 64);
    }

    #[test]
    fn test_write_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cropped").join("alice.jpg");
        let frame = make_frame(100, 100, [10, 20, 30]);
        ImageFileWriter::new()
            .write_cropped(&path, &frame, &full_crop(100), 50)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_applies_crop_offset() {
        // Left half red, right half green; crop the right half
        let mut data = Vec::new();
        for _ in 0..100 {
            for x in 0..100 {
                if x < 50 {
                    data.extend_from_slice(&[255, 0, 0]);
                } else {
                    data.extend_from_slice(&[0, 255, 0]);
                }
            }
        }
        let frame = Frame::new(data, 100, 100);
        let crop = CropRegion {
            x1: 50,
            y1: 25,
            x2: 100,
            y2: 75,
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("right.jpg");
        ImageFileWriter::new()
            .write_cropped(&path, &frame, &crop, 50)
            .unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        let px = img.get_pixel(25, 25);
        // JPEG is lossy, so check dominance rather than exact values
        assert!(px[1] > 200 && px[0] < 60);
    }

    #[test]
    fn test_write_rejects_out_of_bounds_crop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jpg");
        let frame = make_frame(50, 50, [0, 0, 0]);
        let crop = CropRegion {
            x1: 0,
            y1: 0,
            x2: 60,
            y2: 60,
        };
        assert!(ImageFileWriter::new()
            .write_cropped(&path, &frame, &crop, 50)
            .is_err());
    }
}
