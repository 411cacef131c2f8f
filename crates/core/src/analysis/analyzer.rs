use std::path::Path;

use crate::analysis::candidate::{derive_status, CandidateAssessment, FramingStatus};
use crate::analysis::metrics;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::text_detector::TextDetector;
use crate::geometry::crop;
use crate::geometry::face_rect::FaceRect;
use crate::imaging::domain::image_reader::ImageReader;
use crate::shared::constants::{BRIGHTNESS_MAX, BRIGHTNESS_MIN};

/// Measures one candidate image for avatar suitability.
///
/// Always produces an assessment for a readable image, however flawed,
/// so selection can fall back to "best available" when nothing is ideal.
/// Returns `None` only when the image cannot be decoded or the detector
/// itself fails.
pub struct CandidateAnalyzer {
    reader: Box<dyn ImageReader>,
    face_detector: Box<dyn FaceDetector>,
    text_detector: Box<dyn TextDetector>,
}

impl CandidateAnalyzer {
    pub fn new(
        reader: Box<dyn ImageReader>,
        face_detector: Box<dyn FaceDetector>,
        text_detector: Box<dyn TextDetector>,
    ) -> Self {
        Self {
            reader,
            face_detector,
            text_detector,
        }
    }

    pub fn text_available(&self) -> bool {
        self.text_detector.is_available()
    }

    pub fn analyze(&mut self, path: &Path) -> Option<CandidateAssessment> {
        let frame = match self.reader.read(path) {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("skipping unreadable image {}: {e}", path.display());
                return None;
            }
        };

        let has_text = match self.text_detector.has_text(&frame) {
            Ok(found) => found,
            Err(e) => {
                log::debug!("text detection failed for {}: {e}", path.display());
                false
            }
        };

        let mut faces = match self.face_detector.detect(&frame) {
            Ok(faces) => faces,
            Err(e) => {
                log::warn!("face detection failed for {}: {e}", path.display());
                return None;
            }
        };
        FaceRect::sort_by_area_desc(&mut faces);

        let brightness = metrics::mean_brightness(&frame);
        let bad_brightness = !(BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&brightness);
        let sharpness = metrics::laplacian_variance(&frame);
        let aspect_ratio = metrics::aspect_ratio(frame.width(), frame.height());

        let Some(face) = faces.first().copied() else {
            return Some(CandidateAssessment {
                path: path.to_path_buf(),
                face: None,
                crop: crop::centered_square(frame.width(), frame.height()),
                face_frac: 0.0,
                status: FramingStatus::NoFace,
                sharpness,
                mean_brightness: brightness,
                aspect_ratio,
                face_centrality: 0.5,
                has_text,
                bad_brightness,
            });
        };

        let crop = crop::face_crop(frame.width(), frame.height(), &face);
        let face_frac = if crop.side() > 0 {
            face.height as f64 / crop.side() as f64
        } else {
            0.0
        };
        let status = derive_status(faces.len(), face.height, face_frac);
        let face_centrality = metrics::face_centrality(&face, frame.width(), frame.height());

        Some(CandidateAssessment {
            path: path.to_path_buf(),
            face: Some(face),
            crop,
            face_frac,
            status,
            sharpness,
            mean_brightness: brightness,
            aspect_ratio,
            face_centrality,
            has_text,
            bad_brightness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::frame::Frame;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    struct StubReader {
        frame: Option<Frame>,
    }

    impl ImageReader for StubReader {
        fn read(&self, _path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
            self.frame
                .clone()
                .ok_or_else(|| "unreadable".to_string().into())
        }
    }

    struct StubFaceDetector {
        faces: Vec<FaceRect>,
    }

    impl FaceDetector for StubFaceDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>> {
            Ok(self.faces.clone())
        }
    }

    struct FixedTextDetector {
        found: bool,
    }

    impl TextDetector for FixedTextDetector {
        fn has_text(&mut self, _frame: &Frame) -> Result<bool, Box<dyn std::error::Error>> {
            Ok(self.found)
        }
    }

    fn analyzer_with(
        frame: Option<Frame>,
        faces: Vec<FaceRect>,
        text: bool,
    ) -> CandidateAnalyzer {
        CandidateAnalyzer::new(
            Box::new(StubReader { frame }),
            Box::new(StubFaceDetector { faces }),
            Box::new(FixedTextDetector { found: text }),
        )
    }

    fn flat_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(vec![value; (width * height * 3) as usize], width, height)
    }

    fn face(x: i32, y: i32, w: i32, h: i32) -> FaceRect {
        FaceRect {
            x,
            y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_unreadable_image_yields_none() {
        let mut analyzer = analyzer_with(None, vec![], false);
        assert!(analyzer.analyze(Path::new("gone.jpg")).is_none());
    }

    #[test]
    fn test_no_face_assessment() {
        let mut analyzer = analyzer_with(Some(flat_frame(100, 80, 128)), vec![], false);
        let a = analyzer.analyze(Path::new("landscape.jpg")).unwrap();
        assert_eq!(a.status, FramingStatus::NoFace);
        assert_eq!(a.face, None);
        assert_relative_eq!(a.face_frac, 0.0);
        assert_relative_eq!(a.face_centrality, 0.5);
        // Centered largest square of a 100x80 image
        assert_eq!((a.crop.x1, a.crop.y1, a.crop.x2, a.crop.y2), (10, 0, 90, 80));
        assert!(!a.bad_brightness);
    }

    #[test]
    fn test_single_well_framed_face_is_ok() {
        // Face height 100 -> crop side 260 -> frac ~0.385, inside the band
        let mut analyzer = analyzer_with(
            Some(flat_frame(600, 600, 128)),
            vec![face(250, 250, 100, 100)],
            false,
        );
        let a = analyzer.analyze(Path::new("portrait.jpg")).unwrap();
        assert_eq!(a.status, FramingStatus::Ok);
        assert_relative_eq!(a.face_frac, 100.0 / 260.0, epsilon = 1e-9);
        assert!(a.face_centrality < 0.01);
        assert_eq!(a.path, PathBuf::from("portrait.jpg"));
    }

    #[test]
    fn test_multiple_faces_flagged_and_largest_wins() {
        let big = face(10, 10, 120, 120);
        let small = face(400, 400, 50, 50);
        // Detector returns smallest first; analyzer must re-sort
        let mut analyzer =
            analyzer_with(Some(flat_frame(600, 600, 128)), vec![small, big], false);
        let a = analyzer.analyze(Path::new("pair.jpg")).unwrap();
        assert_eq!(a.status, FramingStatus::MultiFace);
        assert_eq!(a.face, Some(big));
    }

    #[test]
    fn test_tiny_face_flagged() {
        let mut analyzer = analyzer_with(
            Some(flat_frame(600, 600, 128)),
            vec![face(290, 290, 20, 20)],
            false,
        );
        let a = analyzer.analyze(Path::new("tiny.jpg")).unwrap();
        assert_eq!(a.status, FramingStatus::FaceTooSmall);
    }

    #[test]
    fn test_dark_frame_has_bad_brightness() {
        let mut analyzer = analyzer_with(Some(flat_frame(50, 50, 10)), vec![], false);
        let a = analyzer.analyze(Path::new("dark.jpg")).unwrap();
        assert!(a.bad_brightness);
    }

    #[test]
    fn test_text_flag_propagates() {
        let mut analyzer = analyzer_with(Some(flat_frame(50, 50, 128)), vec![], true);
        let a = analyzer.analyze(Path::new("meme.jpg")).unwrap();
        assert!(a.has_text);
    }

    #[test]
    fn test_text_available_reflects_detector() {
        use crate::detection::domain::text_detector::NullTextDetector;
        let analyzer = CandidateAnalyzer::new(
            Box::new(StubReader { frame: None }),
            Box::new(StubFaceDetector { faces: vec![] }),
            Box::new(NullTextDetector),
        );
        assert!(!analyzer.text_available());
    }
}
