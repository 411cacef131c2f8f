use crate::geometry::face_rect::FaceRect;
use crate::shared::frame::Frame;

/// Domain interface for face detection.
///
/// Implementations may be stateful (e.g., a lazily initialized inference
/// session), hence `&mut self`. Output order is detector-defined; callers
/// that need "the" face sort by area first.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<FaceRect>, Box<dyn std::error::Error>>;
}
