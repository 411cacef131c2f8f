use crate::shared::frame::Frame;

/// Domain interface for detecting significant text overlay in an image
/// (captions, watermarks, meme text) that disqualifies it as an avatar.
pub trait TextDetector: Send {
    /// Whether a real implementation backs this detector. When false,
    /// `has_text` always reports no text and callers should surface a
    /// one-time warning.
    fn is_available(&self) -> bool {
        true
    }

    fn has_text(&mut self, frame: &Frame) -> Result<bool, Box<dyn std::error::Error>>;
}

/// Stand-in used when no OCR backend is present.
///
/// Reports every image as text-free so the text penalty degrades to a
/// no-op instead of failing the run.
pub struct NullTextDetector;

impl TextDetector for NullTextDetector {
    fn is_available(&self) -> bool {
        false
    }

    fn has_text(&mut self, _frame: &Frame) -> Result<bool, Box<dyn std::error::Error>> {
        Ok(false)
    }
}
