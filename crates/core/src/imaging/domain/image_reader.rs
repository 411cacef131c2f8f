use std::path::Path;

use crate::shared::frame::Frame;

/// Domain interface for decoding an image file into an RGB [`Frame`].
pub trait ImageReader: Send {
    fn read(&self, path: &Path) -> Result<Frame, Box<dyn std::error::Error>>;
}
