use std::path::Path;

use crate::geometry::face_rect::CropRegion;
use crate::shared::frame::Frame;

/// Domain interface for emitting the final avatar: crop a frame to a
/// square region, resample to `target_size × target_size`, and persist.
pub trait ImageWriter: Send {
    fn write_cropped(
        &self,
        path: &Path,
        frame: &Frame,
        crop: &CropRegion,
        target_size: u32,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
