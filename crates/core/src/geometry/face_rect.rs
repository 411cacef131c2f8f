/// A detected face bounding box in source-image pixels.
///
/// Detectors may return any number of these; the largest-area box is
/// treated as the subject face when several are present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl FaceRect {
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }

    /// Sort by area descending. Stable, so detector order breaks area ties,
    /// keeping the "largest face wins" rule deterministic.
    pub fn sort_by_area_desc(faces: &mut [FaceRect]) {
        faces.sort_by_key(|f| std::cmp::Reverse(f.area()));
    }
}

/// A square crop window, fully inside its source image.
///
/// Invariant: `x2 - x1 == y2 - y1` and `0 <= x1 < x2 <= width`
/// (same for y). Construction goes through [`crate::geometry::crop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CropRegion {
    pub fn side(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn is_square(&self) -> bool {
        self.x2 - self.x1 == self.y2 - self.y1
    }

    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x1 >= 0
            && self.y1 >= 0
            && self.x1 < self.x2
            && self.y1 < self.y2
            && self.x2 <= width as i32
            && self.y2 <= height as i32
    }
}
