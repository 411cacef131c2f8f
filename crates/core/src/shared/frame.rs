use ndarray::{Array2, ArrayView3};

/// A decoded image: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at I/O boundaries only; analysis code
/// treats pixel data as opaque except through the views below.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// View as `(height, width, 3)`.
    pub fn as_ndarray(&self) -> ArrayView3<'_, u8> {
        ArrayView3::from_shape(self.shape(), &self.data)
            .expect("Frame data length must match dimensions")
    }

    /// Rec. 601 luma plane as `(height, width)` float32.
    pub fn luma(&self) -> Array2<f32> {
        let h = self.height as usize;
        let w = self.width as usize;
        let mut out = Array2::<f32>::zeros((h, w));
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) * 3;
                let r = self.data[i] as f32;
                let g = self.data[i + 1] as f32;
                let b = self.data[i + 2] as f32;
                out[[y, x]] = 0.299 * r + 0.587 * g + 0.114 * b;
            }
        }
        out
    }

    fn shape(&self) -> (usize, usize, usize) {
        (self.height as usize, self.width as usize, 3)
    }
}
