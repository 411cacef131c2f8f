pub const BLAZEFACE_MODEL_NAME: &str = "blazeface_short_range.onnx";
pub const BLAZEFACE_MODEL_URL: &str =
    "https://github.com/headshot-tools/headshot/releases/download/v0.1.0/blazeface_short_range.onnx";

/// Side length of the final square avatar in pixels.
pub const TARGET_SIZE: u32 = 300;

/// Crop side as a multiple of the detected face height (head + shoulders).
pub const CROP_FACE_SCALE: f64 = 2.6;

/// Fraction of the crop that sits above the face center, so the face lands
/// in the upper portion of the frame.
pub const FACE_OFFSET_UP: f64 = 0.35;

/// Ideal band for face height divided by crop side.
pub const IDEAL_FACE_FRAC_MIN: f64 = 0.22;
pub const IDEAL_FACE_FRAC_MAX: f64 = 0.45;

/// Minimum face height (px) below which framing cannot be salvaged.
pub const MIN_FACE_HEIGHT: i32 = 40;

/// Mean gray outside this range counts as a brightness defect
/// (near-black or blown out).
pub const BRIGHTNESS_MIN: f64 = 28.0;
pub const BRIGHTNESS_MAX: f64 = 232.0;

/// Laplacian variance at or above this value earns the full sharpness bonus.
pub const SHARPNESS_NORM: f64 = 500.0;

pub const JPEG_QUALITY: u8 = 92;

/// Brightness-equalization ratio clamp, to avoid over-correcting outliers.
pub const NORMALIZE_RATIO_MIN: f64 = 0.7;
pub const NORMALIZE_RATIO_MAX: f64 = 1.3;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Subdirectory of the staging dir that receives final avatars.
pub const CROPPED_SUBDIR: &str = "cropped";

pub const REPORT_FILENAME: &str = "report.json";
