pub mod face_detector;
pub mod text_detector;
