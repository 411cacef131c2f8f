pub mod crop;
pub mod face_rect;
