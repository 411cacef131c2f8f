//! Batch avatar preparation: pick the best candidate photo per identity
//! from a staging directory and emit a deterministic square headshot crop
//! for each one.

pub mod analysis;
pub mod detection;
pub mod geometry;
pub mod imaging;
pub mod pipeline;
pub mod shared;
