pub mod analyzer;
pub mod candidate;
pub mod metrics;
pub mod scoring;
