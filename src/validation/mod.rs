mod normalizer;
mod timestamp;

pub use normalizer::{normalize, Normalized};
pub use timestamp::parse_timestamp;
