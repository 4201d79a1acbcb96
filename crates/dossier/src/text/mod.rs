//! Text post-processing utilities.

pub mod normalize;

pub use normalize::{NormalizationConfig, WhitespaceMode, normalize};
