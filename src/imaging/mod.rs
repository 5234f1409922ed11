/// Pixel-level work
///
/// This module handles:
/// - Decoding reference and candidate images (loader.rs)
/// - The per-pixel absolute difference (diff.rs)
/// - Mean / max / histogram of a difference image (stats.rs)

pub mod loader;
pub mod diff;
pub mod stats;

pub use diff::difference;
pub use loader::load_image;
pub use stats::{DiffStats, Histogram};
