/// Desktop widgets
///
/// - Histogram canvas (histogram.rs)
/// - Image panels and error notices (panels.rs)

pub mod histogram;
pub mod panels;

pub use panels::{notice, ComparisonPanel};
