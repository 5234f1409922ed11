/// State management module
///
/// This module handles everything between the disk and the UI:
/// - Candidate and sort key data structures (data.rs)
/// - Folder scanning and natural ordering (library.rs)
/// - The open folder and per-selection comparisons (session.rs)

pub mod library;
pub mod data;
pub mod session;

pub use data::{Candidate, SortKey};
pub use library::Library;
pub use session::{compare_in_background, Comparison, Difference, Session};
