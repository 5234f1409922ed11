//! Compare skip-layer renders against a reference image.
//!
//! The library side is the synchronous core the desktop shell calls into:
//! decode images, list a folder in natural order, diff two images and
//! summarise the result.

pub mod config;
pub mod error;
pub mod imaging;
pub mod state;

pub use config::ViewerConfig;
pub use error::{CompareError, Severity};
