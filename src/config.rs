//! Viewer settings.
//!
//! There is no config file; the shell fills this from command line flags
//! and everything else falls back to the defaults below.

use std::path::{Path, PathBuf};

/// Folder searched when none is given, relative to the working directory
pub const DEFAULT_FOLDER: &str = "images";

/// Filename of the baseline every candidate is compared against
pub const DEFAULT_REFERENCE: &str = "image_original.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Directory holding the reference and candidate images
    pub folder: PathBuf,
    /// Filename (not path) of the reference image inside `folder`
    pub reference_name: String,
}

impl ViewerConfig {
    pub fn new(folder: impl Into<PathBuf>, reference_name: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            reference_name: reference_name.into(),
        }
    }

    /// Full path of the reference image
    pub fn reference_path(&self) -> PathBuf {
        self.folder.join(&self.reference_name)
    }

    /// Same settings pointed at another folder
    pub fn with_folder(&self, folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            reference_name: self.reference_name.clone(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(cwd.join(DEFAULT_FOLDER), DEFAULT_REFERENCE)
    }
}
