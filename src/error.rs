//! Error types for loading, scanning and comparing images.

use std::path::PathBuf;
use thiserror::Error;

/// How loudly the shell should report an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Everything that can stop a comparison step.
///
/// None of these are fatal: the shell shows the message in place of the
/// step that failed and keeps running.
#[derive(Error, Debug)]
pub enum CompareError {
    /// The baseline image is not in the folder
    #[error(
        "There is no reference image. Please add '{}' to the '{}' folder.",
        .name, folder_label(.folder)
    )]
    MissingReferenceImage {
        /// Expected filename of the reference image
        name: String,
        /// Folder the reference was expected in
        folder: PathBuf,
    },

    /// The images folder itself does not exist
    #[error("The '{}' folder does not exist ({}).", folder_label(.path), .path.display())]
    MissingFolder { path: PathBuf },

    /// Folder exists but holds nothing to compare against the reference
    #[error("No skip layer images found in the '{}' folder.", folder_label(.folder))]
    NoCandidateImages { folder: PathBuf },

    /// The selected image was listed but is gone now
    #[error("Image not found: {}", .path.display())]
    MissingCandidate { path: PathBuf },

    /// Inputs to the difference engine have different sizes
    #[error(
        "Image sizes do not match ({} vs {}). Cannot compute difference.",
        size_label(.left), size_label(.right)
    )]
    DimensionMismatch {
        /// (width, height) of the first image
        left: (u32, u32),
        /// (width, height) of the second image
        right: (u32, u32),
    },

    /// File exists but could not be decoded
    #[error("Failed to decode {}: {}", .path.display(), .source)]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Listing the folder failed for a reason other than absence
    #[error("Failed to read folder: {0}")]
    Scan(#[from] walkdir::Error),

    /// The background worker panicked or was cancelled
    #[error("Comparison did not finish: {0}")]
    Background(#[from] tokio::task::JoinError),
}

impl CompareError {
    pub fn severity(&self) -> Severity {
        match self {
            CompareError::NoCandidateImages { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

fn size_label(&(width, height): &(u32, u32)) -> String {
    format!("{}x{}", width, height)
}

/// Last path component, used to name folders the way a user sees them.
fn folder_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_names_expected_file() {
        let err = CompareError::MissingReferenceImage {
            name: "image_original.png".to_string(),
            folder: PathBuf::from("/work/images"),
        };
        assert_eq!(
            err.to_string(),
            "There is no reference image. Please add 'image_original.png' to the 'images' folder."
        );
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn test_no_candidates_is_a_warning() {
        let err = CompareError::NoCandidateImages {
            folder: PathBuf::from("images"),
        };
        assert_eq!(err.severity(), Severity::Warning);
        assert_eq!(err.to_string(), "No skip layer images found in the 'images' folder.");
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = CompareError::DimensionMismatch {
            left: (10, 10),
            right: (10, 20),
        };
        assert_eq!(
            err.to_string(),
            "Image sizes do not match (10x10 vs 10x20). Cannot compute difference."
        );
    }
}
