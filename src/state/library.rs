use std::path::Path;
use walkdir::WalkDir;

use super::data::{Candidate, SortKey};
use crate::error::CompareError;

/// Suffixes that qualify a file as an image (matched case-sensitively)
pub const IMAGE_SUFFIXES: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// The Library is the ordered list of candidate images in one folder,
/// with the reference image already taken out.
pub struct Library {
    candidates: Vec<Candidate>,
}

impl Library {
    /// Scan `folder` and drop `reference_name` from the result.
    ///
    /// Fails with `MissingFolder` if the folder is gone and with
    /// `NoCandidateImages` if nothing but the reference qualifies.
    pub fn open(folder: &Path, reference_name: &str) -> Result<Self, CompareError> {
        let scanned = scan_folder(folder)?;
        let candidates = exclude_reference(scanned, reference_name);

        if candidates.is_empty() {
            log::warn!("⚠️  No candidates besides {} in {}", reference_name, folder.display());
            return Err(CompareError::NoCandidateImages {
                folder: folder.to_path_buf(),
            });
        }

        Ok(Library { candidates })
    }

    /// Get all candidates in natural order
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Get the filenames in natural order, for a pick list
    pub fn filenames(&self) -> Vec<String> {
        self.candidates.iter().map(|c| c.filename.clone()).collect()
    }

    /// Look up a candidate by filename
    pub fn find(&self, filename: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.filename == filename)
    }
}

/// Whether a filename ends in one of the image suffixes
pub fn is_image_name(name: &str) -> bool {
    has_image_suffix(name.as_bytes())
}

fn has_image_suffix(name: &[u8]) -> bool {
    IMAGE_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix.as_bytes()))
}

/// Natural-order key of a filename; see [`SortKey`]
pub fn sort_key(name: &str) -> SortKey {
    SortKey::from_filename(name)
}

/// List the image files directly inside `folder`, in natural order.
///
/// Only regular files count; subfolders are not descended into. An existing
/// but empty folder yields an empty list, a missing one `MissingFolder`.
/// Equal keys fall back to plain filename order.
pub fn scan_folder(folder: &Path) -> Result<Vec<Candidate>, CompareError> {
    if !folder.is_dir() {
        return Err(CompareError::MissingFolder {
            path: folder.to_path_buf(),
        });
    }

    log::info!("🔍 Scanning folder: {}", folder.display());

    let mut candidates = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        // Match on raw bytes so names that aren't valid UTF-8 still qualify
        let name = entry.file_name();
        if !has_image_suffix(name.as_encoded_bytes()) {
            continue;
        }

        // `path` keeps the exact name; `filename` is only for display and lookup
        candidates.push(Candidate::new(
            name.to_string_lossy().into_owned(),
            entry.path().to_path_buf(),
        ));
    }

    candidates.sort_by(|a, b| a.key.cmp(&b.key).then_with(|| a.filename.cmp(&b.filename)));

    log::info!("✅ Found {} image(s) in {}", candidates.len(), folder.display());

    Ok(candidates)
}

/// Drop the reference image from a scan result
pub fn exclude_reference(candidates: Vec<Candidate>, reference_name: &str) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| c.filename != reference_name)
        .collect()
}

// Implement Debug for better error messages
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("candidates", &self.candidates.len())
            .finish()
    }
}
