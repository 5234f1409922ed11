//! One open images folder and the comparisons made against it.
//!
//! The viewer's flow is an explicit function chain: `Session::open` checks
//! the reference image and lists candidates, `Session::compare` turns one
//! selected filename into a fully computed [`Comparison`]. Nothing is cached
//! between selections; every comparison re-reads both files.

use std::sync::Arc;

use image::RgbImage;
use tokio::task;

use super::library::Library;
use crate::config::ViewerConfig;
use crate::error::CompareError;
use crate::imaging::{difference, loader, DiffStats};

/// Folder validated and listed, ready to compare
#[derive(Debug)]
pub struct Session {
    config: ViewerConfig,
    library: Library,
}

impl Session {
    /// Check the reference image, then list the candidates.
    ///
    /// The reference is checked first, so a missing folder reports
    /// `MissingReferenceImage`, the same way the user would see it.
    pub fn open(config: ViewerConfig) -> Result<Self, CompareError> {
        let reference_path = config.reference_path();
        let reference = loader::load_required(&reference_path, || {
            CompareError::MissingReferenceImage {
                name: config.reference_name.clone(),
                folder: config.folder.clone(),
            }
        })?;
        log::info!(
            "🎨 Reference {} is {}x{}",
            config.reference_name,
            reference.width(),
            reference.height()
        );

        let library = Library::open(&config.folder, &config.reference_name)?;

        Ok(Session { config, library })
    }

    /// Candidate filenames in natural order
    pub fn candidates(&self) -> Vec<String> {
        self.library.filenames()
    }

    /// What a fresh pick list shows before the user touches it
    pub fn default_selection(&self) -> Option<String> {
        self.library.candidates().first().map(|c| c.filename.clone())
    }

    /// Load the reference and `filename`, diff them and summarise the diff.
    pub fn compare(&self, filename: &str) -> Result<Comparison, CompareError> {
        let reference_path = self.config.reference_path();
        let reference = loader::load_required(&reference_path, || {
            CompareError::MissingReferenceImage {
                name: self.config.reference_name.clone(),
                folder: self.config.folder.clone(),
            }
        })?;

        let candidate_path = self
            .library
            .find(filename)
            .map(|c| c.path.clone())
            .unwrap_or_else(|| self.config.folder.join(filename));
        let candidate = loader::load_required(&candidate_path, || {
            CompareError::MissingCandidate {
                path: candidate_path.clone(),
            }
        })?;

        // A failed diff still leaves both images to show side by side
        let outcome = difference(&reference, &candidate).map(|image| {
            let stats = DiffStats::compute(&image);
            log::info!(
                "📊 {}: mean {} max {}",
                filename,
                stats.mean_label(),
                stats.max
            );
            Difference { image, stats }
        });

        Ok(Comparison {
            filename: filename.to_string(),
            reference,
            candidate,
            difference: outcome,
        })
    }
}

/// Run [`Session::compare`] on tokio's blocking pool
///
/// Decoding and diffing are CPU-bound, so the UI thread only awaits the result.
pub async fn compare_in_background(
    session: Arc<Session>,
    filename: String,
) -> Result<Comparison, CompareError> {
    task::spawn_blocking(move || session.compare(&filename)).await?
}

/// Everything the shell needs to draw one selection
///
/// The two inputs are always present; only the difference step can fail.
#[derive(Debug)]
pub struct Comparison {
    /// Selected candidate's filename
    pub filename: String,
    pub reference: RgbImage,
    pub candidate: RgbImage,
    pub difference: Result<Difference, CompareError>,
}

/// Difference image and its summary
#[derive(Debug, Clone)]
pub struct Difference {
    pub image: RgbImage,
    pub stats: DiffStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::path::Path;

    const REFERENCE: &str = "image_original.png";

    fn write(dir: &Path, name: &str, img: &RgbImage) {
        img.save(dir.join(name)).unwrap();
    }

    fn config(dir: &Path) -> ViewerConfig {
        ViewerConfig::new(dir, REFERENCE)
    }

    #[test]
    fn test_open_lists_candidates_without_reference() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbImage::new(4, 4);
        for name in [REFERENCE, "skip_10.png", "skip_2.png", "skip_1.png"] {
            write(dir.path(), name, &img);
        }

        let session = Session::open(config(dir.path())).unwrap();
        assert_eq!(session.candidates(), ["skip_1.png", "skip_2.png", "skip_10.png"]);
        assert_eq!(session.default_selection().as_deref(), Some("skip_1.png"));
    }

    #[test]
    fn test_missing_reference_is_checked_first() {
        let dir = tempfile::tempdir().unwrap();
        let err = Session::open(config(&dir.path().join("images"))).unwrap_err();
        assert!(matches!(err, CompareError::MissingReferenceImage { .. }));

        write(dir.path(), "skip_1.png", &RgbImage::new(2, 2));
        let err = Session::open(config(dir.path())).unwrap_err();
        assert!(matches!(err, CompareError::MissingReferenceImage { .. }));
    }

    #[test]
    fn test_broken_reference_is_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(REFERENCE), b"garbage").unwrap();

        let err = Session::open(config(dir.path())).unwrap_err();
        assert!(matches!(err, CompareError::DecodeFailure { .. }));
    }

    #[test]
    fn test_reference_alone_yields_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), REFERENCE, &RgbImage::new(2, 2));

        let err = Session::open(config(dir.path())).unwrap_err();
        assert!(matches!(err, CompareError::NoCandidateImages { .. }));
    }

    #[test]
    fn test_compare_computes_difference_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), REFERENCE, &RgbImage::from_pixel(2, 1, Rgb([0, 0, 0])));
        let mut skip = RgbImage::new(2, 1);
        skip.put_pixel(1, 0, Rgb([255, 255, 255]));
        write(dir.path(), "skip_1.png", &skip);

        let session = Session::open(config(dir.path())).unwrap();
        let comparison = session.compare("skip_1.png").unwrap();
        let diff = comparison.difference.as_ref().unwrap();

        assert_eq!(comparison.filename, "skip_1.png");
        assert_eq!(diff.image.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(diff.stats.mean_label(), "127.50");
        assert_eq!(diff.stats.max, 255);
        assert_eq!(diff.stats.histogram.total(), 6);
    }

    #[test]
    fn test_size_mismatch_keeps_both_images() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), REFERENCE, &RgbImage::new(10, 10));
        write(dir.path(), "skip_1.png", &RgbImage::new(10, 20));

        let session = Session::open(config(dir.path())).unwrap();
        let comparison = session.compare("skip_1.png").unwrap();

        assert_eq!(comparison.reference.dimensions(), (10, 10));
        assert_eq!(comparison.candidate.dimensions(), (10, 20));
        match comparison.difference {
            Err(CompareError::DimensionMismatch { left, right }) => {
                assert_eq!(left, (10, 10));
                assert_eq!(right, (10, 20));
            }
            other => panic!("expected DimensionMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_candidate_removed_after_scan() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), REFERENCE, &RgbImage::new(2, 2));
        write(dir.path(), "skip_1.png", &RgbImage::new(2, 2));

        let session = Session::open(config(dir.path())).unwrap();
        std::fs::remove_file(dir.path().join("skip_1.png")).unwrap();

        let err = session.compare("skip_1.png").unwrap_err();
        assert!(matches!(err, CompareError::MissingCandidate { .. }));
    }

    #[tokio::test]
    async fn test_compare_in_background() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), REFERENCE, &RgbImage::from_pixel(3, 3, Rgb([10, 10, 10])));
        write(dir.path(), "skip_4.png", &RgbImage::from_pixel(3, 3, Rgb([14, 10, 7])));

        let session = Arc::new(Session::open(config(dir.path())).unwrap());
        let comparison = compare_in_background(session, "skip_4.png".to_string())
            .await
            .unwrap();

        let diff = comparison.difference.unwrap();
        assert_eq!(diff.stats.max, 4);
        assert_eq!(diff.image.get_pixel(0, 0), &Rgb([4, 0, 3]));
    }
}
