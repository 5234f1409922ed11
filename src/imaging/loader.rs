/// Image loader
///
/// Turns a path into 8-bit RGB pixels. A missing file is an ordinary
/// `Ok(None)` so callers can explain what to add instead of failing;
/// a file that exists but won't decode is a `DecodeFailure`.

use std::path::Path;

use image::{ImageReader, RgbImage};

use crate::error::CompareError;

/// Load an image if the file exists
///
/// # Returns
/// * `Ok(Some(image))` - decoded and converted to RGB8 (alpha dropped)
/// * `Ok(None)` - nothing at `path`
/// * `Err(CompareError::DecodeFailure)` - present but unreadable
pub fn load_image(path: &Path) -> Result<Option<RgbImage>, CompareError> {
    if !path.is_file() {
        log::debug!("No image at {}", path.display());
        return Ok(None);
    }

    let decode_failure = |source: image::ImageError| CompareError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    };

    // Guess from content first so a mislabelled .jpg that is really a PNG still opens
    let reader = ImageReader::open(path)
        .map_err(|e| decode_failure(image::ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_failure(image::ImageError::IoError(e)))?;

    let decoded = reader.decode().map_err(decode_failure)?;
    let rgb = decoded.into_rgb8();

    log::debug!("📷 Loaded {} ({}x{})", path.display(), rgb.width(), rgb.height());

    Ok(Some(rgb))
}

/// Load an image that has to be there, using `on_absent` to build the error
pub fn load_required<F>(path: &Path, on_absent: F) -> Result<RgbImage, CompareError>
where
    F: FnOnce() -> CompareError,
{
    load_image(path)?.ok_or_else(on_absent)
}
