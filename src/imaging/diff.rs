/// Per-pixel absolute difference between two equally sized images.
use image::RgbImage;
use rayon::prelude::*;

use crate::error::CompareError;

/// Compute `|a - b|` for every channel of every pixel
///
/// Works directly on the interleaved RGB byte buffers; there is no
/// dependency between pixels, so the buffers are split across rayon's pool.
/// Images of different sizes are rejected with `DimensionMismatch`.
pub fn difference(a: &RgbImage, b: &RgbImage) -> Result<RgbImage, CompareError> {
    if a.dimensions() != b.dimensions() {
        log::warn!(
            "Refusing to diff {}x{} against {}x{}",
            a.width(),
            a.height(),
            b.width(),
            b.height()
        );
        return Err(CompareError::DimensionMismatch {
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }

    let (width, height) = a.dimensions();
    let mut out = RgbImage::new(width, height);

    let dst: &mut [u8] = &mut out;
    dst.par_iter_mut()
        .zip(a.as_raw().par_iter())
        .zip(b.as_raw().par_iter())
        .for_each(|((d, &x), &y)| *d = x.abs_diff(y));

    Ok(out)
}
