/// Summary numbers for a difference image
///
/// Every channel of every pixel counts as one sample; channels are
/// flattened rather than reported separately.
use image::RgbImage;

/// Number of histogram bins over [0, 255]
pub const HISTOGRAM_BINS: usize = 50;

/// Upper end of the histogram range
const CHANNEL_MAX: f64 = 255.0;

/// Mean, max and histogram of one difference image
#[derive(Debug, Clone, PartialEq)]
pub struct DiffStats {
    pub mean: f64,
    pub max: u8,
    pub histogram: Histogram,
}

impl DiffStats {
    pub fn compute(diff: &RgbImage) -> Self {
        Self {
            mean: mean_difference(diff),
            max: max_difference(diff),
            histogram: Histogram::from_image(diff),
        }
    }

    /// Mean with two decimals, the way it is shown to the user
    pub fn mean_label(&self) -> String {
        format_mean(self.mean)
    }
}

/// Arithmetic mean over all channel values (0.0 for an empty image)
pub fn mean_difference(diff: &RgbImage) -> f64 {
    let raw = diff.as_raw();
    if raw.is_empty() {
        return 0.0;
    }
    let total: u64 = raw.iter().map(|&v| u64::from(v)).sum();
    total as f64 / raw.len() as f64
}

/// Largest single channel value (0 for an empty image)
pub fn max_difference(diff: &RgbImage) -> u8 {
    diff.as_raw().iter().copied().max().unwrap_or(0)
}

pub fn format_mean(mean: f64) -> String {
    format!("{:.2}", mean)
}

/// Equal-width histogram of channel values over the closed range [0, 255]
///
/// Bin `i` holds values with `edges[i] <= v < edges[i + 1]`; the last bin
/// also takes 255 itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `HISTOGRAM_BINS + 1` edges: 0, 5.1, 10.2, ..., 255
    pub edges: Vec<f64>,
    /// Sample count per bin
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn from_image(diff: &RgbImage) -> Self {
        Self::from_values(diff.as_raw())
    }

    pub fn from_values(values: &[u8]) -> Self {
        let edges = bin_edges(HISTOGRAM_BINS);

        // Count each of the 256 possible values once, then fold into bins
        let mut per_value = [0u64; 256];
        for &v in values {
            per_value[v as usize] += 1;
        }

        let mut counts = vec![0u64; HISTOGRAM_BINS];
        for (value, &count) in per_value.iter().enumerate() {
            if count > 0 {
                counts[bin_index(value as u8, &edges)] += count;
            }
        }

        Self { edges, counts }
    }

    /// Sum of all bins, equal to the number of samples
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Tallest bin, used to normalise bar heights
    pub fn peak(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// `bins + 1` evenly spaced edges from 0 to 255 inclusive
fn bin_edges(bins: usize) -> Vec<f64> {
    (0..=bins)
        .map(|i| CHANNEL_MAX * i as f64 / bins as f64)
        .collect()
}

fn bin_index(value: u8, edges: &[f64]) -> usize {
    let bins = edges.len() - 1;
    let v = f64::from(value);

    // First estimate from the bin width, then nudge past any float rounding at the edges
    let mut idx = ((v * bins as f64 / CHANNEL_MAX) as usize).min(bins - 1);
    while idx > 0 && v < edges[idx] {
        idx -= 1;
    }
    while idx < bins - 1 && v >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
