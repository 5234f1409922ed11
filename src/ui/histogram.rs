/// Histogram of difference magnitudes
/// Draws one bar per bin, scaled to the tallest bin
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Rectangle, Size};

use skip_compare::imaging::Histogram;

use crate::Message;

/// Histogram data structure
#[derive(Debug, Clone)]
pub struct HistogramChart {
    /// Sample count per bin, lowest difference first
    pub counts: Vec<u64>,
    /// Tallest bin, the full chart height
    pub peak: u64,
}

impl HistogramChart {
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            counts: histogram.counts.clone(),
            peak: histogram.peak(),
        }
    }

    /// Bar heights in pixels for a chart `height` pixels tall
    pub fn bar_heights(&self, height: f32) -> Vec<f32> {
        if self.peak == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&count| count as f32 / self.peak as f32 * height)
            .collect()
    }
}

impl canvas::Program<Message> for HistogramChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        if self.counts.is_empty() {
            return vec![frame.into_geometry()];
        }

        let width = bounds.width;
        let height = bounds.height;
        let bar_width = width / self.counts.len() as f32;
        let bar_color = Color::from_rgb(0.33, 0.58, 0.94);

        for (i, bar_height) in self.bar_heights(height).into_iter().enumerate() {
            if bar_height <= 0.0 {
                continue;
            }
            let x = i as f32 * bar_width;
            // Leave a one pixel gap between bars once they are wide enough
            let w = if bar_width > 3.0 { bar_width - 1.0 } else { bar_width };
            frame.fill_rectangle(
                Point::new(x, height - bar_height),
                Size::new(w, bar_height),
                bar_color,
            );
        }

        let baseline = Path::line(Point::new(0.0, height), Point::new(width, height));
        frame.stroke(
            &baseline,
            Stroke::default()
                .with_color(Color::from_rgba(1.0, 1.0, 1.0, 0.4))
                .with_width(1.0),
        );

        vec![frame.into_geometry()]
    }
}
