/// Widgets for one finished comparison
///
/// Image handles are built once when a comparison arrives; building them in
/// `view` would re-upload the textures on every redraw.
use iced::widget::image as picture;
use iced::widget::{canvas, column, row, text};
use iced::{Alignment, Color, Element, Length};
use image::RgbImage;

use skip_compare::error::{CompareError, Severity};
use skip_compare::imaging::DiffStats;
use skip_compare::state::Comparison;

use super::histogram::HistogramChart;
use crate::Message;

/// GPU-ready form of a [`Comparison`]
#[derive(Debug)]
pub struct ComparisonPanel {
    pub filename: String,
    pub reference: picture::Handle,
    pub candidate: picture::Handle,
    /// Difference image and chart, or why they could not be computed
    pub difference: Result<DifferencePanel, Notice>,
}

#[derive(Debug, Clone)]
pub struct DifferencePanel {
    pub image: picture::Handle,
    pub stats: DiffStats,
    pub chart: HistogramChart,
}

impl ComparisonPanel {
    pub fn new(comparison: &Comparison) -> Self {
        let difference = match &comparison.difference {
            Ok(diff) => Ok(DifferencePanel {
                image: to_handle(&diff.image),
                stats: diff.stats.clone(),
                chart: HistogramChart::new(&diff.stats.histogram),
            }),
            Err(err) => Err(Notice::from(err)),
        };

        Self {
            filename: comparison.filename.clone(),
            reference: to_handle(&comparison.reference),
            candidate: to_handle(&comparison.candidate),
            difference,
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let images = column![
            text("Original vs Skip Layer Image").size(22),
            row![
                captioned(&self.reference, "Original".to_string()),
                captioned(&self.candidate, format!("Skip: {}", self.filename)),
            ]
            .spacing(20),
            text("Image Difference").size(22),
        ]
        .spacing(12);

        let rest = match &self.difference {
            Ok(diff) => diff.view(),
            Err(failure) => failure.view(),
        };

        column![images, rest].spacing(12).into()
    }
}

impl DifferencePanel {
    fn view(&self) -> Element<'_, Message> {
        column![
            captioned(&self.image, "Difference".to_string()),
            text(format!("Mean difference: {}", self.stats.mean_label())),
            text(format!("Max difference: {}", self.stats.max)),
            text("Histogram of Differences").size(22),
            canvas(self.chart.clone())
                .width(Length::Fill)
                .height(Length::Fixed(180.0)),
            text("X-axis: Difference value (0-255)").size(14),
            text("Y-axis: Frequency").size(14),
        ]
        .spacing(12)
        .into()
    }
}

/// Image scaled to its column with a caption underneath
fn captioned(handle: &picture::Handle, caption: String) -> Element<'_, Message> {
    column![
        picture(handle.clone()).width(Length::Fill),
        text(caption).size(14),
    ]
    .spacing(4)
    .align_x(Alignment::Center)
    .width(Length::FillPortion(1))
    .into()
}

/// Error or warning text in place of the step that failed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
}

impl From<&CompareError> for Notice {
    fn from(error: &CompareError) -> Self {
        Self {
            message: error.to_string(),
            severity: error.severity(),
        }
    }
}

impl Notice {
    pub fn view(&self) -> Element<'_, Message> {
        text(self.message.as_str())
            .size(16)
            .color(severity_color(self.severity))
            .into()
    }
}

/// Show an error straight from the session
pub fn notice(error: &CompareError) -> Element<'static, Message> {
    text(error.to_string())
        .size(16)
        .color(severity_color(error.severity()))
        .into()
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Warning => Color::from_rgb(0.95, 0.76, 0.2),
        Severity::Error => Color::from_rgb(0.94, 0.33, 0.31),
    }
}

pub fn to_handle(img: &RgbImage) -> picture::Handle {
    let (width, height) = img.dimensions();
    picture::Handle::from_rgba(width, height, rgba_pixels(img))
}

/// Interleaved RGBA bytes with opaque alpha
fn rgba_pixels(img: &RgbImage) -> Vec<u8> {
    img.pixels()
        .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
        .collect()
}
