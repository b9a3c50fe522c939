use ndarray::{s, ArrayView3};

use crate::gesture::domain::gesture_classifier::{Classification, GestureClassifier};
use crate::gesture::domain::gesture_label::GestureLabel;
use crate::gesture::domain::sampling_window::SamplingWindow;
use crate::gesture::domain::skin_tone::is_skin_tone;
use crate::shared::constants::SAMPLE_RADIUS;
use crate::shared::frame_error::FrameError;
use crate::shared::pixel_buffer::{rgba_view, PixelBuffer};

/// Classifies a raw RGBA frame by the share of skin-toned pixels around its center.
///
/// Fails with [`FrameError::InvalidDimensions`] when `data.len()` is not
/// `width * height * 4`.
pub fn classify(data: &[u8], width: u32, height: u32) -> Result<GestureLabel, FrameError> {
    measure(data, width, height).map(|c| c.label)
}

/// Like [`classify`], but also reports the skin pixel count and ratio.
pub fn measure(data: &[u8], width: u32, height: u32) -> Result<Classification, FrameError> {
    let view = rgba_view(data, width, height)?;
    Ok(measure_view(view))
}

fn measure_view(view: ArrayView3<'_, u8>) -> Classification {
    let (height, width) = (view.shape()[0] as u32, view.shape()[1] as u32);
    let window = SamplingWindow::centered(width, height, SAMPLE_RADIUS);
    let (cols, rows) = window.clipped(width, height);

    let sampled = view.slice(s![rows, cols, ..]);
    let skin_pixels = sampled
        .rows()
        .into_iter()
        .filter(|px| is_skin_tone(px[0], px[1], px[2]))
        .count() as u64;

    // Normalised by the nominal window area even when clipping skipped pixels.
    let skin_ratio = skin_pixels as f64 / window.nominal_area() as f64;

    Classification {
        label: GestureLabel::from_skin_ratio(skin_ratio),
        skin_pixels,
        skin_ratio,
    }
}

/// [`GestureClassifier`] backed by the skin-ratio heuristic.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkinRatioClassifier;

impl SkinRatioClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl GestureClassifier for SkinRatioClassifier {
    fn classify(&self, frame: &PixelBuffer) -> Result<Classification, FrameError> {
        Ok(measure_view(frame.as_ndarray()))
    }
}
