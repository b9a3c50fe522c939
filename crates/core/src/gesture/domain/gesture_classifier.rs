use serde::Serialize;

use crate::gesture::domain::gesture_label::GestureLabel;
use crate::shared::frame_error::FrameError;
use crate::shared::pixel_buffer::PixelBuffer;

/// Measurement behind a single label.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub label: GestureLabel,
    pub skin_pixels: u64,
    pub skin_ratio: f64,
}

/// Domain interface for per-frame gesture classification.
///
/// Implementations hold no per-frame state, hence `&self`; the capture loop
/// may call them at any cadence.
pub trait GestureClassifier: Send {
    fn classify(&self, frame: &PixelBuffer) -> Result<Classification, FrameError>;
}
