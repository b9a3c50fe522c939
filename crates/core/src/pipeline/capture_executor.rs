use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::capture::domain::frame_source::FrameSource;
use crate::pipeline::capture_session::{CaptureEvent, CaptureSession, SessionReport};

/// Called after every classified frame. Returning `false` stops the loop.
pub type EventFn = Box<dyn FnMut(&CaptureEvent) -> bool + Send>;

/// Configuration for one capture run.
pub struct CaptureConfig {
    pub on_event: Option<EventFn>,
    pub cancelled: Arc<AtomicBool>,
}

/// Abstracts how the capture → classify → play loop is driven.
///
/// Infrastructure provides concrete implementations (inline polling, a
/// dedicated capture thread). Either way the source is closed before
/// `execute` returns.
pub trait CaptureExecutor: Send {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        session: CaptureSession,
        config: CaptureConfig,
    ) -> Result<SessionReport, Box<dyn std::error::Error>>;
}
