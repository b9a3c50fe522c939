use std::sync::atomic::Ordering;

use crate::capture::domain::frame_source::FrameSource;
use crate::pipeline::capture_executor::{CaptureConfig, CaptureExecutor};
use crate::pipeline::capture_session::{CaptureSession, SessionReport};

/// Polls the source and classifies each frame inline, one at a time.
///
/// Never drops frames: a slow classifier simply slows the loop down.
#[derive(Default)]
pub struct SequentialCaptureExecutor;

impl SequentialCaptureExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CaptureExecutor for SequentialCaptureExecutor {
    fn execute(
        &self,
        mut source: Box<dyn FrameSource>,
        mut session: CaptureSession,
        mut config: CaptureConfig,
    ) -> Result<SessionReport, Box<dyn std::error::Error>> {
        let mut frames_seen = 0;
        let result = run_loop(&mut *source, &mut session, &mut config, &mut frames_seen);
        source.close();
        result?;
        Ok(session.finish(frames_seen, 0))
    }
}

fn run_loop(
    source: &mut dyn FrameSource,
    session: &mut CaptureSession,
    config: &mut CaptureConfig,
    frames_seen: &mut usize,
) -> Result<(), Box<dyn std::error::Error>> {
    for frame_result in source.frames() {
        if config.cancelled.load(Ordering::Relaxed) {
            session.info("Capture cancelled");
            break;
        }
        let frame = frame_result.map_err(|e| -> Box<dyn std::error::Error> { e })?;
        *frames_seen += 1;

        let event = session.process(&frame)?;
        if let Some(callback) = config.on_event.as_mut() {
            if !callback(&event) {
                session.info("Capture stopped by caller");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::domain::frame_source::tests::StubSource;
    use crate::pipeline::capture_session::tests::{frame_with_skin, session, NOTHING, PAPER};
    use crate::pipeline::capture_session::CaptureEvent;
    use crate::shared::pixel_buffer::PixelBuffer;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, Mutex};

    fn config() -> CaptureConfig {
        CaptureConfig {
            on_event: None,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    fn frames(skins: &[usize]) -> Vec<PixelBuffer> {
        skins
            .iter()
            .enumerate()
            .map(|(i, s)| frame_with_skin(*s, i))
            .collect()
    }

    #[test]
    fn test_plays_round_per_recognised_frame() {
        let source = StubSource::new(frames(&[PAPER, NOTHING, PAPER]));
        let closed = source.closed.clone();

        let report = SequentialCaptureExecutor::new()
            .execute(Box::new(source), session(0), config())
            .unwrap();

        assert_eq!(report.rounds.len(), 2);
        assert_eq!(report.frames_seen, 3);
        assert_eq!(report.frames_classified, 3);
        assert_eq!(report.frames_dropped, 0);
        assert!(*closed.lock().unwrap());
    }

    #[test]
    fn test_callback_sees_every_event_and_can_stop() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut cfg = config();
        cfg.on_event = Some(Box::new(move |event: &CaptureEvent| {
            sink.lock().unwrap().push(event.frame_index());
            !matches!(event, CaptureEvent::Round { .. })
        }));

        let report = SequentialCaptureExecutor::new()
            .execute(
                Box::new(StubSource::new(frames(&[NOTHING, PAPER, PAPER]))),
                session(0),
                cfg,
            )
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![0, 1]);
        assert_eq!(report.rounds.len(), 1);
    }

    #[test]
    fn test_cancelled_before_start_classifies_nothing() {
        let cfg = config();
        cfg.cancelled.store(true, Ordering::Relaxed);

        let report = SequentialCaptureExecutor::new()
            .execute(Box::new(StubSource::new(frames(&[PAPER, PAPER]))), session(0), cfg)
            .unwrap();

        assert_eq!(report.frames_classified, 0);
        assert!(report.rounds.is_empty());
    }

    #[test]
    fn test_source_error_aborts_and_closes() {
        let mut source = StubSource::new(frames(&[PAPER, PAPER, PAPER]));
        source.fail_at = Some(1);
        let closed = source.closed.clone();

        let result = SequentialCaptureExecutor::new().execute(Box::new(source), session(0), config());

        assert!(result.is_err());
        assert!(*closed.lock().unwrap());
    }
}
