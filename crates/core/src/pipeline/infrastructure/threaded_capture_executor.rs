use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::capture::domain::frame_source::{FrameResult, FrameSource};
use crate::pipeline::capture_executor::{CaptureConfig, CaptureExecutor};
use crate::pipeline::capture_session::{CaptureSession, SessionReport};
use crate::shared::constants::DEFAULT_QUEUE_CAPACITY;


/// Runs frame capture on a dedicated thread and classifies on the caller's.
///
/// Layout: `source → [bounded queue] → classify/play`
///
/// With `drop_late_frames`, a full queue discards the newest frame instead
/// of stalling capture, so a slow classifier sees a thinned stream rather
/// than a growing backlog.
pub struct ThreadedCaptureExecutor {
    channel_capacity: usize,
    drop_late_frames: bool,
}

impl ThreadedCaptureExecutor {
    pub fn new() -> Self {
        Self {
            channel_capacity: DEFAULT_QUEUE_CAPACITY,
            drop_late_frames: false,
        }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    pub fn dropping_late_frames(mut self) -> Self {
        self.drop_late_frames = true;
        self
    }
}

impl Default for ThreadedCaptureExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureExecutor for ThreadedCaptureExecutor {
    fn execute(
        &self,
        source: Box<dyn FrameSource>,
        mut session: CaptureSession,
        mut config: CaptureConfig,
    ) -> Result<SessionReport, Box<dyn std::error::Error>> {
        let (frame_tx, frame_rx) = crossbeam_channel::bounded::<FrameResult>(self.channel_capacity);

        let capture_handle = spawn_capture(
            source,
            frame_tx,
            config.cancelled.clone(),
            self.drop_late_frames,
        );

        let mut frames_received = 0;
        // Returning drops the receiver, which unblocks and ends the capture thread.
        let main_result = run_main_loop(frame_rx, &mut session, &mut config, &mut frames_received);

        let frames_dropped = match capture_handle.join() {
            Ok(dropped) => dropped,
            Err(_) => {
                main_result?;
                return Err("Capture thread panicked".into());
            }
        };
        main_result?;

        let frames_seen = frames_received + frames_dropped;
        if frames_dropped > 0 {
            log::warn!(
                "Dropped {frames_dropped} of {frames_seen} frames while the classifier was busy"
            );
        }
        Ok(session.finish(frames_seen, frames_dropped))
    }
}

fn spawn_capture(
    mut source: Box<dyn FrameSource>,
    frame_tx: Sender<FrameResult>,
    cancelled: Arc<AtomicBool>,
    drop_late_frames: bool,
) -> JoinHandle<usize> {
    std::thread::spawn(move || {
        let mut dropped = 0;
        for frame_result in source.frames() {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }
            if drop_late_frames && frame_result.is_ok() {
                match frame_tx.try_send(frame_result) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => dropped += 1,
                    Err(TrySendError::Disconnected(_)) => break,
                }
            } else if frame_tx.send(frame_result).is_err() {
                break;
            }
        }
        source.close();
        dropped
    })
}

fn run_main_loop(
    frame_rx: Receiver<FrameResult>,
    session: &mut CaptureSession,
    config: &mut CaptureConfig,
    frames_received: &mut usize,
) -> Result<(), Box<dyn std::error::Error>> {
    for frame_result in frame_rx {
        if config.cancelled.load(Ordering::Relaxed) {
            session.info("Capture cancelled");
            break;
        }
        let frame = frame_result.map_err(|e| -> Box<dyn std::error::Error> { e })?;
        *frames_received += 1;

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
