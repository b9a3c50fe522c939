use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::capture::domain::frame_source::FrameSource;
use crate::game::domain::game_state::GameState;
use crate::gesture::domain::gesture_classifier::GestureClassifier;
use crate::shared::source_metadata::SourceMetadata;

use super::capture_executor::{CaptureConfig, CaptureExecutor, EventFn};
use super::capture_session::{CaptureSession, SessionReport};
use super::play_round_use_case::PlayRoundUseCase;
use super::session_logger::SessionLogger;

/// Plays rock-paper-scissors from a stream of frames.
///
/// Wires the source, classifier and round logic together and hands the loop
/// to a [`CaptureExecutor`]. Single-use: `execute` consumes the owned
/// components, so a second call fails.
pub struct GestureGameUseCase {
    source: Option<Box<dyn FrameSource>>,
    classifier: Option<Box<dyn GestureClassifier>>,
    rounds: Option<PlayRoundUseCase>,
    logger: Option<Box<dyn SessionLogger>>,
    executor: Box<dyn CaptureExecutor>,
    cooldown_frames: usize,
    on_event: Option<EventFn>,
    cancelled: Arc<AtomicBool>,
}

impl GestureGameUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Box<dyn FrameSource>,
        classifier: Box<dyn GestureClassifier>,
        rounds: PlayRoundUseCase,
        logger: Box<dyn SessionLogger>,
        executor: Box<dyn CaptureExecutor>,
        cooldown_frames: Option<usize>,
        on_event: Option<EventFn>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            source: Some(source),
            classifier: Some(classifier),
            rounds: Some(rounds),
            logger: Some(logger),
            executor,
            cooldown_frames: cooldown_frames.unwrap_or(0),
            on_event,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    /// Runs the loop over an already opened source, starting from `state`.
    pub fn execute(
        &mut self,
        metadata: &SourceMetadata,
        state: GameState,
    ) -> Result<SessionReport, Box<dyn std::error::Error>> {
        let source = self.source.take().ok_or("Game already executed")?;
        let mut session = CaptureSession::new(
            self.classifier.take().ok_or("Game already executed")?,
            self.rounds.take().ok_or("Game already executed")?,
            self.logger.take().ok_or("Game already executed")?,
            state,
            self.cooldown_frames,
            metadata.total_frames,
        );
        session.info(&format!(
            "Watching {}x{} frames (cooldown {} frames)",
            metadata.width, metadata.height, self.cooldown_frames
        ));

        let config = CaptureConfig {
            on_event: self.on_event.take(),
            cancelled: self.cancelled.clone(),
        };
        self.executor.execute(source, session, config)
    }
}
