use std::time::Instant;

use serde::Serialize;

use crate::game::domain::game_state::GameState;
use crate::game::domain::round::Round;
use crate::gesture::domain::gesture_classifier::{Classification, GestureClassifier};
use crate::pipeline::play_round_use_case::PlayRoundUseCase;
use crate::pipeline::session_logger::SessionLogger;
use crate::shared::frame_error::FrameError;
use crate::shared::pixel_buffer::PixelBuffer;

/// What happened on one classified frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CaptureEvent {
    /// No gesture recognised; no round is played.
    NoGesture {
        frame_index: usize,
        classification: Classification,
    },
    /// A gesture was recognised while the post-round cooldown was running.
    Cooldown {
        frame_index: usize,
        classification: Classification,
    },
    Round {
        frame_index: usize,
        classification: Classification,
        round: Round,
        state: GameState,
    },
}

impl CaptureEvent {
    pub fn frame_index(&self) -> usize {
        match self {
            CaptureEvent::NoGesture { frame_index, .. }
            | CaptureEvent::Cooldown { frame_index, .. }
            | CaptureEvent::Round { frame_index, .. } => *frame_index,
        }
    }
}

/// Result of a finished capture run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionReport {
    pub state: GameState,
    pub rounds: Vec<Round>,
    /// Frames taken from the source: classified plus dropped. Frames still
    /// queued when the loop stops early are not counted.
    pub frames_seen: usize,
    pub frames_classified: usize,
    pub frames_dropped: usize,
}

/// Mutable bookkeeping of one capture run: classifies frames, plays rounds
/// for recognised gestures and tracks the score.
///
/// The classifier itself stays stateless; everything that spans frames
/// lives here.
pub struct CaptureSession {
    classifier: Box<dyn GestureClassifier>,
    rounds: PlayRoundUseCase,
    logger: Box<dyn SessionLogger>,
    state: GameState,
    cooldown_frames: usize,
    cooldown_remaining: usize,
    played: Vec<Round>,
    frames_classified: usize,
    total_frames: usize,
}

impl CaptureSession {
    pub fn new(
        classifier: Box<dyn GestureClassifier>,
        rounds: PlayRoundUseCase,
        logger: Box<dyn SessionLogger>,
        state: GameState,
        cooldown_frames: usize,
        total_frames: usize,
    ) -> Self {
        Self {
            classifier,
            rounds,
            logger,
            state,
            cooldown_frames,
            cooldown_remaining: 0,
            played: Vec::new(),
            frames_classified: 0,
            total_frames,
        }
    }

    pub fn process(&mut self, frame: &PixelBuffer) -> Result<CaptureEvent, FrameError> {
        let start = Instant::now();
        let classification = self.classifier.classify(frame)?;
        self.logger
            .timing("classify", start.elapsed().as_secs_f64() * 1000.0);

        self.frames_classified += 1;
        self.logger.gesture(classification.label);
        self.logger.frame(self.frames_classified, self.total_frames);

        let cooling = self.cooldown_remaining > 0;
        if cooling {
            self.cooldown_remaining -= 1;
        }

        let frame_index = frame.index();
        let Some(choice) = classification.label.to_choice() else {
            return Ok(CaptureEvent::NoGesture {
                frame_index,
                classification,
            });
        };

        if cooling {
            return Ok(CaptureEvent::Cooldown {
                frame_index,
                classification,
            });
        }

        let (state, round) = self.rounds.execute(self.state, choice);
        self.state = state;
        self.played.push(round);
        self.cooldown_remaining = self.cooldown_frames;

        Ok(CaptureEvent::Round {
            frame_index,
            classification,
            round,
            state,
        })
    }

    pub fn info(&mut self, message: &str) {
        self.logger.info(message);
    }

    pub fn finish(self, frames_seen: usize, frames_dropped: usize) -> SessionReport {
        self.logger.summary();
        SessionReport {
            state: self.state,
            rounds: self.played,
            frames_seen,
            frames_classified: self.frames_classified,
            frames_dropped,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::game::domain::choice::Choice;
    use crate::game::domain::opponent::Opponent;
    use crate::game::domain::outcome::Outcome;
    use crate::gesture::infrastructure::skin_ratio_classifier::SkinRatioClassifier;
    use crate::pipeline::session_logger::NullSessionLogger;

    pub(crate) struct AlwaysRock;

    impl Opponent for AlwaysRock {
        fn choose(&mut self) -> Choice {
            Choice::Rock
        }
    }

    /// 200x200 frame whose center window holds `skin` skin pixels.
    pub(crate) fn frame_with_skin(skin: usize, index: usize) -> PixelBuffer {
        let mut data = [0u8, 0, 0, 255].repeat(200 * 200);
        let mut remaining = skin;
        'outer: for y in 40..160 {
            for x in 40..160 {
                if remaining == 0 {
                    break 'outer;
                }
                let idx = (y * 200 + x) * 4;
                data[idx..idx + 4].copy_from_slice(&[180, 120, 90, 255]);
                remaining -= 1;
            }
        }
        PixelBuffer::new(data, 200, 200, index).unwrap()
    }

    pub(crate) const PAPER: usize = 10_000;
    pub(crate) const ROCK: usize = 5_000;
    pub(crate) const NOTHING: usize = 0;

    pub(crate) fn session(cooldown: usize) -> CaptureSession {
        CaptureSession::new(
            Box::new(SkinRatioClassifier::new()),
            PlayRoundUseCase::new(Box::new(AlwaysRock)),
            Box::new(NullSessionLogger),
            GameState::new(),
            cooldown,
            0,
        )
    }

    #[test]
    fn test_unknown_plays_no_round() {
        let mut s = session(0);
        let event = s.process(&frame_with_skin(NOTHING, 3)).unwrap();
        assert!(matches!(event, CaptureEvent::NoGesture { frame_index: 3, .. }));
        let report = s.finish(1, 0);
        assert!(report.rounds.is_empty());
        assert_eq!(report.state, GameState::new());
    }

    #[test]
    fn test_every_recognised_frame_plays_a_round() {
        let mut s = session(0);
        for i in 0..3 {
            s.process(&frame_with_skin(PAPER, i)).unwrap();
        }
        let report = s.finish(3, 0);
        assert_eq!(report.rounds.len(), 3);
        assert!(report.rounds.iter().all(|r| r.outcome == Outcome::Player));
        assert_eq!(report.state.player_score, 3);
        assert_eq!(report.frames_classified, 3);
    }

    #[test]
    fn test_cooldown_skips_following_gestures() {
        let mut s = session(2);
        let events: Vec<CaptureEvent> = [PAPER, ROCK, PAPER, ROCK, NOTHING, PAPER]
            .iter()
            .enumerate()
            .map(|(i, skin)| s.process(&frame_with_skin(*skin, i)).unwrap())
            .collect();

        assert!(matches!(events[0], CaptureEvent::Round { .. }));
        assert!(matches!(events[1], CaptureEvent::Cooldown { .. }));
        assert!(matches!(events[2], CaptureEvent::Cooldown { .. }));
        assert!(matches!(events[3], CaptureEvent::Round { .. }));
        assert!(matches!(events[4], CaptureEvent::NoGesture { .. }));
        assert!(matches!(events[5], CaptureEvent::Cooldown { .. }));
    }

    #[test]
    fn test_round_event_carries_updated_state() {
        let mut s = session(0);
        let event = s.process(&frame_with_skin(ROCK, 0)).unwrap();
        match event {
            CaptureEvent::Round { round, state, .. } => {
                assert_eq!(round.player, Choice::Rock);
                assert_eq!(round.outcome, Outcome::Tie);
                assert_eq!(state, GameState::new());
            }
            other => panic!("expected a round, got {other:?}"),
        }
    }

    #[test]
    fn test_event_frame_index() {
        let mut s = session(0);
        let event = s.process(&frame_with_skin(PAPER, 41)).unwrap();
        assert_eq!(event.frame_index(), 41);
    }
}
