use serde::{Deserialize, Serialize};

use crate::game::domain::outcome::Outcome;

/// Running score. Owned by the caller and threaded through every round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub player_score: u32,
    pub opponent_score: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits the round's winner. Ties leave the score unchanged.
    pub fn record(self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Tie => self,
            Outcome::Player => Self {
                player_score: self.player_score.saturating_add(1),
                ..self
            },
            Outcome::Opponent => Self {
                opponent_score: self.opponent_score.saturating_add(1),
                ..self
            },
        }
    }

    pub fn reset(self) -> Self {
        Self::default()
    }
}
