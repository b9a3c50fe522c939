use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::domain::choice::Choice;
use crate::shared::constants::{ROCK_MAX_RATIO, SCISSORS_MAX_RATIO, UNKNOWN_MAX_RATIO};

/// Gesture inferred from a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureLabel {
    Rock,
    Paper,
    Scissors,
    Unknown,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 4] = [
        GestureLabel::Rock,
        GestureLabel::Paper,
        GestureLabel::Scissors,
        GestureLabel::Unknown,
    ];

    /// Maps a skin ratio onto a label. Thresholds are inclusive upper bounds
    /// evaluated from the bottom up.
    pub fn from_skin_ratio(ratio: f64) -> Self {
        if ratio <= UNKNOWN_MAX_RATIO {
            GestureLabel::Unknown
        } else if ratio <= SCISSORS_MAX_RATIO {
            GestureLabel::Scissors
        } else if ratio <= ROCK_MAX_RATIO {
            GestureLabel::Rock
        } else {
            GestureLabel::Paper
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GestureLabel::Rock => "rock",
            GestureLabel::Paper => "paper",
            GestureLabel::Scissors => "scissors",
            GestureLabel::Unknown => "unknown",
        }
    }

    /// `None` for [`GestureLabel::Unknown`]: no round should be played.
    pub fn to_choice(self) -> Option<Choice> {
        match self {
            GestureLabel::Rock => Some(Choice::Rock),
            GestureLabel::Paper => Some(Choice::Paper),
            GestureLabel::Scissors => Some(Choice::Scissors),
            GestureLabel::Unknown => None,
        }
    }

    /// Status line shown to the player while the camera is watching.
    pub fn status_message(&self) -> String {
        match self {
            GestureLabel::Unknown => "Show your hand gesture...".to_string(),
            label => format!("Detected: {label}"),
        }
    }
}

impl fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
