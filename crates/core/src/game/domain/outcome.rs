use serde::{Deserialize, Serialize};

use crate::game::domain::choice::Choice;

/// Who took the round, from the player's side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Tie,
    Player,
    Opponent,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Tie => "It's a tie!",
            Outcome::Player => "You win this round!",
            Outcome::Opponent => "Computer wins this round!",
        }
    }
}

/// Rock beats scissors, scissors beats paper, paper beats rock.
pub fn decide_winner(player: Choice, opponent: Choice) -> Outcome {
    if player == opponent {
        Outcome::Tie
    } else if player.beats() == opponent {
        Outcome::Player
    } else {
        Outcome::Opponent
    }
}
