use serde::Serialize;

use crate::game::domain::choice::Choice;
use crate::game::domain::outcome::Outcome;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Round {
    pub player: Choice,
    pub opponent: Choice,
    pub outcome: Outcome,
}
