use crate::game::domain::choice::Choice;
use crate::game::domain::game_state::GameState;
use crate::game::domain::opponent::Opponent;
use crate::game::domain::outcome::decide_winner;
use crate::game::domain::round::Round;

/// One round: draw the opponent's move, decide, update the score.
///
/// The score is passed in and handed back so callers own it outright.
pub struct PlayRoundUseCase {
    opponent: Box<dyn Opponent>,
}

impl PlayRoundUseCase {
    pub fn new(opponent: Box<dyn Opponent>) -> Self {
        Self { opponent }
    }

    pub fn execute(&mut self, state: GameState, player: Choice) -> (GameState, Round) {
        let opponent = self.opponent.choose();
        let outcome = decide_winner(player, opponent);
        let round = Round {
            player,
            opponent,
            outcome,
        };
        log::debug!("Round: {player} vs {opponent} -> {outcome:?}");
        (state.record(outcome), round)
    }
}
