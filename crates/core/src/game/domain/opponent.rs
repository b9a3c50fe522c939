use crate::game::domain::choice::Choice;

/// Source of the computer's move for each round.
///
/// `&mut self` because implementations usually advance a random generator.
pub trait Opponent: Send {
    fn choose(&mut self) -> Choice;
}
