pub mod choice;
pub mod game_state;
pub mod opponent;
pub mod outcome;
pub mod round;
