pub mod capture_executor;
pub mod capture_session;
pub mod gesture_game_use_case;
pub mod infrastructure;
pub mod play_round_use_case;
pub mod session_logger;
