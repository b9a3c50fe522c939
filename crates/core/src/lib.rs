//! Rock-paper-scissors driven by a skin-ratio hand gesture heuristic.
//!
//! The classifier ([`gesture::infrastructure::skin_ratio_classifier::classify`])
//! is a pure function of one RGBA frame. Everything that spans frames, such
//! as scores, cooldowns and capture threads, lives in [`pipeline`].

pub mod capture;
pub mod game;
pub mod gesture;
pub mod pipeline;
pub mod shared;
