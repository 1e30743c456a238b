//! Evaluation module for Isolation positions
//!
//! Frontier positions are scored from mobility alone:
//! - Liberty count of the evaluating player
//! - Liberty count of the opponent
//! - Elapsed plies, used to shift weight between the two over the game

pub mod features;
pub mod heuristic;

pub use features::MobilityFeatures;
pub use heuristic::{Evaluate, Heuristic, MobilityEvaluator};
