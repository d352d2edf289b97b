//! Quiz difficulty recommendation from historical accuracy.
use crate::models::Difficulty;

pub const EASY_THRESHOLD: f64 = 90.0;
pub const MEDIUM_THRESHOLD: f64 = 70.0;

/// Suggests a default quiz difficulty from historical accuracy (0-100).
/// Anything that is not at least 70, NaN included, is `Hard`.
pub fn recommend_difficulty(accuracy_percent: f64) -> Difficulty {
    if accuracy_percent >= EASY_THRESHOLD {
        Difficulty::Easy
    } else if accuracy_percent >= MEDIUM_THRESHOLD {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}
