//! Spaced-repetition scheduling core for a study-aid application.
//!
//! Pure functions over caller-owned review records: grade a review with SM-2,
//! pick the cards that are due, order them for study, and suggest a quiz
//! difficulty. Nothing here reads the clock or touches storage; `now` is
//! always passed in.

pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod scheduler;
pub mod stats;

pub use config::{Config, SchedulerConfig};
pub use error::SchedulerError;
pub use models::{Deck, Difficulty, Flashcard, LearningSession, Quality, ReviewState, Schedulable};
pub use scheduler::{
    ReviewOutcome, Scheduler, compute_next_review, prioritize, recommend_difficulty,
    select_due_cards,
};
