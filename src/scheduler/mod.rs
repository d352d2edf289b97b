pub mod difficulty;
pub mod selection;
pub mod sm2;

pub use difficulty::recommend_difficulty;
pub use selection::{compare_priority, prioritize, select_due_cards};
pub use sm2::{ReviewOutcome, Scheduler, compute_next_review};
