pub mod deck;
pub mod difficulty;
pub mod flashcard;
pub mod learning_card;
pub mod learning_session;
pub mod quality;
pub mod review_state;

pub use deck::Deck;
pub use difficulty::Difficulty;
pub use flashcard::Flashcard;
pub use learning_card::LearningCard;
pub use learning_session::LearningSession;
pub use quality::Quality;
pub use review_state::{ReviewState, Schedulable};
