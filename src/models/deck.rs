//! Deck is a named set of flashcards
use super::Flashcard;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Deck {
    pub name: String,
    pub flashcards: Vec<Flashcard>,
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            name: "My Deck".to_string(),
            flashcards: Vec::new(),
        }
    }
}

impl Deck {
    pub fn find_card(&self, id: &str) -> Option<&Flashcard> {
        self.flashcards.iter().find(|card| card.id == id)
    }

    pub fn find_card_mut(&mut self, id: &str) -> Option<&mut Flashcard> {
        self.flashcards.iter_mut().find(|card| card.id == id)
    }

    /// Replaces stored cards with updated copies, matched by id.
    /// Returns how many cards were replaced.
    pub fn merge_cards(&mut self, updated: impl IntoIterator<Item = Flashcard>) -> usize {
        let mut replaced = 0;
        for card in updated {
            if let Some(slot) = self.find_card_mut(&card.id) {
                *slot = card;
                replaced += 1;
            }
        }
        replaced
    }
}
