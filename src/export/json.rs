//! JSON import/export module for flashcard decks.
//! Saves and loads Deck structures, review states included, to/from JSON files.

use crate::models::Deck;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum DeckFileError {
    #[error("deck file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("deck file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exports a deck to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(deck: &Deck, path: &Path) -> Result<(), DeckFileError> {
    let json_string = serde_json::to_string_pretty(deck)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a deck from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: &Path) -> Result<Deck, DeckFileError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let deck: Deck = serde_json::from_str(&contents)?;

    info!(
        deck = %deck.name,
        cards = deck.flashcards.len(),
        path = %path.display(),
        "deck imported"
    );
    Ok(deck)
}
