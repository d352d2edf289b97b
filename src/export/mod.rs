pub mod json;

pub use json::{DeckFileError, export_json_to_path, import_json};
