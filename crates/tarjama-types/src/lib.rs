pub mod events;
pub mod types;
pub mod vocab;

pub use events::{AppEvent, TranslationRequest};
pub use types::*;
pub use vocab::{AuthUser, NewVocabularyEntry, VocabularyEntry};
