use serde::{Deserialize, Serialize};

use crate::types::{LineEntry, WordEntry};

/// Signed-in user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    pub email: String,
    /// Bearer credential for the vocabulary store. Expires after about an hour.
    pub id_token: String,
    /// Long-lived credential that buys a new `id_token`
    #[serde(default)]
    pub refresh_token: String,
}

/// A saved word. `id` comes from the store and is the deletion key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub arabic: String,
    #[serde(default)]
    pub english: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub note: String,
}

/// Entry candidate before the store assigns an id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVocabularyEntry {
    pub arabic: String,
    pub english: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub note: String,
}

impl NewVocabularyEntry {
    pub fn from_word(word: &WordEntry) -> Self {
        Self {
            arabic: word.word.clone(),
            english: word.translation.clone(),
            translation: word.translation.clone(),
            transliteration: word.transliteration.clone(),
            base: word.base.clone(),
            note: word.note.clone(),
        }
    }

    pub fn from_line(line: &LineEntry) -> Self {
        Self {
            arabic: line.arabic.clone(),
            english: line.translation.clone(),
            translation: line.translation.clone(),
            transliteration: line.transliteration.clone(),
            ..Default::default()
        }
    }

    /// Same `(english, arabic)` pair: English ignores case, Arabic is exact
    pub fn same_pair(&self, entry: &VocabularyEntry) -> bool {
        self.english.to_lowercase() == entry.english.to_lowercase() && self.arabic == entry.arabic
    }

    pub fn with_id(self, id: String) -> VocabularyEntry {
        VocabularyEntry {
            id,
            arabic: self.arabic,
            english: self.english,
            translation: self.translation,
            transliteration: self.transliteration,
            base: self.base,
            note: self.note,
        }
    }
}
