use serde::{Deserialize, Serialize};
use tarjama_types::{LineBlock, LineEntry, TranslationViewModel, UNKNOWN_DIALECT, WordEntry};

use crate::TranslateError;

/// Line as sent by a backend that structures its own output
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StructuredLine {
    pub arabic: String,
    pub transliteration: String,
    pub translation: String,
}

/// Word as sent by a backend that structures its own output
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StructuredWord {
    pub arabic: String,
    pub translation: String,
    pub transliteration: String,
    pub base: String,
    pub note: String,
}

/// Body of a `/get_translation` response.
///
/// Either `translated_output` (tagged text) or the structured fields are set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TranslationResponse {
    pub error: Option<String>,
    pub translated_output: Option<String>,
    pub dialect: Option<String>,
    pub ltranslation: Option<Vec<StructuredLine>>,
    pub wtranslation: Option<Vec<StructuredWord>>,
    pub raw_output: Option<String>,
}

impl TranslationResponse {
    pub fn into_view_model(self) -> Result<TranslationViewModel, TranslateError> {
        if let Some(error) = self.error {
            return Err(TranslateError::ApiError(error));
        }

        if let Some(output) = self.translated_output {
            return Ok(tarjama_core::build_view_model(&output));
        }

        if self.ltranslation.is_none() && self.wtranslation.is_none() && self.dialect.is_none() {
            tracing::warn!("Translation response carried no output");
            return Ok(tarjama_core::build_view_model(
                self.raw_output.as_deref().unwrap_or_default(),
            ));
        }

        let lines = self
            .ltranslation
            .unwrap_or_default()
            .into_iter()
            .map(|line| {
                LineBlock::Entry(LineEntry {
                    arabic: line.arabic.trim().to_string(),
                    transliteration: line.transliteration.trim().to_string(),
                    translation: line.translation.trim().to_string(),
                })
            })
            .collect();

        let word_entries = self
            .wtranslation
            .unwrap_or_default()
            .into_iter()
            .filter(|word| !word.arabic.trim().is_empty())
            .map(|word| WordEntry {
                word: word.arabic.trim().to_string(),
                translation: word.translation.trim().to_string(),
                transliteration: word.transliteration.trim().to_string(),
                base: word.base.trim().to_string(),
                note: word.note.trim().to_string(),
            })
            .collect();

        let dialect = self
            .dialect
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| UNKNOWN_DIALECT.to_string());

        Ok(TranslationViewModel {
            dialect,
            line_translation_header: String::new(),
            lines,
            word_entries,
            raw_word_region_text: String::new(),
            raw_output: self.raw_output.unwrap_or_default(),
        })
    }
}

/// Word context sent with a chat question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChatWord {
    pub arabic_text: String,
    pub english_translation: String,
    pub transliteration: String,
    pub base: String,
    pub note: String,
}

impl From<&WordEntry> for ChatWord {
    fn from(word: &WordEntry) -> Self {
        Self {
            arabic_text: word.word.clone(),
            english_translation: word.translation.clone(),
            transliteration: word.transliteration.clone(),
            base: word.base.clone(),
            note: word.note.clone(),
        }
    }
}

/// Body of a `/chat` request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub word: ChatWord,
    pub query: String,
    pub translated_output: String,
    pub previous_response_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub response: String,
    pub response_id: String,
    pub error: Option<String>,
}
