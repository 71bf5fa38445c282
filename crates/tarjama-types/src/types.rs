use serde::{Deserialize, Serialize};

pub const UNKNOWN_DIALECT: &str = "Unknown";

/// One sung line with its transliteration and English rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineEntry {
    pub arabic: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub translation: String,
}

/// Word-level gloss. `word` is never empty for a parsed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub translation: String,
    #[serde(default)]
    pub transliteration: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub note: String,
}

/// A paragraph of the line region, either mapped to a triple or kept as raw lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineBlock {
    Entry(LineEntry),
    Raw(Vec<String>),
}

impl LineBlock {
    pub fn as_entry(&self) -> Option<&LineEntry> {
        match self {
            LineBlock::Entry(entry) => Some(entry),
            LineBlock::Raw(_) => None,
        }
    }
}

/// Everything the view needs to render one translation.
///
/// Built once per translation response and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationViewModel {
    pub dialect: String,
    /// Empty when the payload had no line heading
    pub line_translation_header: String,
    pub lines: Vec<LineBlock>,
    pub word_entries: Vec<WordEntry>,
    /// Word region as received, for the raw fallback and chat context
    pub raw_word_region_text: String,
    pub raw_output: String,
}

impl TranslationViewModel {
    /// Mapped line triples in payload order
    pub fn line_entries(&self) -> impl Iterator<Item = &LineEntry> {
        self.lines.iter().filter_map(LineBlock::as_entry)
    }

    pub fn line_entry(&self, index: usize) -> Option<&LineEntry> {
        self.line_entries().nth(index)
    }

    pub fn word_entry(&self, index: usize) -> Option<&WordEntry> {
        self.word_entries.get(index)
    }
}

impl Default for TranslationViewModel {
    fn default() -> Self {
        Self {
            dialect: UNKNOWN_DIALECT.to_string(),
            line_translation_header: String::new(),
            lines: Vec::new(),
            word_entries: Vec::new(),
            raw_word_region_text: String::new(),
            raw_output: String::new(),
        }
    }
}
