use tarjama_types::{TranslationViewModel, UNKNOWN_DIALECT};

use crate::lines::format_lines;
use crate::sections::extract_sections;
use crate::words::parse_word_entries;

/// Runs the whole pipeline over a raw `translated_output` payload
pub fn build_view_model(raw: &str) -> TranslationViewModel {
    let sections = extract_sections(raw);

    // independent of each other
    let word_entries = parse_word_entries(&sections.word_region);
    let lines = format_lines(&sections.line_region);

    let dialect = if sections.dialect.is_empty() {
        UNKNOWN_DIALECT.to_string()
    } else {
        sections.dialect
    };

    TranslationViewModel {
        dialect,
        line_translation_header: sections.line_translation_header,
        lines,
        word_entries,
        raw_word_region_text: sections.word_region,
        raw_output: raw.to_string(),
    }
}
