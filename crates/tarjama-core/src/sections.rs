use std::sync::LazyLock;

use regex::Regex;

const DIALECT_TAGS: (&str, &str) = ("<dialect>", "</dialect>");
const LINE_TAGS: (&str, &str) = ("<ltranslation>", "</ltranslation>");
const WORD_TAGS: (&str, &str) = ("<wtranslation>", "</wtranslation>");

const DIALECT_HEADING: &str = "## Dialect:";

static LINE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^##[ \t]*(Line-by-line translation and transliteration)[ \t]*(?::[ \t]*|(?:\n|$))")
        .expect("line heading pattern")
});

/// The three tagged regions of a payload. Missing regions are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub dialect: String,
    pub line_region: String,
    pub line_translation_header: String,
    pub word_region: String,
}

/// Inner text of the first `open ... close` pair, if both markers are there
fn tagged_region<'a>(raw: &'a str, (open, close): (&str, &str)) -> Option<&'a str> {
    let start = raw.find(open)? + open.len();
    let len = raw[start..].find(close)?;
    Some(&raw[start..start + len])
}

/// Splits a raw payload into dialect, line and word regions.
///
/// A payload with none of the tags is kept whole as the line region.
pub fn extract_sections(raw: &str) -> Sections {
    let dialect = tagged_region(raw, DIALECT_TAGS);
    let lines = tagged_region(raw, LINE_TAGS);
    let words = tagged_region(raw, WORD_TAGS);

    if dialect.is_none() && lines.is_none() && words.is_none() {
        if !raw.trim().is_empty() {
            tracing::warn!("No section tags in payload, keeping it as line text");
        }
        return Sections {
            line_region: raw.trim().to_string(),
            ..Default::default()
        };
    }

    let dialect = dialect
        .map(|region| region.trim().replacen(DIALECT_HEADING, "", 1).trim().to_string())
        .unwrap_or_default();

    let (line_region, line_translation_header) = match lines {
        Some(region) => split_line_heading(region.trim()),
        None => (String::new(), String::new()),
    };

    let word_region = words.map(|region| region.trim().to_string()).unwrap_or_default();

    tracing::debug!(
        "Sections: dialect={:?}, line region {} bytes, word region {} bytes",
        dialect,
        line_region.len(),
        word_region.len()
    );

    Sections {
        dialect,
        line_region,
        line_translation_header,
        word_region,
    }
}

/// Removes the line-by-line heading and returns (remaining text, heading text).
/// Text after the heading's colon on the same line is kept.
fn split_line_heading(region: &str) -> (String, String) {
    match LINE_HEADING.captures(region) {
        Some(caps) => {
            let header = caps[1].to_string();
            let remaining = LINE_HEADING.replacen(region, 1, "");
            (remaining.trim().to_string(), header)
        }
        None => (region.to_string(), String::new()),
    }
}
