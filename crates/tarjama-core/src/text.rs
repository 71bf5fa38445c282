use std::sync::LazyLock;

use regex::Regex;

static SEPARATOR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*-{3,}[ \t]*$").expect("separator pattern"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("blank run pattern"));

/// Unix line endings, and lines made only of `---` runs become blank.
///
/// Both the line formatter and the word parser go through this, so a
/// decorative separator means the same thing everywhere.
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n");
    SEPARATOR_LINE.replace_all(&text, "").into_owned()
}

/// Chunks of text separated by one or more blank lines. Chunks are not trimmed.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    BLANK_RUN
        .split(text)
        .filter(|paragraph| !paragraph.trim().is_empty())
}
