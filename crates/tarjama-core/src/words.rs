use std::sync::LazyLock;

use regex::Regex;
use tarjama_types::WordEntry;

use crate::text::{normalize, paragraphs};

/// `Word:` label at the start of a line, with optional emphasis markers
static WORD_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\*{0,2}Word\*{0,2}:\*{0,2}[ \t]*").expect("word label pattern")
});

/// `Word:` label opening a blank-line separated block
static WORD_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\*{0,2}Word\*{0,2}:\*{0,2}[ \t]*").expect("word block pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Translation,
    Transliteration,
    Base,
    Note,
}

impl Field {
    /// Notes may span lines, every other field ends at the line break
    fn multiline(self) -> bool {
        self == Field::Note
    }
}

fn label(name: &str) -> Regex {
    Regex::new(&format!(r"(?:^|\s)(\*{{0,2}}{name}\*{{0,2}}:\*{{0,2}})")).expect("field label pattern")
}

static FIELD_LABELS: LazyLock<[(Field, Regex); 4]> = LazyLock::new(|| {
    [
        (Field::Translation, label("Translation")),
        (Field::Transliteration, label("Transliteration")),
        (Field::Base, label("Base")),
        (Field::Note, label("Note")),
    ]
});

/// Where a field label sits inside an entry body
struct LabelSpan {
    field: Field,
    start: usize,
    end: usize,
}

/// True when only whitespace precedes `at` on its line
fn starts_line(body: &str, at: usize) -> bool {
    let line_start = body[..at].rfind('\n').map_or(0, |i| i + 1);
    body[line_start..at].trim().is_empty()
}

/// Field labels that open a value, ordered by position.
///
/// A label counts at the start of a line, or anywhere on the headword's own
/// line (the single-line `Word: "x" Translation: y` form). Each field takes
/// its first such label. Note runs to the end of the entry, so nothing after
/// it opens another field.
fn label_spans(body: &str) -> Vec<LabelSpan> {
    let first_line_end = body.find('\n').unwrap_or(body.len());

    let mut spans: Vec<LabelSpan> = FIELD_LABELS
        .iter()
        .filter_map(|(field, pattern)| {
            let found = pattern
                .captures_iter(body)
                .filter_map(|caps| caps.get(1))
                .find(|found| found.start() < first_line_end || starts_line(body, found.start()))?;
            Some(LabelSpan {
                field: *field,
                start: found.start(),
                end: found.end(),
            })
        })
        .collect();
    spans.sort_by_key(|span| span.start);

    if let Some(note) = spans.iter().position(|span| span.field == Field::Note) {
        spans.truncate(note + 1);
    }
    spans
}

/// Builds an entry from its headword and the text after it
fn entry_from_body(word: &str, body: &str) -> WordEntry {
    let mut entry = WordEntry {
        word: word.trim().to_string(),
        ..Default::default()
    };

    let spans = label_spans(body);
    for (i, span) in spans.iter().enumerate() {
        let mut end = spans.get(i + 1).map_or(body.len(), |next| next.start);
        if !span.field.multiline() {
            if let Some(newline) = body[span.end..end].find('\n') {
                end = span.end + newline;
            }
        }

        let value = body[span.end..end].trim().to_string();
        match span.field {
            Field::Translation => entry.translation = value,
            Field::Transliteration => entry.transliteration = value,
            Field::Base => entry.base = value,
            Field::Note => entry.note = value,
        }
    }

    entry
}

/// Splits the headword off the text that follows a `Word:` label.
///
/// Quoted headwords may use straight or curly quotes. Unquoted ones run to
/// the end of the line or the first field label.
fn split_headword(rest: &str, require_quotes: bool) -> Option<(&str, &str)> {
    for (open, close) in [('"', '"'), ('“', '”')] {
        if let Some(inner) = rest.strip_prefix(open) {
            let len = inner.find(close)?;
            if inner[..len].contains('\n') {
                return None;
            }
            return Some((&inner[..len], &inner[len + close.len_utf8()..]));
        }
    }

    if require_quotes {
        return None;
    }

    let mut end = rest.find('\n').unwrap_or(rest.len());
    if let Some(first_label) = label_spans(&rest[..end]).first() {
        end = first_label.start;
    }
    Some((&rest[..end], &rest[end..]))
}

/// Entries delimited by `Word: "<token>"` lines, each running to the next `Word:` line
fn scan_word_lines(text: &str) -> Vec<WordEntry> {
    let labels: Vec<(usize, usize)> = WORD_LINE
        .find_iter(text)
        .map(|found| (found.start(), found.end()))
        .collect();

    let mut entries = Vec::new();
    for (i, (_, label_end)) in labels.iter().enumerate() {
        let entry_end = labels.get(i + 1).map_or(text.len(), |(next_start, _)| *next_start);
        let Some((word, body)) = split_headword(&text[*label_end..entry_end], true) else {
            continue;
        };
        if word.trim().is_empty() {
            continue;
        }
        entries.push(entry_from_body(word, body));
    }
    entries
}

/// Blank-line separated blocks that open with a `Word:` label
fn scan_blocks(text: &str) -> Vec<WordEntry> {
    paragraphs(text)
        .filter_map(|block| {
            let found = WORD_BLOCK.find(block)?;
            let (word, body) = split_headword(&block[found.end()..], false)?;
            if word.trim().is_empty() {
                return None;
            }
            Some(entry_from_body(word, body))
        })
        .collect()
}

/// Parses the word region into entries, in source order.
///
/// An empty result is a normal outcome; the caller shows the raw region instead.
pub fn parse_word_entries(region: &str) -> Vec<WordEntry> {
    if region.trim().is_empty() {
        return Vec::new();
    }

    let text = normalize(region);
    let mut entries = scan_word_lines(&text);

    if entries.is_empty() {
        tracing::debug!("No quoted word entries, trying block split");
        entries = scan_blocks(&text);
    }

    if entries.is_empty() {
        let sample: String = text.chars().take(200).collect();
        tracing::warn!("Parsed 0 word entries from word region: {:?}", sample);
    } else {
        tracing::debug!("Parsed {} word entries", entries.len());
    }

    entries
}
