use tarjama_types::{LineBlock, LineEntry};

use crate::text::{normalize, paragraphs};

const QUOTES: [char; 3] = ['"', '“', '”'];

/// Maps each paragraph of the line region to a `(arabic, transliteration, translation)`
/// triple, or keeps its lines as-is when it has fewer than three.
///
/// Sub-lines past the third are dropped: the backend format has no slot for them.
pub fn format_lines(region: &str) -> Vec<LineBlock> {
    let text = normalize(region);

    paragraphs(&text)
        .map(|paragraph| {
            let lines: Vec<&str> = paragraph
                .split('\n')
                .filter(|line| !line.trim().is_empty())
                .collect();

            match lines.as_slice() {
                [arabic, transliteration, translation, rest @ ..] => {
                    if !rest.is_empty() {
                        tracing::debug!("Dropping {} extra lines in paragraph", rest.len());
                    }
                    LineBlock::Entry(LineEntry {
                        arabic: arabic.replace(QUOTES, "").trim().to_string(),
                        transliteration: transliteration.trim().to_string(),
                        translation: translation.trim().to_string(),
                    })
                }
                _ => LineBlock::Raw(lines.iter().map(|line| line.to_string()).collect()),
            }
        })
        .collect()
}
