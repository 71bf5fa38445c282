use std::fmt::Write;

use tarjama_config::ui::UiConfig;
use tarjama_core::text;
use tarjama_types::{AppEvent, LineBlock, TranslationViewModel, VocabularyEntry, WordEntry};

/// Optional fields are left out rather than printed empty
fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        let _ = writeln!(out, "      {}: {}", label, value);
    }
}

fn render_word(out: &mut String, number: usize, word: &WordEntry, ui: &UiConfig) {
    let _ = writeln!(out, "  [{}] {}", number, word.word);
    push_field(out, "Translation", &word.translation);
    push_field(out, "Transliteration", &word.transliteration);
    push_field(out, "Base", &word.base);
    if ui.show_notes {
        push_field(out, "Note", &word.note);
    }
}

pub fn render_view(view: &TranslationViewModel, ui: &UiConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dialect: {}", view.dialect);

    if !view.line_translation_header.is_empty() {
        let _ = writeln!(out, "\n{}", view.line_translation_header);
    }

    let mut line_number = 0;
    for block in &view.lines {
        out.push('\n');
        match block {
            LineBlock::Entry(entry) => {
                line_number += 1;
                let _ = writeln!(out, "  ({}) {}", line_number, entry.arabic);
                let _ = writeln!(out, "      {}", entry.transliteration);
                let _ = writeln!(out, "      {}", entry.translation);
            }
            LineBlock::Raw(lines) => {
                for line in lines {
                    let _ = writeln!(out, "  {}", line);
                }
            }
        }
    }

    if !view.word_entries.is_empty() {
        let _ = writeln!(out, "\nWords:");
        for (i, word) in view.word_entries.iter().enumerate() {
            render_word(&mut out, i + 1, word, ui);
        }
    } else {
        // unparsed glosses are still worth reading
        let region = text::normalize(&view.raw_word_region_text);
        let mut blocks = text::paragraphs(&region).map(str::trim).peekable();
        if blocks.peek().is_some() {
            let _ = writeln!(out, "\nWords:");
        }
        for block in blocks {
            let _ = writeln!(out, "{}\n", block);
        }
    }

    out
}

pub fn render_vocab(entries: &[VocabularyEntry]) -> String {
    if entries.is_empty() {
        return "Your vocabulary is empty".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = write!(out, "{}  {} = {}", entry.id, entry.arabic, entry.english);
        if !entry.transliteration.is_empty() {
            let _ = write!(out, " ({})", entry.transliteration);
        }
        out.push('\n');
    }
    out
}

/// Text for one app event, `None` for events the terminal keeps quiet about
pub fn render_event(event: &AppEvent, ui: &UiConfig) -> Option<String> {
    let text = match event {
        AppEvent::Translating => "Translating...".to_string(),
        AppEvent::ShowTranslation(view) => render_view(view, ui),
        AppEvent::VocabAdded {
            english,
            created: true,
        } => format!("Added \"{}\" to your vocabulary", english),
        AppEvent::VocabAdded {
            english,
            created: false,
        } => format!("\"{}\" is already in your vocabulary", english),
        AppEvent::ShowVocab(entries) => render_vocab(entries),
        AppEvent::VocabRemoved(id) => format!("Removed {}", id),
        AppEvent::ChatOpened {
            word,
            transliteration,
            ..
        } if transliteration.is_empty() => format!("Asking about {}", word),
        AppEvent::ChatOpened {
            word,
            transliteration,
            ..
        } => format!("Asking about {} ({})", word, transliteration),
        AppEvent::ChatReply { text, .. } => text.clone(),
        AppEvent::ChatClosed => "Conversation closed".to_string(),
        AppEvent::SessionChanged(Some(user)) => format!("Signed in as {}", user.email),
        AppEvent::SessionChanged(None) => "Signed out".to_string(),
        AppEvent::AuthRequired => "Please sign in to use your vocabulary".to_string(),
        AppEvent::Notice(text) => text.clone(),
        AppEvent::Failure(text) => format!("Error: {}", text),
        _ => return None,
    };
    Some(text)
}
