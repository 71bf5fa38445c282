//! Turns the translation backend's tagged text payload into a view model.
//!
//! None of these functions fail: malformed or partial input degrades to
//! empty fields and raw-text fallbacks.

pub mod lines;
pub mod sections;
pub mod text;
pub mod view;
pub mod words;

pub use lines::format_lines;
pub use sections::{Sections, extract_sections};
pub use view::build_view_model;
pub use words::parse_word_entries;
