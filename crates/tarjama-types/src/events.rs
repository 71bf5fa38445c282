use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::TranslationViewModel;
use crate::vocab::{AuthUser, VocabularyEntry};

/// Body of a translation request, either raw lyrics or a song lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslationRequest {
    Lyrics {
        song_lyrics: String,
    },
    Song {
        artist_name: String,
        song_name: String,
    },
}

impl TranslationRequest {
    pub fn lyrics(lyrics: impl Into<String>) -> Self {
        TranslationRequest::Lyrics {
            song_lyrics: lyrics.into(),
        }
    }

    pub fn song(artist: impl Into<String>, song: impl Into<String>) -> Self {
        TranslationRequest::Song {
            artist_name: artist.into(),
            song_name: song.into(),
        }
    }

    /// Trimmed copy, or a message naming the missing field
    pub fn validated(&self) -> Result<Self, String> {
        match self {
            TranslationRequest::Lyrics { song_lyrics } => {
                let song_lyrics = song_lyrics.trim();
                if song_lyrics.is_empty() {
                    return Err("Please enter song lyrics".to_string());
                }
                Ok(Self::lyrics(song_lyrics))
            }
            TranslationRequest::Song {
                artist_name,
                song_name,
            } => {
                if song_name.trim().is_empty() {
                    return Err("Please enter a song name".to_string());
                }
                if artist_name.trim().is_empty() {
                    return Err("Please enter an artist name".to_string());
                }
                Ok(Self::song(artist_name.trim(), song_name.trim()))
            }
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    // view -> app
    Translate(TranslationRequest),
    SaveWord(usize),
    SaveLine(usize),
    ListVocab,
    RemoveVocab(String),
    AskWord { index: usize, query: String },
    CloseChat,
    SignUp { email: String, password: String },
    SignIn { email: String, password: String },
    SignOut,
    WhoAmI,
    Show,
    Quit,

    // app -> view
    Translating,
    ShowTranslation(Arc<TranslationViewModel>),
    VocabAdded { english: String, created: bool },
    ShowVocab(Vec<VocabularyEntry>),
    VocabRemoved(String),
    ChatOpened { panel: u64, word: String, transliteration: String },
    ChatReply { panel: u64, text: String },
    ChatClosed,
    SessionChanged(Option<AuthUser>),
    AuthRequired,
    Notice(String),
    Failure(String),
}
