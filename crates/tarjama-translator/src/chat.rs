use tarjama_types::WordEntry;

use crate::response::{ChatRequest, ChatWord};
use crate::{TranslateError, Translator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// One conversation about one word.
///
/// Each turn sends the previous turn's response id so the backend keeps
/// context. Dropping the session ends the conversation.
#[derive(Debug, Clone)]
pub struct ChatSession {
    word: WordEntry,
    translated_output: String,
    previous_response_id: Option<String>,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(word: WordEntry, translated_output: String) -> Self {
        Self {
            word,
            translated_output,
            previous_response_id: None,
            messages: Vec::new(),
        }
    }

    pub fn word(&self) -> &WordEntry {
        &self.word
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn previous_response_id(&self) -> Option<&str> {
        self.previous_response_id.as_deref()
    }

    /// Sends one question and records both sides of the turn
    pub async fn ask(
        &mut self,
        translator: &dyn Translator,
        query: &str,
    ) -> Result<String, TranslateError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TranslateError::InvalidRequest("Empty question".to_string()));
        }

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: query.to_string(),
        });

        let request = ChatRequest {
            word: ChatWord::from(&self.word),
            query: query.to_string(),
            translated_output: self.translated_output.clone(),
            previous_response_id: self.previous_response_id.clone(),
        };

        let reply = translator.chat(&request).await?;

        if !reply.response_id.is_empty() {
            self.previous_response_id = Some(reply.response_id);
        }

        let content = if reply.response.is_empty() {
            "No response received.".to_string()
        } else {
            reply.response
        };
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: content.clone(),
        });

        Ok(content)
    }
}
