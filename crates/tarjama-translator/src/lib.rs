mod chat;
mod http;
mod response;

pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use http::HttpTranslator;
pub use response::{
    ChatReply, ChatRequest, ChatWord, StructuredLine, StructuredWord, TranslationResponse,
};

use tarjama_types::{TranslationRequest, TranslationViewModel};

/// Translation backend interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate a song and build its view model
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationViewModel, TranslateError>;

    /// Ask a question about one word of a translation
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, TranslateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The backend answered with an `error` field
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP error! status: {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
