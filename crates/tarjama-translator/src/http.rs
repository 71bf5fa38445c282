use std::time::Duration;

use async_trait::async_trait;
use tarjama_config::backend::BackendConfig;
use tarjama_types::{TranslationRequest, TranslationViewModel};

use crate::response::{ChatReply, ChatRequest, TranslationResponse};
use crate::{TranslateError, Translator};

/// Client for the translation service's `/get_translation` and `/chat` endpoints
#[derive(Clone)]
pub struct HttpTranslator {
    client: reqwest::Client,
    config: BackendConfig,
}

impl HttpTranslator {
    pub fn new(config: BackendConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, TranslateError>
    where
        B: serde::Serialize + ?Sized,
        T: for<'de> serde::Deserialize<'de>,
    {
        let url = self.config.endpoint(path);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(TranslateError::HttpStatus(response.status()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TranslateError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationViewModel, TranslateError> {
        let request = request
            .validated()
            .map_err(TranslateError::InvalidRequest)?;

        let response: TranslationResponse = self.post("get_translation", &request).await?;
        let view = response.into_view_model()?;

        tracing::info!(
            "Translation ready: dialect={}, {} lines, {} words",
            view.dialect,
            view.lines.len(),
            view.word_entries.len()
        );
        Ok(view)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, TranslateError> {
        let reply: ChatReply = self.post("chat", request).await?;

        if let Some(error) = reply.error {
            return Err(TranslateError::ApiError(error));
        }

        Ok(reply)
    }
}
