use std::sync::Arc;

use kanal::AsyncSender;
use tarjama_types::{AppEvent, TranslationRequest};

use crate::state::AppState;

pub async fn handle_translate(
    state: Arc<AppState>,
    request: TranslationRequest,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let request = match request.validated() {
        Ok(request) => request,
        Err(message) => {
            app_to_ui_tx.send(AppEvent::Failure(message)).await?;
            return Ok(());
        }
    };

    app_to_ui_tx.send(AppEvent::Translating).await?;

    match state.translator.translate(&request).await {
        Ok(view) => {
            let view = Arc::new(view);
            *state.view.write().await = Some(view.clone());

            // the open conversation was about a word of the previous song
            if state.chat.lock().await.take().is_some() {
                app_to_ui_tx.send(AppEvent::ChatClosed).await?;
            }

            app_to_ui_tx.send(AppEvent::ShowTranslation(view)).await?;
        }
        Err(e) => {
            tracing::error!("Error fetching translation: {}", e);
            app_to_ui_tx
                .send(AppEvent::Failure(format!(
                    "Error fetching translation: {}. Make sure the translation server is running on {}",
                    e, state.config.backend.url
                )))
                .await?;
        }
    }

    Ok(())
}

pub async fn handle_show(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let event = match state.current_view().await {
        Some(view) => AppEvent::ShowTranslation(view),
        None => AppEvent::Notice("Nothing translated yet".to_string()),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}
