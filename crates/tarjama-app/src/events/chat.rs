use std::sync::Arc;

use kanal::AsyncSender;
use tarjama_translator::ChatSession;
use tarjama_types::AppEvent;
use tokio::sync::Mutex;

use crate::state::{AppState, ChatPanel};

const CHAT_FAILURE: &str = "Sorry, there was an error processing your question. Please try again.";

/// Opens (or reuses) the panel for a word, then asks `query` if there is one.
///
/// At most one panel is open. Asking about another word replaces it and the
/// old conversation is dropped.
pub async fn handle_ask(
    state: Arc<AppState>,
    index: usize,
    query: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let Some(view) = state.current_view().await else {
        app_to_ui_tx
            .send(AppEvent::Failure("Nothing translated yet".to_string()))
            .await?;
        return Ok(());
    };
    let Some(word) = view.word_entry(index).cloned() else {
        app_to_ui_tx
            .send(AppEvent::Failure(format!("No word {}", index + 1)))
            .await?;
        return Ok(());
    };

    let (panel_id, session, opened) = {
        let mut chat = state.chat.lock().await;
        let reused = chat
            .as_ref()
            .filter(|panel| panel.word == word)
            .map(|panel| (panel.id, panel.session.clone()));

        match reused {
            Some((id, session)) => (id, session, false),
            None => {
                let id = state.next_panel_id();
                let session = Arc::new(Mutex::new(ChatSession::new(
                    word.clone(),
                    view.raw_output.clone(),
                )));
                *chat = Some(ChatPanel {
                    id,
                    word: word.clone(),
                    session: session.clone(),
                });
                (id, session, true)
            }
        }
    };

    if opened {
        app_to_ui_tx
            .send(AppEvent::ChatOpened {
                panel: panel_id,
                word: word.word,
                transliteration: word.transliteration,
            })
            .await?;
    }

    if query.trim().is_empty() {
        return Ok(());
    }

    // one turn at a time per panel
    let text = {
        let mut session = session.lock().await;
        match session.ask(state.translator.as_ref(), &query).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Chat request failed: {}", e);
                CHAT_FAILURE.to_string()
            }
        }
    };

    if state.open_panel_id().await != Some(panel_id) {
        tracing::debug!("Dropping reply for closed panel {}", panel_id);
        return Ok(());
    }

    app_to_ui_tx
        .send(AppEvent::ChatReply {
            panel: panel_id,
            text,
        })
        .await?;
    Ok(())
}

pub async fn handle_close_chat(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if state.chat.lock().await.take().is_some() {
        app_to_ui_tx.send(AppEvent::ChatClosed).await?;
    }
    Ok(())
}
