use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tarjama_types::{AppEvent, AuthUser};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod auth;
pub mod chat;
pub mod translate;
pub mod vocab;

use auth::{handle_sign_in, handle_sign_out, handle_sign_up, handle_who_am_i};
use chat::{handle_ask, handle_close_chat};
use translate::{handle_show, handle_translate};
use vocab::{handle_list, handle_remove, handle_save_line, handle_save_word};

/// App's main loop.
///
/// Every request runs in its own task so slow network calls never hold up
/// input. Two translations in flight race; whichever resolves last is shown.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("[EVENT_LOOP] {:?}", std::mem::discriminant(&event));
        if let AppEvent::Quit = event {
            tracing::info!("Quit requested");
            cancel.cancel();
            break;
        }

        let state = state.clone();
        let tx = app_to_ui_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_events(state, &tx, event).await {
                tracing::error!("Event handler failed: {e}");
            }
        });
    }

    Ok(())
}

async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Translate(request) => handle_translate(state, request, app_to_ui_tx).await?,
        AppEvent::Show => handle_show(state, app_to_ui_tx).await?,
        AppEvent::SaveWord(index) => handle_save_word(state, index, app_to_ui_tx).await?,
        AppEvent::SaveLine(index) => handle_save_line(state, index, app_to_ui_tx).await?,
        AppEvent::ListVocab => handle_list(state, app_to_ui_tx).await?,
        AppEvent::RemoveVocab(id) => handle_remove(state, id, app_to_ui_tx).await?,
        AppEvent::AskWord { index, query } => {
            handle_ask(state, index, query, app_to_ui_tx).await?
        }
        AppEvent::CloseChat => handle_close_chat(state, app_to_ui_tx).await?,
        AppEvent::SignUp { email, password } => {
            handle_sign_up(state, email, password, app_to_ui_tx).await?
        }
        AppEvent::SignIn { email, password } => {
            handle_sign_in(state, email, password, app_to_ui_tx).await?
        }
        AppEvent::SignOut => handle_sign_out(state, app_to_ui_tx).await?,
        AppEvent::WhoAmI => handle_who_am_i(state, app_to_ui_tx).await?,
        AppEvent::Quit => {}

        // view-only events
        AppEvent::Translating
        | AppEvent::ShowTranslation(_)
        | AppEvent::VocabAdded { .. }
        | AppEvent::ShowVocab(_)
        | AppEvent::VocabRemoved(_)
        | AppEvent::ChatOpened { .. }
        | AppEvent::ChatReply { .. }
        | AppEvent::ChatClosed
        | AppEvent::SessionChanged(_)
        | AppEvent::AuthRequired
        | AppEvent::Notice(_)
        | AppEvent::Failure(_) => {
            tracing::warn!("View event sent to the app loop, ignoring");
        }
    }

    Ok(())
}

/// Forwards every sign-in and sign-out to the view.
/// `rx` is subscribed before the task is spawned.
pub async fn session_watch(
    mut rx: watch::Receiver<Option<AuthUser>>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = rx.changed() => changed?,
        }

        let user = rx.borrow_and_update().clone();
        app_to_ui_tx.send(AppEvent::SessionChanged(user)).await?;
    }

    Ok(())
}
