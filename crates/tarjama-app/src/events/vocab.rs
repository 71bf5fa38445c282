use std::future::Future;
use std::sync::Arc;

use kanal::AsyncSender;
use tarjama_types::{AppEvent, AuthUser, NewVocabularyEntry};
use tarjama_vocab::VocabError;

use crate::state::AppState;

/// Runs a store call as the signed-in user.
///
/// When the store rejects the user's id token, the token is refreshed and the
/// call made once more. A refused refresh or a second rejection signs the user
/// out.
async fn with_fresh_token<T, F, Fut>(state: &AppState, call: F) -> Result<T, VocabError>
where
    F: Fn(Option<AuthUser>) -> Fut,
    Fut: Future<Output = Result<T, VocabError>>,
{
    let Some(owner) = state.session.current() else {
        return call(None).await;
    };

    match call(Some(owner)).await {
        Err(VocabError::AuthRequired) => {}
        result => return result,
    }

    tracing::info!("Vocabulary store rejected the id token, refreshing");
    let Ok(owner) = state.session.refresh(state.auth.as_ref()).await else {
        return Err(VocabError::AuthRequired);
    };

    let result = call(Some(owner)).await;
    if matches!(result, Err(VocabError::AuthRequired)) {
        tracing::warn!("Refreshed token was rejected too, signing out");
        state.session.sign_out();
    }
    result
}

async fn save(
    state: &AppState,
    candidate: NewVocabularyEntry,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let english = candidate.english.clone();

    let result = with_fresh_token(state, |owner| {
        let vocab = state.vocab.clone();
        let candidate = candidate.clone();
        async move { vocab.add(owner.as_ref(), candidate).await }
    })
    .await;

    let event = match result {
        Ok(created) => AppEvent::VocabAdded { english, created },
        Err(VocabError::AuthRequired) => AppEvent::AuthRequired,
        Err(e) => {
            tracing::error!("Error adding to vocabulary: {}", e);
            AppEvent::Failure(format!("Could not save \"{}\": {}", english, e))
        }
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_save_word(
    state: Arc<AppState>,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let candidate = state
        .current_view()
        .await
        .and_then(|view| view.word_entry(index).map(NewVocabularyEntry::from_word));

    match candidate {
        Some(candidate) => save(&state, candidate, app_to_ui_tx).await,
        None => {
            app_to_ui_tx
                .send(AppEvent::Failure(format!("No word {}", index + 1)))
                .await?;
            Ok(())
        }
    }
}

pub async fn handle_save_line(
    state: Arc<AppState>,
    index: usize,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let candidate = state
        .current_view()
        .await
        .and_then(|view| view.line_entry(index).map(NewVocabularyEntry::from_line));

    match candidate {
        Some(candidate) => save(&state, candidate, app_to_ui_tx).await,
        None => {
            app_to_ui_tx
                .send(AppEvent::Failure(format!("No line {}", index + 1)))
                .await?;
            Ok(())
        }
    }
}

pub async fn handle_list(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !state.session.is_signed_in() {
        app_to_ui_tx.send(AppEvent::AuthRequired).await?;
        return Ok(());
    }

    let result = with_fresh_token(&state, |owner| {
        let vocab = state.vocab.clone();
        async move { vocab.try_list(owner.as_ref()).await }
    })
    .await;

    let event = match result {
        Ok(entries) => AppEvent::ShowVocab(entries),
        Err(VocabError::AuthRequired) => AppEvent::AuthRequired,
        Err(e) => {
            // a failed read shows as an empty list
            tracing::error!("Failed to load vocabulary: {}", e);
            AppEvent::ShowVocab(Vec::new())
        }
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_remove(
    state: Arc<AppState>,
    id: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let result = with_fresh_token(&state, |owner| {
        let vocab = state.vocab.clone();
        let id = id.clone();
        async move { vocab.remove(owner.as_ref(), &id).await }
    })
    .await;

    let event = match result {
        Ok(()) => AppEvent::VocabRemoved(id),
        Err(VocabError::AuthRequired) => AppEvent::AuthRequired,
        Err(e) => {
            tracing::error!("Error removing from vocabulary: {}", e);
            AppEvent::Failure(format!("Could not remove {}: {}", id, e))
        }
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}
