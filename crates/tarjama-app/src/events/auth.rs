use std::sync::Arc;

use kanal::AsyncSender;
use tarjama_auth::AuthError;
use tarjama_types::AppEvent;

use crate::state::AppState;

fn auth_failure(action: &str, e: AuthError) -> AppEvent {
    tracing::warn!("{} failed: {}", action, e);
    match e {
        AuthError::Rejected(message) => AppEvent::Failure(message),
        e => AppEvent::Failure(format!("{} failed: {}", action, e)),
    }
}

fn credentials_missing(email: &str, password: &str) -> Option<AppEvent> {
    if email.trim().is_empty() || password.is_empty() {
        Some(AppEvent::Failure(
            "Email and password are required".to_string(),
        ))
    } else {
        None
    }
}

pub async fn handle_sign_up(
    state: Arc<AppState>,
    email: String,
    password: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if let Some(event) = credentials_missing(&email, &password) {
        app_to_ui_tx.send(event).await?;
        return Ok(());
    }

    // success is reported through the session watcher
    if let Err(e) = state
        .session
        .sign_up(state.auth.as_ref(), email.trim(), &password)
        .await
    {
        app_to_ui_tx.send(auth_failure("Sign up", e)).await?;
    }
    Ok(())
}

pub async fn handle_sign_in(
    state: Arc<AppState>,
    email: String,
    password: String,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if let Some(event) = credentials_missing(&email, &password) {
        app_to_ui_tx.send(event).await?;
        return Ok(());
    }

    if let Err(e) = state
        .session
        .sign_in(state.auth.as_ref(), email.trim(), &password)
        .await
    {
        app_to_ui_tx.send(auth_failure("Sign in", e)).await?;
    }
    Ok(())
}

pub async fn handle_sign_out(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    if !state.session.is_signed_in() {
        app_to_ui_tx
            .send(AppEvent::Notice("Not signed in".to_string()))
            .await?;
        return Ok(());
    }
    state.session.sign_out();
    Ok(())
}

pub async fn handle_who_am_i(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let notice = match state.session.current() {
        Some(user) => format!("Signed in as {}", user.email),
        None => "Not signed in".to_string(),
    };
    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
    Ok(())
}
