use std::sync::Arc;

use tarjama_types::AuthUser;
use tokio::sync::watch;

use crate::{AuthError, AuthProvider};

/// Process-wide sign-in state.
///
/// Cheap to clone; every clone sees the same current user. Components that
/// need the user get a handle passed in rather than reading a global.
#[derive(Clone)]
pub struct SessionHandle {
    tx: Arc<watch::Sender<Option<AuthUser>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> Option<AuthUser> {
        self.tx.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Receiver that wakes on every sign-in and sign-out
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.tx.subscribe()
    }

    pub async fn sign_up(
        &self,
        provider: &dyn AuthProvider,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let user = provider.sign_up(email, password).await?;
        self.set(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_in(
        &self,
        provider: &dyn AuthProvider,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let user = provider.sign_in(email, password).await?;
        self.set(Some(user.clone()));
        Ok(user)
    }

    pub fn sign_out(&self) {
        if self.is_signed_in() {
            tracing::info!("Signing out");
        }
        self.set(None);
    }

    /// Swaps in a fresh id token for the current user.
    ///
    /// Subscribers are not woken: the user is the same. If the provider
    /// refuses, the session is signed out.
    pub async fn refresh(&self, provider: &dyn AuthProvider) -> Result<AuthUser, AuthError> {
        let user = self.current().ok_or(AuthError::NotSignedIn)?;

        match provider.refresh(&user).await {
            Ok(refreshed) => {
                self.tx.send_if_modified(|current| {
                    // a sign-out or another sign-in meanwhile wins
                    if current.as_ref().is_some_and(|u| u.uid == refreshed.uid) {
                        *current = Some(refreshed.clone());
                    }
                    false
                });
                Ok(refreshed)
            }
            Err(e) => {
                tracing::warn!("Could not refresh session for {}: {}", user.email, e);
                self.sign_out();
                Err(e)
            }
        }
    }

    fn set(&self, user: Option<AuthUser>) {
        self.tx.send_replace(user);
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}
