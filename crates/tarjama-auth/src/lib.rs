mod identity;
mod session;

pub use identity::IdentityToolkitClient;
pub use session::SessionHandle;

use tarjama_types::AuthUser;

/// Email/password identity provider
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Same user with a new id token bought with `user.refresh_token`
    async fn refresh(&self, user: &AuthUser) -> Result<AuthUser, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Provider error code, e.g. `EMAIL_EXISTS` or `INVALID_PASSWORD`
    #[error("Authentication failed: {0}")]
    Rejected(String),

    #[error("Sign-in is not configured")]
    Disabled,

    #[error("Not signed in")]
    NotSignedIn,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
