use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tarjama_config::auth::AuthConfig;
use tarjama_types::AuthUser;

use crate::{AuthError, AuthProvider};

/// Identity Toolkit REST client (`accounts:signUp`, `accounts:signInWithPassword`)
#[derive(Clone)]
pub struct IdentityToolkitClient {
    client: reqwest::Client,
    config: AuthConfig,
}

impl IdentityToolkitClient {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn invoke(&self, action: &str, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        if !self.config.enabled() {
            return Err(AuthError::Disabled);
        }

        let url = format!("{}/accounts:{}", self.config.url.trim_end_matches('/'), action);
        let request = CredentialsRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }

        let account: AccountResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::InvalidResponse(format!("Failed to parse account: {}", e)))?;
        Ok(account.into())
    }

    async fn exchange_refresh_token(&self, user: &AuthUser) -> Result<AuthUser, AuthError> {
        if !self.config.enabled() {
            return Err(AuthError::Disabled);
        }
        if user.refresh_token.is_empty() {
            return Err(AuthError::Rejected("MISSING_REFRESH_TOKEN".to_string()));
        }

        let url = format!("{}/token", self.config.token_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", user.refresh_token.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(rejection(status, &bytes));
        }

        let tokens: TokenResponse = serde_json::from_slice(&bytes)
            .map_err(|e| AuthError::InvalidResponse(format!("Failed to parse tokens: {}", e)))?;
        Ok(tokens.apply_to(user))
    }
}

#[async_trait]
impl AuthProvider for IdentityToolkitClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        tracing::info!("Registering {email}");
        self.invoke("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        tracing::info!("Signing in {email}");
        self.invoke("signInWithPassword", email, password).await
    }

    async fn refresh(&self, user: &AuthUser) -> Result<AuthUser, AuthError> {
        tracing::debug!("Refreshing id token for {}", user.uid);
        self.exchange_refresh_token(user).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
}

impl From<AccountResponse> for AuthUser {
    fn from(account: AccountResponse) -> Self {
        AuthUser {
            uid: account.local_id,
            email: account.email,
            id_token: account.id_token,
            refresh_token: account.refresh_token,
        }
    }
}

/// Secure token endpoint reply, snake_case unlike the accounts API
#[derive(Deserialize)]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    user_id: String,
}

impl TokenResponse {
    fn apply_to(self, user: &AuthUser) -> AuthUser {
        if !self.user_id.is_empty() && self.user_id != user.uid {
            tracing::warn!("Token refresh returned user {} for {}", self.user_id, user.uid);
        }
        AuthUser {
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            ..user.clone()
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Provider error code from a failed response body, or the status line
fn rejection(status: reqwest::StatusCode, body: &[u8]) -> AuthError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => AuthError::Rejected(envelope.error.message),
        Err(_) => AuthError::Rejected(format!(
            "HTTP {} {}",
            status,
            String::from_utf8_lossy(body)
        )),
    }
}
