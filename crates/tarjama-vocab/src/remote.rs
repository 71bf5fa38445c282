use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tarjama_types::{AuthUser, NewVocabularyEntry, VocabularyEntry};

use crate::{VocabBackend, VocabError};

/// Realtime database REST backend storing entries under `users/{uid}/vocab/{id}`
#[derive(Clone)]
pub struct RealtimeDbBackend {
    base_url: String,
    client: reqwest::Client,
}

impl RealtimeDbBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self, owner: &AuthUser) -> String {
        format!("{}/users/{}/vocab.json", self.base_url, owner.uid)
    }

    fn entry_url(&self, owner: &AuthUser, id: &str) -> String {
        format!("{}/users/{}/vocab/{}.json", self.base_url, owner.uid, id)
    }

    /// Send an authenticated request and check the status
    async fn invoke(
        &self,
        method: Method,
        url: &str,
        owner: &AuthUser,
        body: Option<&NewVocabularyEntry>,
    ) -> Result<reqwest::Response, VocabError> {
        let mut request = self
            .client
            .request(method, url)
            .query(&[("auth", owner.id_token.as_str())]);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => {
                tracing::warn!("Vocabulary store rejected the session token");
                Err(VocabError::AuthRequired)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(VocabError::Remote { status, body })
            }
        }
    }
}

/// Keys a store id may contain; anything else cannot name a stored entry
fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| matches!(c, '/' | '.' | '#' | '$' | '[' | ']') || c.is_control())
}

/// Collection body: generated key -> entry, `null` when the user has no entries
type Collection = Option<BTreeMap<String, VocabularyEntry>>;

/// Entries in key order, each carrying its key as `id`.
/// Generated keys sort by creation time.
fn entries_with_ids(collection: Collection) -> Vec<VocabularyEntry> {
    collection
        .unwrap_or_default()
        .into_iter()
        .map(|(id, entry)| VocabularyEntry { id, ..entry })
        .collect()
}

#[derive(Deserialize)]
struct CreatedKey {
    name: String,
}

#[async_trait]
impl VocabBackend for RealtimeDbBackend {
    async fn read_all(&self, owner: &AuthUser) -> Result<Vec<VocabularyEntry>, VocabError> {
        let url = self.collection_url(owner);
        let response = self.invoke(Method::GET, &url, owner, None).await?;

        let collection: Collection = response.json().await?;
        Ok(entries_with_ids(collection))
    }

    async fn create(&self, owner: &AuthUser, entry: &NewVocabularyEntry) -> Result<String, VocabError> {
        let url = self.collection_url(owner);
        let response = self.invoke(Method::POST, &url, owner, Some(entry)).await?;
        let created: CreatedKey = response.json().await?;
        Ok(created.name)
    }

    async fn delete(&self, owner: &AuthUser, id: &str) -> Result<(), VocabError> {
        if !valid_key(id) {
            tracing::debug!("'{}' is not a store key, nothing to delete", id);
            return Ok(());
        }

        let url = self.entry_url(owner, id);
        self.invoke(Method::DELETE, &url, owner, None).await?;
        Ok(())
    }
}
