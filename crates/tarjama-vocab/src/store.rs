use std::sync::Arc;

use tarjama_config::StoreMode;
use tarjama_config::store::StoreConfig;
use tarjama_types::{AuthUser, NewVocabularyEntry, VocabularyEntry};

use crate::{LocalFileBackend, MemoryBackend, RealtimeDbBackend, VocabBackend, VocabError};

/// De-duplicating list/add/remove over a [`VocabBackend`].
///
/// Nothing is cached; every call goes to the backend.
#[derive(Clone)]
pub struct VocabularyStore {
    backend: Arc<dyn VocabBackend>,
}

impl VocabularyStore {
    pub fn new(backend: Arc<dyn VocabBackend>) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        let backend: Arc<dyn VocabBackend> = match config.mode() {
            StoreMode::Remote if !config.database_url.is_empty() => {
                Arc::new(RealtimeDbBackend::new(config.database_url.clone()))
            }
            StoreMode::Remote => {
                tracing::warn!(
                    "Remote vocabulary store has no database url, using {}",
                    config.local_path
                );
                Arc::new(LocalFileBackend::new(&config.local_path))
            }
            StoreMode::Local => Arc::new(LocalFileBackend::new(&config.local_path)),
            StoreMode::Memory => Arc::new(MemoryBackend::new()),
        };
        Self::new(backend)
    }

    /// Saved words of `owner`. Failures are logged and read as an empty list.
    pub async fn list(&self, owner: Option<&AuthUser>) -> Vec<VocabularyEntry> {
        let Some(owner) = owner else {
            tracing::debug!("No user signed in, vocabulary is empty");
            return Vec::new();
        };

        match self.try_list(Some(owner)).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Failed to load vocabulary for {}: {}", owner.uid, e);
                Vec::new()
            }
        }
    }

    /// Like [`list`](Self::list) but reports why the read failed, so callers
    /// can tell a rejected credential from an empty collection
    pub async fn try_list(&self, owner: Option<&AuthUser>) -> Result<Vec<VocabularyEntry>, VocabError> {
        let owner = owner.ok_or(VocabError::AuthRequired)?;
        self.backend.read_all(owner).await
    }

    /// Saves `candidate` unless the same `(english, arabic)` pair is already there.
    ///
    /// Returns `false` for an existing pair. The check and the write are two
    /// round trips, so two concurrent adds of one pair can both succeed.
    pub async fn add(
        &self,
        owner: Option<&AuthUser>,
        candidate: NewVocabularyEntry,
    ) -> Result<bool, VocabError> {
        let owner = owner.ok_or(VocabError::AuthRequired)?;

        let existing = self.backend.read_all(owner).await?;
        if existing.iter().any(|entry| candidate.same_pair(entry)) {
            tracing::debug!("'{}' already saved", candidate.english);
            return Ok(false);
        }

        let id = self.backend.create(owner, &candidate).await?;
        tracing::info!("Saved '{}' as {}", candidate.english, id);
        Ok(true)
    }

    pub async fn remove(&self, owner: Option<&AuthUser>, id: &str) -> Result<(), VocabError> {
        let owner = owner.ok_or(VocabError::AuthRequired)?;
        self.backend.delete(owner, id).await?;
        tracing::info!("Removed vocabulary entry {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(uid: &str) -> AuthUser {
        AuthUser {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            id_token: "token".to_string(),
            refresh_token: String::new(),
        }
    }

    fn hello() -> NewVocabularyEntry {
        NewVocabularyEntry {
            arabic: "مرحبا".to_string(),
            english: "Hello".to_string(),
            transliteration: "Marhaba".to_string(),
            ..Default::default()
        }
    }

    fn store() -> VocabularyStore {
        VocabularyStore::new(Arc::new(MemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_second_add_of_same_pair_is_refused() {
        let store = store();
        let owner = user("noor");

        assert!(store.add(Some(&owner), hello()).await.unwrap());
        assert!(!store.add(Some(&owner), hello()).await.unwrap());

        let mut shouted = hello();
        shouted.english = "HELLO".to_string();
        assert!(!store.add(Some(&owner), shouted).await.unwrap());

        assert_eq!(store.list(Some(&owner)).await.len(), 1);
    }

    #[tokio::test]
    async fn test_same_english_different_arabic_is_new() {
        let store = store();
        let owner = user("noor");

        store.add(Some(&owner), hello()).await.unwrap();
        let mut other = hello();
        other.arabic = "أهلا".to_string();
        assert!(store.add(Some(&owner), other).await.unwrap());
        assert_eq!(store.list(Some(&owner)).await.len(), 2);
    }

    #[tokio::test]
    async fn test_owners_are_separate() {
        let store = store();

        store.add(Some(&user("noor")), hello()).await.unwrap();
        assert!(store.add(Some(&user("sami")), hello()).await.unwrap());
        assert_eq!(store.list(Some(&user("sami"))).await.len(), 1);
    }

    #[tokio::test]
    async fn test_signed_out() {
        let store = store();

        assert!(matches!(
            store.add(None, hello()).await,
            Err(VocabError::AuthRequired)
        ));
        assert!(matches!(
            store.remove(None, "1").await,
            Err(VocabError::AuthRequired)
        ));
        assert!(store.list(None).await.is_empty());
    }

    /// Answers like a remote store holding an expired id token
    struct ExpiredTokenBackend;

    #[async_trait::async_trait]
    impl VocabBackend for ExpiredTokenBackend {
        async fn read_all(&self, _owner: &AuthUser) -> Result<Vec<VocabularyEntry>, VocabError> {
            Err(VocabError::AuthRequired)
        }

        async fn create(&self, _owner: &AuthUser, _entry: &NewVocabularyEntry) -> Result<String, VocabError> {
            Err(VocabError::AuthRequired)
        }

        async fn delete(&self, _owner: &AuthUser, _id: &str) -> Result<(), VocabError> {
            Err(VocabError::AuthRequired)
        }
    }

    #[tokio::test]
    async fn test_rejected_token_is_visible_to_callers() {
        let store = VocabularyStore::new(Arc::new(ExpiredTokenBackend));
        let owner = user("noor");

        assert!(store.list(Some(&owner)).await.is_empty());
        assert!(matches!(
            store.try_list(Some(&owner)).await,
            Err(VocabError::AuthRequired)
        ));
        assert!(matches!(
            store.add(Some(&owner), hello()).await,
            Err(VocabError::AuthRequired)
        ));
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = store();
        let owner = user("noor");

        store.add(Some(&owner), hello()).await.unwrap();
        let id = store.list(Some(&owner)).await[0].id.clone();

        store.remove(Some(&owner), &id).await.unwrap();
        store.remove(Some(&owner), &id).await.unwrap();
        store.remove(Some(&owner), "never-existed").await.unwrap();
        assert!(store.list(Some(&owner)).await.is_empty());

        // ids are not reused after deletion
        store.add(Some(&owner), hello()).await.unwrap();
        assert_ne!(store.list(Some(&owner)).await[0].id, id);
    }

    #[tokio::test]
    async fn test_list_keeps_storage_order() {
        let store = store();
        let owner = user("noor");

        for (arabic, english) in [("شمس", "sun"), ("قمر", "moon"), ("نجمة", "star")] {
            let entry = NewVocabularyEntry {
                arabic: arabic.to_string(),
                english: english.to_string(),
                ..Default::default()
            };
            store.add(Some(&owner), entry).await.unwrap();
        }

        let english: Vec<String> = store
            .list(Some(&owner))
            .await
            .into_iter()
            .map(|entry| entry.english)
            .collect();
        assert_eq!(english, vec!["sun", "moon", "star"]);
    }
}
