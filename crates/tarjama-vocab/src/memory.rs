use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tarjama_types::{AuthUser, NewVocabularyEntry, VocabularyEntry};
use tokio::sync::Mutex;

use crate::{VocabBackend, VocabError};

/// Keeps entries for the lifetime of the process
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<VocabularyEntry>>>,
    next_id: AtomicU64,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VocabBackend for MemoryBackend {
    async fn read_all(&self, owner: &AuthUser) -> Result<Vec<VocabularyEntry>, VocabError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(&owner.uid).cloned().unwrap_or_default())
    }

    async fn create(&self, owner: &AuthUser, entry: &NewVocabularyEntry) -> Result<String, VocabError> {
        let id = (self.next_id.fetch_add(1, Ordering::Relaxed) + 1).to_string();
        let mut entries = self.entries.lock().await;
        entries
            .entry(owner.uid.clone())
            .or_default()
            .push(entry.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn delete(&self, owner: &AuthUser, id: &str) -> Result<(), VocabError> {
        let mut entries = self.entries.lock().await;
        if let Some(saved) = entries.get_mut(&owner.uid) {
            saved.retain(|entry| entry.id != id);
        }
        Ok(())
    }
}
