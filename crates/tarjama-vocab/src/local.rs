use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tarjama_types::{AuthUser, NewVocabularyEntry, VocabularyEntry};
use tokio::sync::Mutex;

use crate::{VocabBackend, VocabError};

/// Owner uid -> entries, as stored on disk
type VocabFile = BTreeMap<String, Vec<VocabularyEntry>>;

/// Vocabulary kept in a JSON file on this machine, for use without a remote store
pub struct LocalFileBackend {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl LocalFileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<VocabFile, VocabError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(data) if data.trim().is_empty() => Ok(VocabFile::new()),
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(VocabFile::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, file: &VocabFile) -> Result<(), VocabError> {
        let data = serde_json::to_string_pretty(file)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl VocabBackend for LocalFileBackend {
    async fn read_all(&self, owner: &AuthUser) -> Result<Vec<VocabularyEntry>, VocabError> {
        let _guard = self.lock.lock().await;
        let mut file = self.load().await?;
        Ok(file.remove(&owner.uid).unwrap_or_default())
    }

    async fn create(&self, owner: &AuthUser, entry: &NewVocabularyEntry) -> Result<String, VocabError> {
        let _guard = self.lock.lock().await;
        let mut file = self.load().await?;

        let id = uuid::Uuid::new_v4().to_string();
        file.entry(owner.uid.clone())
            .or_default()
            .push(entry.clone().with_id(id.clone()));

        self.save(&file).await?;
        Ok(id)
    }

    async fn delete(&self, owner: &AuthUser, id: &str) -> Result<(), VocabError> {
        let _guard = self.lock.lock().await;
        let mut file = self.load().await?;

        let Some(saved) = file.get_mut(&owner.uid) else {
            return Ok(());
        };
        let before = saved.len();
        saved.retain(|entry| entry.id != id);
        if saved.len() == before {
            return Ok(());
        }

        self.save(&file).await
    }
}
