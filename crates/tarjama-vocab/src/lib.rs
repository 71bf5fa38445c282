mod local;
mod memory;
mod remote;
mod store;

pub use local::LocalFileBackend;
pub use memory::MemoryBackend;
pub use remote::RealtimeDbBackend;
pub use store::VocabularyStore;

use tarjama_types::{AuthUser, NewVocabularyEntry, VocabularyEntry};

/// A per-user keyed collection: read everything, create with a generated id, delete by id
#[async_trait::async_trait]
pub trait VocabBackend: Send + Sync {
    /// Entries in storage order
    async fn read_all(&self, owner: &AuthUser) -> Result<Vec<VocabularyEntry>, VocabError>;

    /// Stores the entry and returns the id the backend assigned
    async fn create(&self, owner: &AuthUser, entry: &NewVocabularyEntry) -> Result<String, VocabError>;

    /// Deleting an id that does not exist succeeds
    async fn delete(&self, owner: &AuthUser, id: &str) -> Result<(), VocabError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("Sign in to save words")]
    AuthRequired,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Store error: HTTP {status} {body}")]
    Remote {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
