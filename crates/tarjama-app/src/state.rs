use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tarjama_auth::{AuthProvider, IdentityToolkitClient, SessionHandle};
use tarjama_config::Config;
use tarjama_translator::{ChatSession, HttpTranslator, Translator};
use tarjama_types::{TranslationViewModel, WordEntry};
use tarjama_vocab::VocabularyStore;
use tokio::sync::{Mutex, RwLock};

/// An open "ask about this word" conversation
pub struct ChatPanel {
    pub id: u64,
    pub word: WordEntry,
    pub session: Arc<Mutex<ChatSession>>,
}

pub struct AppState {
    pub config: Config,
    pub session: SessionHandle,
    pub translator: Arc<dyn Translator>,
    pub auth: Arc<dyn AuthProvider>,
    pub vocab: VocabularyStore,
    /// Latest translation to resolve; replaced wholesale
    pub view: RwLock<Option<Arc<TranslationViewModel>>>,
    pub chat: Mutex<Option<ChatPanel>>,
    next_panel_id: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = HttpTranslator::new(config.backend.clone())?;
        let auth = IdentityToolkitClient::new(config.auth.clone());
        let vocab = VocabularyStore::from_config(&config.store);

        if !config.auth.enabled() {
            tracing::warn!("AUTH_API_KEY not set, sign-in is disabled");
        }

        Ok(Self::with_parts(
            config,
            Arc::new(translator),
            Arc::new(auth),
            vocab,
        ))
    }

    pub fn with_parts(
        config: Config,
        translator: Arc<dyn Translator>,
        auth: Arc<dyn AuthProvider>,
        vocab: VocabularyStore,
    ) -> Self {
        Self {
            config,
            session: SessionHandle::new(),
            translator,
            auth,
            vocab,
            view: RwLock::new(None),
            chat: Mutex::new(None),
            next_panel_id: AtomicU64::new(1),
        }
    }

    pub async fn current_view(&self) -> Option<Arc<TranslationViewModel>> {
        self.view.read().await.clone()
    }

    pub fn next_panel_id(&self) -> u64 {
        self.next_panel_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Id of the open chat panel, if any
    pub async fn open_panel_id(&self) -> Option<u64> {
        self.chat.lock().await.as_ref().map(|panel| panel.id)
    }
}
