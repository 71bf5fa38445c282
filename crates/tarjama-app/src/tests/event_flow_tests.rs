use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tarjama_auth::{AuthError, AuthProvider};
use tarjama_config::Config;
use tarjama_core::build_view_model;
use tarjama_translator::{ChatReply, ChatRequest, TranslateError, Translator};
use tarjama_types::{
    AppEvent, AuthUser, NewVocabularyEntry, TranslationRequest, TranslationViewModel,
    VocabularyEntry,
};
use tarjama_vocab::{MemoryBackend, VocabBackend, VocabError, VocabularyStore};
use tokio::sync::Notify;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::chat::handle_ask;
use crate::events::{event_loop, session_watch};
use crate::state::AppState;

const PAYLOAD: &str = r#"<dialect>## Dialect: Egyptian</dialect>
<ltranslation>
## Line-by-line translation and transliteration:
"انت عمري"
Enta omri
You are my life
</ltranslation>
<wtranslation>
*Word:* "عمري"
*Translation:* my life
*Transliteration:* omri
*Base:* "عمر" (omr) (life)

*Word:* "انت"
*Translation:* you
*Transliteration:* enta
</wtranslation>"#;

struct FakeTranslator {
    gate: Arc<Notify>,
}

#[async_trait::async_trait]
impl Translator for FakeTranslator {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationViewModel, TranslateError> {
        match request {
            TranslationRequest::Lyrics { song_lyrics } if song_lyrics == "offline" => Err(
                TranslateError::InvalidResponse("connection refused".to_string()),
            ),
            _ => Ok(build_view_model(PAYLOAD)),
        }
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, TranslateError> {
        match request.query.as_str() {
            "boom" => Err(TranslateError::ApiError("model overloaded".to_string())),
            "slow" => {
                self.gate.notified().await;
                Ok(ChatReply {
                    response: "late".to_string(),
                    response_id: "r-late".to_string(),
                    error: None,
                })
            }
            query => Ok(ChatReply {
                response: format!("{}: {}", request.word.arabic_text, query),
                response_id: "r1".to_string(),
                error: None,
            }),
        }
    }
}

struct FakeAuth;

#[async_trait::async_trait]
impl AuthProvider for FakeAuth {
    async fn sign_up(&self, _email: &str, _password: &str) -> Result<AuthUser, AuthError> {
        Err(AuthError::Rejected("EMAIL_EXISTS".to_string()))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let (id_token, refresh_token) = match password {
            "secret1" => ("fresh", "r-ok"),
            "expired1" => ("expired", "r-ok"),
            "revoked1" => ("expired", "revoked"),
            _ => return Err(AuthError::Rejected("INVALID_PASSWORD".to_string())),
        };
        Ok(AuthUser {
            uid: "u1".to_string(),
            email: email.to_string(),
            id_token: id_token.to_string(),
            refresh_token: refresh_token.to_string(),
        })
    }

    async fn refresh(&self, user: &AuthUser) -> Result<AuthUser, AuthError> {
        if user.refresh_token == "revoked" {
            return Err(AuthError::Rejected("TOKEN_EXPIRED".to_string()));
        }
        Ok(AuthUser {
            id_token: "fresh".to_string(),
            ..user.clone()
        })
    }
}

/// Memory store that, like the remote one, answers 401 to any stale id token
struct TokenCheckingBackend {
    inner: MemoryBackend,
}

impl TokenCheckingBackend {
    fn check(owner: &AuthUser) -> Result<(), VocabError> {
        if owner.id_token == "fresh" {
            Ok(())
        } else {
            Err(VocabError::AuthRequired)
        }
    }
}

#[async_trait::async_trait]
impl VocabBackend for TokenCheckingBackend {
    async fn read_all(&self, owner: &AuthUser) -> Result<Vec<VocabularyEntry>, VocabError> {
        Self::check(owner)?;
        self.inner.read_all(owner).await
    }

    async fn create(&self, owner: &AuthUser, entry: &NewVocabularyEntry) -> Result<String, VocabError> {
        Self::check(owner)?;
        self.inner.create(owner, entry).await
    }

    async fn delete(&self, owner: &AuthUser, id: &str) -> Result<(), VocabError> {
        Self::check(owner)?;
        self.inner.delete(owner, id).await
    }
}

fn test_state(gate: Arc<Notify>) -> Arc<AppState> {
    Arc::new(AppState::with_parts(
        Config::default(),
        Arc::new(FakeTranslator { gate }),
        Arc::new(FakeAuth),
        VocabularyStore::new(Arc::new(TokenCheckingBackend {
            inner: MemoryBackend::new(),
        })),
    ))
}

struct Harness {
    state: Arc<AppState>,
    gate: Arc<Notify>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
}

impl Harness {
    fn start() -> Self {
        let gate = Arc::new(Notify::new());
        let state = test_state(gate.clone());
        let (ui_to_app_tx, ui_to_app_rx) = kanal::unbounded_async();
        let (app_to_ui_tx, app_to_ui_rx) = kanal::unbounded_async();
        let cancel = CancellationToken::new();

        tokio::spawn(event_loop(
            state.clone(),
            ui_to_app_rx,
            app_to_ui_tx.clone(),
            cancel.clone(),
        ));
        tokio::spawn(session_watch(
            state.session.subscribe(),
            app_to_ui_tx,
            cancel.child_token(),
        ));

        Self {
            state,
            gate,
            ui_to_app_tx,
            app_to_ui_rx,
            cancel,
        }
    }

    async fn send(&self, event: AppEvent) {
        self.ui_to_app_tx.send(event).await.expect("send failed");
    }

    async fn next(&self) -> AppEvent {
        match timeout(Duration::from_secs(2), self.app_to_ui_rx.recv()).await {
            Ok(Ok(event)) => event,
            Ok(Err(e)) => panic!("Channel error: {}", e),
            Err(_) => panic!("Timeout waiting for app event"),
        }
    }

    async fn quiet(&self) -> bool {
        timeout(Duration::from_millis(200), self.app_to_ui_rx.recv())
            .await
            .is_err()
    }

    async fn translate(&self) -> Arc<TranslationViewModel> {
        self.send(AppEvent::Translate(TranslationRequest::lyrics("انت عمري")))
            .await;
        assert!(matches!(self.next().await, AppEvent::Translating));
        match self.next().await {
            AppEvent::ShowTranslation(view) => view,
            other => panic!("Wrong event: {:?}", other),
        }
    }

    async fn sign_in(&self) {
        self.sign_in_with("secret1").await;
    }

    async fn sign_in_with(&self, password: &str) {
        self.send(AppEvent::SignIn {
            email: "layla@example.com".to_string(),
            password: password.to_string(),
        })
        .await;
        match self.next().await {
            AppEvent::SessionChanged(Some(user)) => assert_eq!(user.uid, "u1"),
            other => panic!("Wrong event: {:?}", other),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[tokio::test]
async fn test_translation_is_stored_and_shown() {
    let h = Harness::start();
    let view = h.translate().await;

    assert_eq!(view.dialect, "Egyptian");
    assert_eq!(view.line_entries().count(), 1);
    assert_eq!(view.word_entries.len(), 2);
    assert_eq!(h.state.current_view().await.as_deref(), Some(view.as_ref()));

    h.send(AppEvent::Show).await;
    assert!(matches!(h.next().await, AppEvent::ShowTranslation(_)));
}

#[tokio::test]
async fn test_empty_lyrics_rejected_before_request() {
    let h = Harness::start();
    h.send(AppEvent::Translate(TranslationRequest::lyrics("   ")))
        .await;

    match h.next().await {
        AppEvent::Failure(message) => assert_eq!(message, "Please enter song lyrics"),
        other => panic!("Wrong event: {:?}", other),
    }
    assert!(h.state.current_view().await.is_none());
}

#[tokio::test]
async fn test_translation_failure_keeps_previous_view() {
    let h = Harness::start();
    let first = h.translate().await;

    h.send(AppEvent::Translate(TranslationRequest::lyrics("offline")))
        .await;
    assert!(matches!(h.next().await, AppEvent::Translating));
    match h.next().await {
        AppEvent::Failure(message) => {
            assert!(message.starts_with("Error fetching translation:"));
        }
        other => panic!("Wrong event: {:?}", other),
    }
    assert_eq!(h.state.current_view().await, Some(first));
}

#[tokio::test]
async fn test_saving_requires_sign_in() {
    let h = Harness::start();
    h.translate().await;

    h.send(AppEvent::SaveWord(0)).await;
    assert!(matches!(h.next().await, AppEvent::AuthRequired));

    h.send(AppEvent::ListVocab).await;
    assert!(matches!(h.next().await, AppEvent::AuthRequired));
}

#[tokio::test]
async fn test_save_word_then_duplicate_then_list() {
    let h = Harness::start();
    h.translate().await;
    h.sign_in().await;

    h.send(AppEvent::SaveWord(0)).await;
    match h.next().await {
        AppEvent::VocabAdded { english, created } => {
            assert_eq!(english, "my life");
            assert!(created);
        }
        other => panic!("Wrong event: {:?}", other),
    }

    // same word again
    h.send(AppEvent::SaveWord(0)).await;
    assert!(matches!(
        h.next().await,
        AppEvent::VocabAdded { created: false, .. }
    ));

    h.send(AppEvent::SaveLine(0)).await;
    assert!(matches!(
        h.next().await,
        AppEvent::VocabAdded { created: true, .. }
    ));

    h.send(AppEvent::ListVocab).await;
    let entries = match h.next().await {
        AppEvent::ShowVocab(entries) => entries,
        other => panic!("Wrong event: {:?}", other),
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].arabic, "عمري");
    assert_eq!(entries[1].english, "You are my life");

    h.send(AppEvent::RemoveVocab(entries[0].id.clone())).await;
    assert!(matches!(h.next().await, AppEvent::VocabRemoved(id) if id == entries[0].id));
}

#[tokio::test]
async fn test_expired_token_is_refreshed_and_call_retried() {
    let h = Harness::start();
    h.translate().await;
    h.sign_in_with("expired1").await;

    h.send(AppEvent::SaveWord(0)).await;
    assert!(matches!(
        h.next().await,
        AppEvent::VocabAdded { created: true, .. }
    ));
    assert_eq!(
        h.state.session.current().map(|user| user.id_token),
        Some("fresh".to_string())
    );

    h.send(AppEvent::ListVocab).await;
    assert!(matches!(h.next().await, AppEvent::ShowVocab(entries) if entries.len() == 1));
}

#[tokio::test]
async fn test_refused_refresh_signs_out() {
    let h = Harness::start();
    h.translate().await;
    h.sign_in_with("revoked1").await;

    h.send(AppEvent::ListVocab).await;
    // handler and session watcher report independently
    let events = [h.next().await, h.next().await];
    assert!(events.iter().any(|event| matches!(event, AppEvent::AuthRequired)));
    assert!(events
        .iter()
        .any(|event| matches!(event, AppEvent::SessionChanged(None))));
    assert!(!h.state.session.is_signed_in());

    h.send(AppEvent::WhoAmI).await;
    assert!(matches!(h.next().await, AppEvent::Notice(text) if text == "Not signed in"));
}

#[tokio::test]
async fn test_out_of_range_items() {
    let h = Harness::start();
    h.translate().await;
    h.sign_in().await;

    h.send(AppEvent::SaveWord(7)).await;
    assert!(matches!(h.next().await, AppEvent::Failure(message) if message == "No word 8"));

    h.send(AppEvent::SaveLine(1)).await;
    assert!(matches!(h.next().await, AppEvent::Failure(message) if message == "No line 2"));
}

#[tokio::test]
async fn test_chat_panel_reused_for_same_word() {
    let h = Harness::start();
    h.translate().await;

    h.send(AppEvent::AskWord {
        index: 0,
        query: "what is the root?".to_string(),
    })
    .await;
    let panel = match h.next().await {
        AppEvent::ChatOpened {
            panel,
            word,
            transliteration,
        } => {
            assert_eq!(word, "عمري");
            assert_eq!(transliteration, "omri");
            panel
        }
        other => panic!("Wrong event: {:?}", other),
    };
    match h.next().await {
        AppEvent::ChatReply { panel: id, text } => {
            assert_eq!(id, panel);
            assert_eq!(text, "عمري: what is the root?");
        }
        other => panic!("Wrong event: {:?}", other),
    }

    h.send(AppEvent::AskWord {
        index: 0,
        query: "and the plural?".to_string(),
    })
    .await;
    assert!(matches!(h.next().await, AppEvent::ChatReply { panel: id, .. } if id == panel));

    let chat = h.state.chat.lock().await;
    let session = chat.as_ref().expect("panel open").session.lock().await;
    assert_eq!(session.messages().len(), 4);
    assert_eq!(session.previous_response_id(), Some("r1"));
}

#[tokio::test]
async fn test_other_word_replaces_panel() {
    let h = Harness::start();
    h.translate().await;

    h.send(AppEvent::AskWord {
        index: 0,
        query: String::new(),
    })
    .await;
    let first = match h.next().await {
        AppEvent::ChatOpened { panel, .. } => panel,
        other => panic!("Wrong event: {:?}", other),
    };

    h.send(AppEvent::AskWord {
        index: 1,
        query: String::new(),
    })
    .await;
    match h.next().await {
        AppEvent::ChatOpened { panel, word, .. } => {
            assert_ne!(panel, first);
            assert_eq!(word, "انت");
        }
        other => panic!("Wrong event: {:?}", other),
    }
    assert!(h.quiet().await);
}

#[tokio::test]
async fn test_panel_lock_released_before_announcing() {
    let state = test_state(Arc::new(Notify::new()));
    *state.view.write().await = Some(Arc::new(build_view_model(PAYLOAD)));

    // nobody receives yet, so the announcement blocks
    let (tx, rx) = kanal::bounded_async::<AppEvent>(0);
    let handler = tokio::spawn({
        let state = state.clone();
        async move { handle_ask(state, 0, String::new(), &tx).await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    let panel = timeout(Duration::from_secs(1), state.chat.lock())
        .await
        .expect("chat lock held while announcing the panel")
        .as_ref()
        .map(|panel| panel.id);
    assert!(panel.is_some());

    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(AppEvent::ChatOpened { panel: id, .. })) => assert_eq!(Some(id), panel),
        other => panic!("Expected ChatOpened, got {:?}", other),
    }
    handler.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_chat_failure_reports_apology() {
    let h = Harness::start();
    h.translate().await;

    h.send(AppEvent::AskWord {
        index: 1,
        query: "boom".to_string(),
    })
    .await;
    assert!(matches!(h.next().await, AppEvent::ChatOpened { .. }));
    match h.next().await {
        AppEvent::ChatReply { text, .. } => assert_eq!(
            text,
            "Sorry, there was an error processing your question. Please try again."
        ),
        other => panic!("Wrong event: {:?}", other),
    }
}

#[tokio::test]
async fn test_reply_for_closed_panel_is_dropped() {
    let h = Harness::start();
    h.translate().await;

    h.send(AppEvent::AskWord {
        index: 0,
        query: "slow".to_string(),
    })
    .await;
    assert!(matches!(h.next().await, AppEvent::ChatOpened { .. }));

    h.send(AppEvent::CloseChat).await;
    assert!(matches!(h.next().await, AppEvent::ChatClosed));

    h.gate.notify_one();
    assert!(h.quiet().await);
}

#[tokio::test]
async fn test_new_translation_closes_chat() {
    let h = Harness::start();
    h.translate().await;

    h.send(AppEvent::AskWord {
        index: 0,
        query: String::new(),
    })
    .await;
    assert!(matches!(h.next().await, AppEvent::ChatOpened { .. }));

    h.send(AppEvent::Translate(TranslationRequest::lyrics("انت عمري")))
        .await;
    assert!(matches!(h.next().await, AppEvent::Translating));
    assert!(matches!(h.next().await, AppEvent::ChatClosed));
    assert!(matches!(h.next().await, AppEvent::ShowTranslation(_)));
    assert!(h.state.open_panel_id().await.is_none());
}

#[tokio::test]
async fn test_sign_in_flow() {
    let h = Harness::start();

    h.send(AppEvent::SignIn {
        email: "layla@example.com".to_string(),
        password: "wrong".to_string(),
    })
    .await;
    assert!(matches!(h.next().await, AppEvent::Failure(message) if message == "INVALID_PASSWORD"));

    h.send(AppEvent::SignUp {
        email: "layla@example.com".to_string(),
        password: "secret1".to_string(),
    })
    .await;
    assert!(matches!(h.next().await, AppEvent::Failure(message) if message == "EMAIL_EXISTS"));

    h.sign_in().await;
    h.send(AppEvent::WhoAmI).await;
    assert!(matches!(
        h.next().await,
        AppEvent::Notice(text) if text == "Signed in as layla@example.com"
    ));

    h.send(AppEvent::SignOut).await;
    assert!(matches!(h.next().await, AppEvent::SessionChanged(None)));
    assert!(!h.state.session.is_signed_in());
}

#[tokio::test]
async fn test_quit_cancels_loops() {
    let h = Harness::start();
    h.send(AppEvent::Quit).await;
    timeout(Duration::from_secs(2), h.cancel.cancelled())
        .await
        .expect("Quit did not cancel");
}
