use std::env;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    /// Per-user collection in the remote realtime database
    Remote,
    /// JSON file on this machine
    Local,
    /// Lost on exit
    Memory,
}

impl StoreMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" => Some(StoreMode::Remote),
            "local" => Some(StoreMode::Local),
            "memory" => Some(StoreMode::Memory),
            _ => None,
        }
    }
}

fn default_local_path() -> String {
    "vocabulary.json".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct StoreConfig {
    /// Unset means remote when a database url is configured, local otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<StoreMode>,
    /// Realtime database root, e.g. `https://<project>.firebaseio.com`
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl StoreConfig {
    pub fn new() -> Self {
        let database_url = env::var("DATABASE_URL").unwrap_or_default();

        let mode = env::var("VOCAB_STORE").ok().and_then(|v| StoreMode::parse(&v));

        let local_path = env::var("VOCAB_FILE").unwrap_or_else(|_| default_local_path());

        Self {
            mode,
            database_url,
            local_path,
        }
    }

    /// The configured mode, or the one implied by `database_url`
    pub fn mode(&self) -> StoreMode {
        match self.mode {
            Some(mode) => mode,
            None if self.database_url.trim().is_empty() => StoreMode::Local,
            None => StoreMode::Remote,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: None,
            database_url: String::new(),
            local_path: default_local_path(),
        }
    }
}
