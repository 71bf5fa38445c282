use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::backend::BackendConfig;
use self::store::StoreConfig;
use self::ui::UiConfig;

pub mod auth;
pub mod backend;
pub mod store;
pub mod ui;

pub use store::StoreMode;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub store: StoreConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Build from environment variables, falling back to defaults
    pub fn new() -> Self {
        Config {
            backend: BackendConfig::new(),
            auth: AuthConfig::new(),
            store: StoreConfig::new(),
            ui: UiConfig::default(),
        }
    }
}
