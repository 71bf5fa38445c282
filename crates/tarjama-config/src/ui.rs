use serde::{Deserialize, Serialize};

fn default_show_notes() -> bool {
    true
}

fn default_prompt() -> String {
    "tarjama> ".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct UiConfig {
    /// Print word notes under each gloss
    #[serde(default = "default_show_notes")]
    pub show_notes: bool,
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_notes: default_show_notes(),
            prompt: default_prompt(),
        }
    }
}
