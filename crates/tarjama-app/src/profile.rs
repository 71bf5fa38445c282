use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tarjama_config::Config;

const DEFAULT_CONFIG_FILE: &str = "config.json";

fn load_config_file(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading config from {}", path.display());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)?;
    Ok(config)
}

/// Explicit path, then `config.json` in the working directory, then the environment
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return load_config_file(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        return load_config_file(default_path);
    }

    tracing::debug!("No config file, reading environment");
    Ok(Config::new())
}
