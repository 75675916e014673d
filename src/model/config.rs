use serde::{Deserialize, Serialize};

/// Configuration from config.toml: where the tracker API lives and the
/// bearer token used against it. Token acquisition happens elsewhere
/// (`pin login` just stores one).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    #[serde(default)]
    pub token: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: "https://localhost:8080".to_string(),
            token: String::new(),
        }
    }
}
