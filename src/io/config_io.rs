use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Config;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("no config found; run `pin login` first")]
    Missing,
}

/// Default config location: `$PINBOARD_CONFIG`, else
/// `~/.config/pinboard/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PINBOARD_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("pinboard")
        .join("config.toml")
}

/// Read and parse the config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::Missing);
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config: Config = toml::from_str(&text)?;
    Ok(config)
}

/// Serialize the config back to disk, creating parent directories as needed.
/// The bearer token lives here; the file is the local durable store for it.
pub fn write_config(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    let text = toml::to_string_pretty(config)?;
    fs::write(path, text).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            api_url: "https://tracker.example".into(),
            token: "secret".into(),
        };
        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.api_url, "https://tracker.example");
        assert_eq!(loaded.token, "secret");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_config(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Missing)));
    }

    #[test]
    fn test_token_defaults_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://x\"\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.token, "");
    }
}
