use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Persistent CLI defaults. Command-line flags win over anything in here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Player session to address when `--session` is not given.
    #[serde(default)]
    pub session: u32,
    /// Directory holding the player control sockets; `None` means the
    /// built-in default.
    #[serde(default)]
    pub socket_dir: Option<PathBuf>,
}

impl Config {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("amp-remote");
        std::fs::create_dir_all(&path).ok();
        path.push("config.toml");
        path
    }

    /// Loads the config file, silently falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_session() {
        let config = Config::default();
        assert_eq!(config.session, 0);
        assert!(config.socket_dir.is_none());
    }

    #[test]
    fn parses_partial_file() {
        let config: Config = toml::from_str("session = 2").unwrap();
        assert_eq!(config.session, 2);
        assert!(config.socket_dir.is_none());

        let config: Config = toml::from_str("socket_dir = \"/run/amp\"").unwrap();
        assert_eq!(config.session, 0);
        assert_eq!(config.socket_dir, Some(PathBuf::from("/run/amp")));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            session: 3,
            socket_dir: Some(PathBuf::from("/run/amp")),
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }

    #[test]
    fn load_falls_back_when_missing_or_garbled() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert_eq!(Config::load_from(&missing), Config::default());

        let garbled = dir.path().join("bad.toml");
        fs::write(&garbled, "session = \"not a number").unwrap();
        assert_eq!(Config::load_from(&garbled), Config::default());
    }

    #[test]
    fn save_reports_unwritable_destination() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("config.toml");
        assert!(Config::default().save_to(&path).is_err());
    }
}
