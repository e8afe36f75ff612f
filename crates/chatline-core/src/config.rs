use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
pub const SERVER_URL_ENV: &str = "CHATLINE_SERVER_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub server_url: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the user config directory, or defaults if there is no file
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    /// Pick the responder URL: command line, then environment, then this
    /// config, then the built-in default.
    pub fn resolve_server_url(&self, cli: Option<&str>) -> String {
        let env = std::env::var(SERVER_URL_ENV).ok();
        pick_server_url(cli, env.as_deref(), self.server_url.as_deref())
    }

    /// Log file location, defaulting to the user data directory
    pub fn resolve_log_file(&self, cli: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.log_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;
        Ok(data_dir.join("chatline").join("chatline.log"))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("chatline").join("config.json"))
    }
}

fn pick_server_url(cli: Option<&str>, env: Option<&str>, config: Option<&str>) -> String {
    [cli, env, config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_SERVER_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_full_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            server_url: Some("http://example.test:8080".to_string()),
            log_file: Some(PathBuf::from("/tmp/chatline.log")),
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "server_url": "http://box:9000" }"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://box:9000"));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "server_url = 1").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_server_url_precedence() {
        assert_eq!(pick_server_url(Some("http://cli"), Some("http://env"), Some("http://cfg")), "http://cli");
        assert_eq!(pick_server_url(None, Some("http://env"), Some("http://cfg")), "http://env");
        assert_eq!(pick_server_url(None, Some("  "), Some("http://cfg")), "http://cfg");
        assert_eq!(pick_server_url(None, None, None), DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_log_file_precedence() {
        let config = Config {
            server_url: None,
            log_file: Some(PathBuf::from("/var/log/chatline.log")),
        };
        let cli = PathBuf::from("/tmp/override.log");
        assert_eq!(config.resolve_log_file(Some(cli.as_path())).unwrap(), cli);
        assert_eq!(
            config.resolve_log_file(None).unwrap(),
            PathBuf::from("/var/log/chatline.log")
        );
    }
}
