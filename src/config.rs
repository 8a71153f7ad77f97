use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::gateway::client;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Default topic hint for generation; empty means the built-in topic.
    #[serde(default = "default_topic")]
    pub topic: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_theme() -> String {
    "github-dark".to_string()
}
fn default_model() -> String {
    client::DEFAULT_MODEL.to_string()
}
fn default_api_base() -> String {
    client::DEFAULT_API_BASE.to_string()
}
fn default_topic() -> String {
    String::new()
}
fn default_locale() -> String {
    "ko".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            model: default_model(),
            api_base: default_api_base(),
            topic: default_topic(),
            locale: default_locale(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("deepclone")
            .join("config.toml")
    }

    /// The topic hint actually passed to the prompt builder.
    pub fn topic_hint(&self) -> Option<&str> {
        let topic = self.topic.trim();
        if topic.is_empty() { None } else { Some(topic) }
    }

    /// Reset unknown locales to the default. Call after deserialization to
    /// handle stale values from old config files.
    pub fn normalize_locale(&mut self, available: &[&str]) {
        if !available.contains(&self.locale.as_str()) {
            self.locale = default_locale();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "github-dark");
        assert_eq!(config.model, client::DEFAULT_MODEL);
        assert_eq!(config.locale, "ko");
        assert!(config.topic.is_empty());
    }

    #[test]
    fn test_config_serde_partial_file_keeps_defaults() {
        let toml_str = r#"
theme = "catppuccin-mocha"
topic = "Transformers"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.topic, "Transformers");
        assert_eq!(config.model, client::DEFAULT_MODEL);
        assert_eq!(config.api_base, client::DEFAULT_API_BASE);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.model, deserialized.model);
        assert_eq!(config.api_base, deserialized.api_base);
        assert_eq!(config.locale, deserialized.locale);
    }

    #[test]
    fn test_topic_hint_blank_is_none() {
        let mut config = Config::default();
        assert_eq!(config.topic_hint(), None);
        config.topic = "  ".to_string();
        assert_eq!(config.topic_hint(), None);
        config.topic = "MNIST".to_string();
        assert_eq!(config.topic_hint(), Some("MNIST"));
    }

    #[test]
    fn test_normalize_locale_resets_unknown() {
        let mut config = Config::default();
        config.locale = "fr".to_string();
        config.normalize_locale(&["ko", "en"]);
        assert_eq!(config.locale, "ko");
    }
}
