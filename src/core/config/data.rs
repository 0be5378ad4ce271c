use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Model sent with every completion request
    pub model: Option<String>,
    /// Base URL of the OpenAI-compatible API (e.g. "https://api.openai.com/v1")
    pub base_url: Option<String>,
    /// Starting palette: "dark" or "light"
    pub theme: Option<String>,
}

/// Keys accepted by `cutie set` / `cutie unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Model,
    BaseUrl,
    Theme,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 3] = [ConfigKey::Model, ConfigKey::BaseUrl, ConfigKey::Theme];

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "model" => Some(ConfigKey::Model),
            "base-url" => Some(ConfigKey::BaseUrl),
            "theme" => Some(ConfigKey::Theme),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Model => "model",
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::Theme => "theme",
        }
    }
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> Option<&str> {
        match key {
            ConfigKey::Model => self.model.as_deref(),
            ConfigKey::BaseUrl => self.base_url.as_deref(),
            ConfigKey::Theme => self.theme.as_deref(),
        }
    }

    /// Set a key after validating its value.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("{} cannot be empty", key.as_str()));
        }
        match key {
            ConfigKey::Model => self.model = Some(value.to_string()),
            ConfigKey::BaseUrl => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(format!("base-url must start with http:// or https://: {value}"));
                }
                self.base_url = Some(value.to_string());
            }
            ConfigKey::Theme => {
                let normalized = value.to_ascii_lowercase();
                if normalized != "dark" && normalized != "light" {
                    return Err(format!("theme must be \"dark\" or \"light\": {value}"));
                }
                self.theme = Some(normalized);
            }
        }
        Ok(())
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::Model => self.model = None,
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::Theme => self.theme = None,
        }
    }

    pub fn model_or_default(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url_or_default(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Whether the view should start with the dark palette.
    pub fn prefers_dark(&self) -> bool {
        !matches!(self.theme.as_deref(), Some(theme) if theme.eq_ignore_ascii_case("light"))
    }
}

pub fn path_display(path: &Path) -> String {
    path.display().to_string()
}
