use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

/// Stores user preferences and the settings handed to boundary clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub assistant: AssistantSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom root for the offline cache. Defaults to a `finza`
    /// folder under the platform data directory.
    pub cache_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            theme: Theme::default(),
            assistant: AssistantSettings::default(),
            last_user: None,
            cache_root: None,
        }
    }
}

impl Config {
    pub fn resolve_cache_root(&self) -> PathBuf {
        if let Some(path) = &self.cache_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("finza").join("cache")
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| Theme::from_str(v.trim()))
            .unwrap_or_else(Theme::default)
    }

    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Theme::from_value(value))
    }
}

/// Connection settings for the text-generation client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "AssistantSettings::default_endpoint")]
    pub endpoint: String,
    #[serde(default = "AssistantSettings::default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "AssistantSettings::default_temperature")]
    pub temperature: f64,
    #[serde(default = "AssistantSettings::default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for AssistantSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: Self::default_endpoint(),
            timeout_secs: Self::default_timeout_secs(),
            temperature: Self::default_temperature(),
            max_tokens: Self::default_max_tokens(),
        }
    }
}

impl AssistantSettings {
    pub fn default_endpoint() -> String {
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
            .into()
    }

    pub fn default_timeout_secs() -> u64 {
        20
    }

    pub fn default_temperature() -> f64 {
        0.7
    }

    pub fn default_max_tokens() -> u32 {
        1024
    }

    /// The configured key, falling back to the `GEMINI_API_KEY` environment
    /// variable. `None` leaves the assistant purely heuristic.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var("GEMINI_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }
}
