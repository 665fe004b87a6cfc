//! Backend configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file with a
//! `[backend]` table, then `.env` and the process environment (`FITCOACH_*`).
//! An empty API key counts as no key, which sends every flow down its
//! fallback path.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use zeroize::Zeroizing;

pub const ENV_PROVIDER: &str = "FITCOACH_PROVIDER";
pub const ENV_API_KEY: &str = "FITCOACH_API_KEY";
pub const ENV_MODEL: &str = "FITCOACH_MODEL";
pub const ENV_API_URL: &str = "FITCOACH_API_URL";
pub const ENV_MAX_TOKENS: &str = "FITCOACH_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "FITCOACH_TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "FITCOACH_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    fn invalid(key: &str, value: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

/// Which hosted API the backend speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Google Generative Language `generateContent`.
    #[default]
    Gemini,
    /// Any OpenAI-compatible chat completions endpoint.
    OpenAi,
}

impl Provider {
    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-1.5-flash",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
        }
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "openai-compatible" => Ok(Provider::OpenAi),
            _ => Err(ConfigError::invalid("provider", s)),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => write!(f, "gemini"),
            Provider::OpenAi => write!(f, "openai"),
        }
    }
}

/// Settings for the text-generation backend.
///
/// `model` and `api_url` fall back to the provider defaults when unset, so
/// switching provider does not leave a stale model name behind.
#[derive(Clone)]
pub struct BackendConfig {
    pub provider: Provider,
    pub api_key: Option<Zeroizing<String>>,
    pub model: Option<String>,
    pub api_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            model: None,
            api_url: None,
            max_tokens: 512,
            temperature: 0.7,
            timeout_secs: 30,
        }
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model())
            .field("api_url", &self.api_url())
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    backend: BackendSection,
}

#[derive(Debug, Default, Deserialize)]
struct BackendSection {
    provider: Option<Provider>,
    api_key: Option<String>,
    model: Option<String>,
    api_url: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(key, value))
}

impl BackendConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_url())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn with_provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    /// Sets the API key; an empty key clears it.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = non_empty(Some(key.into())).map(Zeroizing::new);
        self
    }

    /// Defaults overlaid with `.env` and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content)?;
        let section = file.backend;

        let mut config = Self::default();
        if let Some(provider) = section.provider {
            config.provider = provider;
        }
        config.api_key = non_empty(section.api_key).map(Zeroizing::new);
        config.model = non_empty(section.model);
        config.api_url = non_empty(section.api_url);
        if let Some(max_tokens) = section.max_tokens {
            config.max_tokens = max_tokens;
        }
        if let Some(temperature) = section.temperature {
            config.temperature = temperature;
        }
        if let Some(timeout_secs) = section.timeout_secs {
            config.timeout_secs = timeout_secs;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// File values (when a path is given) overridden by environment values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlays every `FITCOACH_*` variable that `lookup` resolves.
    ///
    /// Blank values are ignored, except for the API key where a blank value
    /// clears any key set earlier.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api_key = non_empty(Some(key)).map(Zeroizing::new);
        }

        let get = |key: &str| non_empty(lookup(key));

        if let Some(value) = get(ENV_PROVIDER) {
            self.provider = value.parse()?;
        }
        if let Some(value) = get(ENV_MODEL) {
            self.model = Some(value);
        }
        if let Some(value) = get(ENV_API_URL) {
            self.api_url = Some(value);
        }
        if let Some(value) = get(ENV_MAX_TOKENS) {
            self.max_tokens = parse_var(ENV_MAX_TOKENS, &value)?;
        }
        if let Some(value) = get(ENV_TEMPERATURE) {
            self.temperature = parse_var(ENV_TEMPERATURE, &value)?;
        }
        if let Some(value) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_var(ENV_TIMEOUT_SECS, &value)?;
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid(
                "temperature",
                self.temperature.to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid("max_tokens", "0"));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("timeout_secs", "0"));
        }
        Ok(())
    }
}
