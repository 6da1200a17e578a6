use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Main AI configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Provider used for analysis when none is requested explicitly
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Wall-clock ceiling for one analysis request, in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-2.0-flash", "gpt-4o-mini");
    /// empty means the provider's default model
    #[serde(default)]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate; unset leaves the backend's own limit
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Enabled provider config with default sampling settings
    pub fn with_model(model: impl Into<String>) -> Self {
        ProviderConfig {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: None,
            api_key: None,
            base_url: None,
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            default_provider: default_provider(),
            providers: default_providers(),
            timeout: default_timeout(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    HashMap::from([(
        "google".to_string(),
        ProviderConfig::with_model(default_google_model()),
    )])
}

pub(crate) fn default_google_model() -> &'static str {
    "gemini-2.0-flash"
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_timeout() -> u64 {
    60
}

impl AiConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_NUTRITION__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_NUTRITION__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Request ceiling as a `Duration`
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`AiConfig::load`] for the source priority.
pub fn load_config() -> Result<AiConfig, ConfigError> {
    // Seed defaults so a partial override (e.g. only an API key from the
    // environment) merges into the default provider instead of replacing it
    let settings = Config::builder()
        .set_default("default_provider", default_provider())?
        .set_default("providers.google.model", default_google_model())?
        .set_default("timeout", default_timeout() as i64)?
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_NUTRITION__PROVIDERS__GOOGLE__API_KEY
        .add_source(
            Environment::with_prefix("RECIPE_NUTRITION")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
