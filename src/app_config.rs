use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language of the source documents (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language to translate into (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Locale written into every merged document
    #[serde(default = "default_merged_locale")]
    pub merged_locale: String,

    /// Terms whose casing survives translation
    #[serde(default = "default_protected_terms")]
    pub protected_terms: Vec<String>,

    /// Extension enforced on output files (without the dot)
    #[serde(default = "default_output_extension")]
    pub output_extension: String,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Source locale handed to the translation provider
pub const DEFAULT_SOURCE_LANGUAGE: &str = "de";

/// Target locale handed to the translation provider
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Locale stamped on merged documents regardless of the inputs
pub const DEFAULT_MERGED_LOCALE: &str = "en-US";

/// Extension of localization documents
pub const LOCALIZATION_EXTENSION: &str = "localization";

/// Organizational acronyms and brand names kept in canonical casing
pub const DEFAULT_PROTECTED_TERMS: &[&str] = &["FE", "TUTCO", "GLT", "MGT", "LLT", "EnBW"];

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: MyMemory public translation API
    #[default]
    MyMemory,
    // @provider: Ollama
    Ollama,
    // @provider: Anthropic
    Anthropic,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::MyMemory => "MyMemory",
            Self::Ollama => "Ollama",
            Self::Anthropic => "Anthropic",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::MyMemory => "mymemory".to_string(),
            Self::Ollama => "ollama".to_string(),
            Self::Anthropic => "anthropic".to_string(),
        }
    }
}

impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mymemory" => Ok(Self::MyMemory),
            "ollama" => Ok(Self::Ollama),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (LLM providers only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Contact email, raises the MyMemory daily quota
    #[serde(default = "String::new")]
    pub email: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: TranslationProvider) -> Self {
        match provider_type {
            TranslationProvider::MyMemory => Self {
                provider_type: "mymemory".to_string(),
                model: String::new(),
                api_key: String::new(),
                endpoint: default_mymemory_endpoint(),
                email: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Ollama => Self {
                provider_type: "ollama".to_string(),
                model: default_ollama_model(),
                api_key: String::new(),
                endpoint: default_ollama_endpoint(),
                email: String::new(),
                timeout_secs: default_timeout_secs(),
            },
            TranslationProvider::Anthropic => Self {
                provider_type: "anthropic".to_string(),
                model: default_anthropic_model(),
                api_key: String::new(),
                endpoint: default_anthropic_endpoint(),
                email: String::new(),
                timeout_secs: default_anthropic_timeout_secs(),
            },
        }
    }
}

/// Translation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Translation provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// Available translation providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Common translation settings
    #[serde(default)]
    pub common: TranslationCommonConfig,
}

/// Common translation settings applicable to all providers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationCommonConfig {
    /// System prompt template for LLM providers
    /// Placeholders: {source_language}, {target_language}
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Temperature parameter for LLM providers (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Whether identical values are translated only once per run
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationCommonConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            temperature: default_temperature(),
            cache_enabled: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

fn default_target_language() -> String {
    DEFAULT_TARGET_LANGUAGE.to_string()
}

fn default_merged_locale() -> String {
    DEFAULT_MERGED_LOCALE.to_string()
}

fn default_protected_terms() -> Vec<String> {
    DEFAULT_PROTECTED_TERMS.iter().map(|t| t.to_string()).collect()
}

fn default_output_extension() -> String {
    LOCALIZATION_EXTENSION.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_anthropic_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.1
}

fn default_true() -> bool {
    true
}

fn default_mymemory_endpoint() -> String {
    "https://api.mymemory.translated.net".to_string()
}

fn default_ollama_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_anthropic_endpoint() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

fn default_anthropic_model() -> String {
    "claude-3-haiku-20240307".to_string()
}

fn default_system_prompt() -> String {
    "You translate user interface labels from {source_language} to {target_language}. Reply with the translation only, without quotes, notes or explanations. Keep acronyms and product names unchanged.".to_string()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let _source_name = crate::language_utils::get_language_name(&self.source_language)?;
        let _target_name = crate::language_utils::get_language_name(&self.target_language)?;

        if self.merged_locale.trim().is_empty() {
            return Err(anyhow!("Merged locale cannot be empty"));
        }

        if self.output_extension.trim().trim_start_matches('.').is_empty() {
            return Err(anyhow!("Output extension cannot be empty"));
        }

        if self.translation.provider == TranslationProvider::Anthropic
            && self.translation.get_api_key().is_empty()
        {
            return Err(anyhow!("Translation API key is required for Anthropic provider"));
        }

        Ok(())
    }

    /// Output extension without a leading dot
    pub fn extension(&self) -> &str {
        self.output_extension.trim().trim_start_matches('.')
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            merged_locale: default_merged_locale(),
            protected_terms: default_protected_terms(),
            output_extension: default_output_extension(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl TranslationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &TranslationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.model.is_empty() {
                return provider_config.model.clone();
            }
        }

        match self.provider {
            TranslationProvider::MyMemory => String::new(),
            TranslationProvider::Ollama => default_ollama_model(),
            TranslationProvider::Anthropic => default_anthropic_model(),
        }
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the contact email for the active provider
    pub fn get_email(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.email.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        if let Some(provider_config) = self.get_active_provider_config() {
            if !provider_config.endpoint.is_empty() {
                return provider_config.endpoint.clone();
            }
        }

        match self.provider {
            TranslationProvider::MyMemory => default_mymemory_endpoint(),
            TranslationProvider::Ollama => default_ollama_endpoint(),
            TranslationProvider::Anthropic => default_anthropic_endpoint(),
        }
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        match self.get_active_provider_config() {
            Some(provider_config) if provider_config.timeout_secs > 0 => provider_config.timeout_secs,
            _ => default_timeout_secs(),
        }
    }

    /// Set the model of the active provider, adding its entry if missing
    pub fn set_model(&mut self, model: &str) {
        let provider_str = self.provider.to_lowercase_string();
        match self.available_providers.iter_mut().find(|p| p.provider_type == provider_str) {
            Some(provider_config) => provider_config.model = model.to_string(),
            None => {
                let mut provider_config = ProviderConfig::new(self.provider.clone());
                provider_config.model = model.to_string();
                self.available_providers.push(provider_config);
            }
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(TranslationProvider::MyMemory),
                ProviderConfig::new(TranslationProvider::Ollama),
                ProviderConfig::new(TranslationProvider::Anthropic),
            ],
            common: TranslationCommonConfig::default(),
        }
    }
}
