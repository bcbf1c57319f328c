use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub store: StoreSettings,
    #[serde(default)]
    #[validate(nested)]
    pub gemini: GeminiSettings,
    #[serde(default)]
    #[validate(nested)]
    pub dispatch: DispatchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

/// WooCommerce store the product search runs against
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StoreSettings {
    #[serde(default = "default_store_url")]
    #[validate(url)]
    pub url: String,
    #[serde(default)]
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: default_store_url(),
            consumer_key: String::new(),
            consumer_secret: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_store_url() -> String { "http://localhost:8080".to_string() }
fn default_timeout_secs() -> u64 { 30 }

/// Gemini generateContent API
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GeminiSettings {
    #[serde(default = "default_gemini_base_url")]
    #[validate(url)]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_gemini_model")]
    #[validate(length(min = 1))]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            api_key: String::new(),
            model: default_gemini_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_gemini_base_url() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_gemini_model() -> String { "gemini-pro".to_string() }

/// Knobs of the dispatch policy
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DispatchSettings {
    /// Messages containing any of these (case-insensitive) go to product search
    #[serde(default = "default_product_keywords")]
    #[validate(length(min = 1))]
    pub product_keywords: Vec<String>,
    #[serde(default = "default_search_limit")]
    #[validate(range(min = 1, max = 100))]
    pub search_limit: usize,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            product_keywords: default_product_keywords(),
            search_limit: default_search_limit(),
        }
    }
}

fn default_product_keywords() -> Vec<String> {
    ["شنطة", "تيشيرت", "bag", "t-shirt"]
        .iter()
        .map(|k| k.to_string())
        .collect()
}
fn default_search_limit() -> usize { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Variables used by the original deployment, mapped onto config keys
const DEPLOYMENT_ENV_KEYS: &[(&str, &str)] = &[
    ("GEMINI_API_KEY", "gemini.api_key"),
    ("WC_STORE_URL", "store.url"),
    ("WC_CONSUMER_KEY", "store.consumer_key"),
    ("WC_CONSUMER_SECRET", "store.consumer_secret"),
    ("PORT", "server.port"),
];

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SILA__)
    /// 5. Deployment variables (GEMINI_API_KEY, WC_STORE_URL, ...)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SILA__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        Self::finish(apply_deployment_env(settings)?)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(apply_deployment_env(settings)?)
    }

    /// Parse settings from TOML text alone, without consulting the environment
    pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(settings)
    }

    fn finish(settings: Config) -> Result<Self, SettingsError> {
        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SILA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("dispatch.product_keywords")
}

fn apply_deployment_env(settings: Config) -> Result<Config, ConfigError> {
    let mut builder = Config::builder().add_source(settings);

    for (var, key) in DEPLOYMENT_ENV_KEYS {
        if let Ok(value) = std::env::var(var) {
            if !value.is_empty() {
                builder = builder.set_override(*key, value)?;
            }
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.dispatch.search_limit, 5);
        assert!(settings.dispatch.product_keywords.iter().any(|k| k == "t-shirt"));
        assert_eq!(settings.gemini.model, "gemini-pro");
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_toml_overrides() {
        let settings = Settings::from_toml_str(
            r#"
            [store]
            url = "https://shop.example.com"
            consumer_key = "ck"
            consumer_secret = "cs"

            [dispatch]
            product_keywords = ["dress"]
            search_limit = 3
            "#,
        )
        .unwrap();
        assert_eq!(settings.store.url, "https://shop.example.com");
        assert_eq!(settings.dispatch.product_keywords, vec!["dress"]);
        assert_eq!(settings.dispatch.search_limit, 3);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let err = Settings::from_toml_str("[dispatch]\nsearch_limit = 0\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_toml_str("[store]\nurl = \"not a url\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));

        let err = Settings::from_toml_str("[dispatch]\nproduct_keywords = []\n").unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
    }

    #[test]
    fn test_environment_layers() {
        let path = std::env::temp_dir().join(format!("sila-settings-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[server]\nport = 4000\n\n[store]\nurl = \"https://file.example.com\"\nconsumer_key = \"from_file\"\n",
        )
        .unwrap();

        let vars = [
            ("SILA__SERVER__HOST", "127.0.0.1"),
            ("SILA__DISPATCH__PRODUCT_KEYWORDS", "dress,skirt"),
            ("PORT", "8081"),
            ("GEMINI_API_KEY", "gk-env"),
            ("WC_CONSUMER_KEY", "12345"),
            ("WC_CONSUMER_SECRET", "cs-env"),
            // Empty deployment variables leave the lower layers alone
            ("WC_STORE_URL", ""),
        ];
        for (var, value) in vars {
            std::env::set_var(var, value);
        }

        let result = Settings::load_from(&path);

        for (var, _) in vars {
            std::env::remove_var(var);
        }
        std::fs::remove_file(&path).ok();

        let settings = result.unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8081);
        assert_eq!(settings.dispatch.product_keywords, vec!["dress", "skirt"]);
        assert_eq!(settings.gemini.api_key, "gk-env");
        assert_eq!(settings.store.consumer_key, "12345");
        assert_eq!(settings.store.consumer_secret, "cs-env");
        assert_eq!(settings.store.url, "https://file.example.com");
    }
}
