//! Application settings loaded from config.toml with environment overrides.
//!
//! The TOML file carries the tunable, deploy-time values (delivery fee,
//! suggestion backend, bind address). Secrets and per-host values
//! (`DATABASE_URL`, `ADMIN_TOKEN`, `SUGGESTION_ENDPOINT`) come from the
//! environment and win over the file when both are set.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

/// Settings for the generative-text suggestion backend.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionSettings {
    /// Endpoint of the prompt-completion service. When unset, every
    /// suggestion request resolves to the canned fallback.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout applied to each backend call, in seconds.
    #[serde(default = "default_suggestion_timeout_secs")]
    pub timeout_secs: u64,
    /// Canned suggestion returned when the backend fails or is unset.
    #[serde(default = "default_fallback_suggestion")]
    pub fallback_suggestion: String,
    /// Reason accompanying the canned suggestion.
    #[serde(default = "default_fallback_reason")]
    pub fallback_reason: String,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_suggestion_timeout_secs(),
            fallback_suggestion: default_fallback_suggestion(),
            fallback_reason: default_fallback_reason(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// `SeaORM` connection string for the order store.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Flat delivery fee added on top of the size's base price.
    #[serde(default)]
    pub delivery_fee: f64,
    /// Directory where uploaded reference images are stored.
    #[serde(default = "default_image_dir")]
    pub image_dir: String,
    /// Base URL prefix used to build public image URLs.
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Bearer token gating the admin surface. Admin requests are rejected
    /// outright while this is unset.
    #[serde(default)]
    pub admin_token: Option<String>,
    /// Suggestion backend settings.
    #[serde(default)]
    pub suggestion: SuggestionSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            database_url: default_database_url(),
            delivery_fee: 0.0,
            image_dir: default_image_dir(),
            image_base_url: default_image_base_url(),
            admin_token: None,
            suggestion: SuggestionSettings::default(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_database_url() -> String {
    "sqlite://data/cakeloft.sqlite?mode=rwc".to_string()
}

fn default_image_dir() -> String {
    "data/cake-references".to_string()
}

fn default_image_base_url() -> String {
    "/images".to_string()
}

fn default_suggestion_timeout_secs() -> u64 {
    10
}

fn default_fallback_suggestion() -> String {
    "A classic Chocolate Fudge cake".to_string()
}

fn default_fallback_reason() -> String {
    "It's a crowd-pleaser that fits almost any occasion.".to_string()
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the application configuration from ./config.toml (falling back to
/// built-in defaults when the file is absent), then applies environment
/// overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let mut config = if Path::new("config.toml").exists() {
        load_config("config.toml")?
    } else {
        info!("No config.toml found, using built-in defaults.");
        AppConfig::default()
    };

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }
    if let Ok(addr) = std::env::var("BIND_ADDR") {
        config.bind_addr = addr;
    }
    if let Ok(token) = std::env::var("ADMIN_TOKEN") {
        config.admin_token = Some(token);
    }
    if let Ok(endpoint) = std::env::var("SUGGESTION_ENDPOINT") {
        config.suggestion.endpoint = Some(endpoint);
    }

    if config.admin_token.is_none() {
        warn!("ADMIN_TOKEN not set; the admin surface will reject all requests.");
    }

    Ok(config)
}
