use crate::core::SortKey;
use crate::models::{keys, DomainError, FacetDomains};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub discovery: DiscoverySettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    /// TOML domain tables for the people screen; built-in tables when unset
    pub people_domains: Option<String>,
    /// TOML domain tables for the places screen; built-in tables when unset
    pub places_domains: Option<String>,
    #[serde(default = "default_sort_key")]
    pub default_sort: SortKey,
    #[serde(default = "default_flags")]
    pub flags: Vec<String>,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            people_domains: None,
            places_domains: None,
            default_sort: default_sort_key(),
            flags: default_flags(),
            max_candidates: default_max_candidates(),
        }
    }
}

impl DiscoverySettings {
    /// Resolve the people-screen tables, reading the configured file if any
    pub fn load_people_domains(&self) -> Result<FacetDomains, DomainError> {
        match &self.people_domains {
            Some(path) => FacetDomains::load(path),
            None => Ok(FacetDomains::default()),
        }
    }

    /// Resolve the places-screen tables, reading the configured file if any
    pub fn load_places_domains(&self) -> Result<FacetDomains, DomainError> {
        match &self.places_domains {
            Some(path) => FacetDomains::load(path),
            None => Ok(FacetDomains::places()),
        }
    }
}

fn default_sort_key() -> SortKey { SortKey::Distance }
fn default_flags() -> Vec<String> { vec![keys::IS_ONLINE.to_string(), keys::IS_VERIFIED.to_string()] }
fn default_max_candidates() -> usize { 5000 }

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

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with LUME_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // e.g., LUME__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("LUME")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("discovery.flags")
}
