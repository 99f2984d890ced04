use crate::{CliError, Result};
use ibmcloud_api::{ClientSettings, API_KEY_ENV, REGION_ENV};
use ibmcloud_core::AmbiguityPolicy;
use ibmcloud_utils::{mask_secret, parse_config_key};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration-specific errors that can occur during config operations
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Config directory creation failed: {0}")]
    DirectoryCreationFailed(String),

    #[error("TOML parsing error: {0}")]
    TomlError(String),
}

/// `[api]` section: credentials, region and endpoint overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ApiSection {
    pub api_key: Option<String>,
    pub iam_url: Option<String>,
    pub region: Option<String>,
    pub version: Option<String>,
    pub generation: Option<String>,
    pub iaas_endpoint: Option<String>,
    pub controller_endpoint: Option<String>,
}

impl ApiSection {
    fn field(&self, key: &str) -> Option<&Option<String>> {
        match key {
            "api_key" => Some(&self.api_key),
            "iam_url" => Some(&self.iam_url),
            "region" => Some(&self.region),
            "version" => Some(&self.version),
            "generation" => Some(&self.generation),
            "iaas_endpoint" => Some(&self.iaas_endpoint),
            "controller_endpoint" => Some(&self.controller_endpoint),
            _ => None,
        }
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "api_key" => Some(&mut self.api_key),
            "iam_url" => Some(&mut self.iam_url),
            "region" => Some(&mut self.region),
            "version" => Some(&mut self.version),
            "generation" => Some(&mut self.generation),
            "iaas_endpoint" => Some(&mut self.iaas_endpoint),
            "controller_endpoint" => Some(&mut self.controller_endpoint),
            _ => None,
        }
    }
}

/// `[resolver]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ResolverSection {
    pub ambiguity: Option<AmbiguityPolicy>,
}

/// Main configuration structure containing all configuration sections
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigData {
    pub api: Option<ApiSection>,
    pub resolver: Option<ResolverSection>,
}

/// Implementation of the API config trait for the main Config struct
impl ibmcloud_api::ApiConfig for Config {
    type Error = CliError;

    fn get_api_key(&self) -> std::result::Result<String, Self::Error> {
        self.api_key()
            .ok_or_else(|| CliError::Config(ConfigError::MissingField("api.api_key".to_string())))
    }

    fn get_settings(&self) -> std::result::Result<ClientSettings, Self::Error> {
        Ok(self.settings())
    }
}

/// Configuration manager that handles loading, saving, and accessing `~/.ibmc/config.toml`
#[derive(Debug, Clone)]
pub struct Config {
    pub config_path: PathBuf,
    pub data: ConfigData,
}

impl Config {
    /// Load the config from its default location, or start empty
    pub fn new() -> Result<Self> {
        let config_dir = get_config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
        }

        Self::load_from(config_dir.join("config.toml"))
    }

    /// Load the config stored at `config_path`; a missing file is an empty config
    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        let data = if config_path.exists() {
            let content = fs::read_to_string(&config_path).map_err(CliError::Io)?;
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?
        } else {
            ConfigData::default()
        };

        Ok(Config { config_path, data })
    }

    /// Save the configuration to file with atomic write
    pub fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.data)
            .map_err(|e| ConfigError::TomlError(e.to_string()))?;

        if let Some(parent) = self.config_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
            }
        }

        // Write to a temporary file first, then rename (atomic operation)
        let temp_path = self.config_path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(CliError::Io)?;
        fs::rename(&temp_path, &self.config_path).map_err(CliError::Io)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Get the API key, checking the environment first
    pub fn api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            return Some(key);
        }

        self.data.api.as_ref().and_then(|api| api.api_key.clone())
    }

    pub fn set_api_key(&mut self, api_key: &str) {
        self.data.api.get_or_insert_with(ApiSection::default).api_key = Some(api_key.to_string());
    }

    /// Get the region, checking the environment first
    pub fn region(&self) -> Option<String> {
        if let Ok(region) = std::env::var(REGION_ENV) {
            return Some(region);
        }

        self.data.api.as_ref().and_then(|api| api.region.clone())
    }

    pub fn set_region(&mut self, region: &str) {
        self.data.api.get_or_insert_with(ApiSection::default).region = Some(region.to_string());
    }

    /// Client settings with configured values layered over the defaults
    pub fn settings(&self) -> ClientSettings {
        let mut settings = ClientSettings::default();

        if let Some(region) = self.region() {
            settings.region = region;
        }

        if let Some(api) = &self.data.api {
            if let Some(version) = &api.version {
                settings.version = version.clone();
            }
            if let Some(generation) = &api.generation {
                settings.generation = generation.clone();
            }
            settings.iam_url = api.iam_url.clone();
            settings.iaas_endpoint = api.iaas_endpoint.clone();
            settings.controller_endpoint = api.controller_endpoint.clone();
        }

        if let Some(ambiguity) = self.data.resolver.as_ref().and_then(|r| r.ambiguity) {
            settings.ambiguity = ambiguity;
        }

        settings
    }

    /// Show all configuration as TOML, with the API key masked
    pub fn show_config(&self) -> String {
        let mut data = self.data.clone();
        if let Some(api_key) = data.api.as_mut().and_then(|api| api.api_key.as_mut()) {
            *api_key = mask_secret(api_key);
        }

        toml::to_string_pretty(&data).unwrap_or_else(|_| "Error formatting config".to_string())
    }

    /// Set a `section.key` value
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = parse_config_key(key)?;

        match section.as_str() {
            "api" => {
                let slot = self
                    .data
                    .api
                    .get_or_insert_with(ApiSection::default)
                    .field_mut(&field)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                *slot = Some(value.to_string());
            }
            "resolver" if field == "ambiguity" => {
                let policy = value
                    .parse::<AmbiguityPolicy>()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: key.to_string(),
                        value: value.to_string(),
                    })?;
                self.data
                    .resolver
                    .get_or_insert_with(ResolverSection::default)
                    .ambiguity = Some(policy);
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }

        Ok(())
    }

    /// Get a `section.key` value as stored in the file
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let (section, field) = parse_config_key(key)?;

        match section.as_str() {
            "api" => {
                let api = self.data.api.clone().unwrap_or_default();
                let value = api
                    .field(&field)
                    .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                Ok(value.clone())
            }
            "resolver" if field == "ambiguity" => Ok(self
                .data
                .resolver
                .as_ref()
                .and_then(|r| r.ambiguity)
                .map(|policy| policy.to_string())),
            _ => Err(ConfigError::UnknownKey(key.to_string()).into()),
        }
    }

    /// Remove a `section.key` value
    pub fn unset_value(&mut self, key: &str) -> Result<()> {
        let (section, field) = parse_config_key(key)?;

        match section.as_str() {
            "api" => {
                if let Some(api) = self.data.api.as_mut() {
                    let slot = api
                        .field_mut(&field)
                        .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
                    *slot = None;
                }
            }
            "resolver" if field == "ambiguity" => {
                if let Some(resolver) = self.data.resolver.as_mut() {
                    resolver.ambiguity = None;
                }
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string()).into()),
        }

        Ok(())
    }
}

/// `~/.ibmc`
fn get_config_dir() -> Result<PathBuf> {
    let home_dir = home::home_dir().ok_or_else(|| {
        ConfigError::DirectoryCreationFailed("Could not find home directory".to_string())
    })?;

    Ok(home_dir.join(".ibmc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config(dir: &tempfile::TempDir) -> Config {
        Config::load_from(dir.path().join("config.toml")).unwrap()
    }

    #[test]
    fn test_set_and_get_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = empty_config(&dir);

        config.set_value("api.iaas_endpoint", "http://localhost:8080").unwrap();
        config.set_value("Resolver.Ambiguity", "treat_as_not_found").unwrap();

        assert_eq!(
            config.get_value("api.iaas_endpoint").unwrap().as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(
            config.get_value("resolver.ambiguity").unwrap().as_deref(),
            Some("treat_as_not_found")
        );
        assert_eq!(config.get_value("api.version").unwrap(), None);

        config.unset_value("api.iaas_endpoint").unwrap();
        assert_eq!(config.get_value("api.iaas_endpoint").unwrap(), None);
    }

    #[test]
    fn test_rejects_unknown_keys_and_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = empty_config(&dir);

        assert!(matches!(
            config.set_value("api.colour", "blue"),
            Err(CliError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(matches!(
            config.set_value("resolver.ambiguity", "sometimes"),
            Err(CliError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert!(matches!(config.get_value("region"), Err(CliError::Utils(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = empty_config(&dir);
        config.set_api_key("abcd1234secret5678");
        config.set_value("api.version", "2024-01-01").unwrap();
        config.save().unwrap();

        assert!(!dir.path().join("config.tmp").exists());

        let reloaded = empty_config(&dir);
        assert_eq!(reloaded.data, config.data);
        assert_eq!(reloaded.settings().version, "2024-01-01");
    }

    #[test]
    fn test_settings_layering() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = empty_config(&dir);
        config.set_value("api.controller_endpoint", "http://rc.local").unwrap();
        config.set_value("resolver.ambiguity", "treat-as-not-found").unwrap();

        let settings = config.settings();
        assert_eq!(settings.generation, "2");
        assert_eq!(settings.controller_endpoint.as_deref(), Some("http://rc.local"));
        assert_eq!(settings.ambiguity, AmbiguityPolicy::TreatAsNotFound);
    }

    #[test]
    fn test_show_config_masks_api_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = empty_config(&dir);
        config.set_api_key("abcd1234secret5678");

        let shown = config.show_config();
        assert!(shown.contains("abcd...5678"));
        assert!(!shown.contains("secret"));
    }
}
