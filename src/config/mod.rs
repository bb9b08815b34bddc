use crate::models::UserConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::env;
use std::fs;

/// Environment variable holding the API access key.
///
/// Takes precedence over the key in the config file, so the secret never
/// has to live on disk.
pub const API_KEY_ENV: &str = "NASA_API_KEY";

/// Configuration manager for loading and saving the YAML configuration file.
///
/// Manages one file: `Explorer Config.yaml` (rover, endpoint, sol range,
/// and optionally the API key). The resolved API key itself comes from
/// [`resolve_api_key`](Self::resolve_api_key), which prefers the
/// environment.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    user_config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Explorer Data")
    ///
    /// # Returns
    /// A new ConfigManager instance
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        // Create config directory if it doesn't exist
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            user_config_path: config_dir.join("Explorer Config.yaml"),
            config_dir,
        })
    }

    /// Load the user configuration file.
    ///
    /// # Returns
    /// The loaded UserConfig, or default if the file doesn't exist
    pub fn load_user_config(&self) -> Result<UserConfig> {
        if !self.user_config_path.exists() {
            tracing::warn!(
                "User config file not found at {}, using defaults",
                self.user_config_path
            );
            return Ok(UserConfig::default());
        }

        let file_contents = fs::read_to_string(&self.user_config_path)
            .with_context(|| format!("Failed to read user config: {}", self.user_config_path))?;

        let config: UserConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse user config: {}", self.user_config_path))?;

        tracing::info!("Loaded user config from {}", self.user_config_path);
        Ok(config)
    }

    /// Save the user configuration file.
    ///
    /// # Arguments
    /// * `config` - The UserConfig to save
    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize user config to YAML")?;

        fs::write(&self.user_config_path, yaml_string)
            .with_context(|| format!("Failed to write user config: {}", self.user_config_path))?;

        tracing::info!("Saved user config to {}", self.user_config_path);
        Ok(())
    }

    /// Resolve the API access key: environment first, config file second.
    ///
    /// Returns an empty string when neither is set — the adapter sends it
    /// as-is and the API answers 403 like any other auth failure.
    pub fn resolve_api_key(&self, config: &UserConfig) -> String {
        match env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => {
                tracing::info!("API key resolved from ${}", API_KEY_ENV);
                key
            }
            _ => {
                if config.explorer_settings.api_key.is_empty() {
                    tracing::warn!(
                        "No API key in ${} or config file; requests will be rejected",
                        API_KEY_ENV
                    );
                }
                config.explorer_settings.api_key.clone()
            }
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}
