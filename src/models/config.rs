use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Default inclusive sol range queried by the photo source.
pub const DEFAULT_SOL_MIN: u32 = 1000;
pub const DEFAULT_SOL_MAX: u32 = 1499;

/// Default Mars Photos API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.nasa.gov/mars-photos/api/v1";

/// User configuration from Explorer Config.yaml
///
/// Contains the API key (unless supplied via environment), the rover and
/// endpoint to query, and the sol range to draw from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    #[serde(rename = "Explorer_Settings")]
    pub explorer_settings: ExplorerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerSettings {
    /// API access key. The `NASA_API_KEY` environment variable takes
    /// precedence; an empty key is sent as-is and earns an HTTP 403.
    #[serde(rename = "API Key", default)]
    pub api_key: String,

    #[serde(rename = "Rover", default = "default_rover")]
    pub rover: String,

    #[serde(rename = "API Base URL", default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(rename = "Sol Min", default = "default_sol_min")]
    pub sol_min: u32,

    #[serde(rename = "Sol Max", default = "default_sol_max")]
    pub sol_max: u32,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for ExplorerSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            rover: default_rover(),
            api_base_url: default_api_base_url(),
            sol_min: DEFAULT_SOL_MIN,
            sol_max: DEFAULT_SOL_MAX,
            debug_mode: false,
        }
    }
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            explorer_settings: ExplorerSettings::default(),
        }
    }
}

fn default_rover() -> String {
    "curiosity".to_string()
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_sol_min() -> u32 {
    DEFAULT_SOL_MIN
}

fn default_sol_max() -> u32 {
    DEFAULT_SOL_MAX
}

impl ExplorerSettings {
    /// The inclusive sol range to draw from.
    ///
    /// An inverted range in the config file falls back to the documented
    /// default with a warning rather than panicking at draw time.
    pub fn sol_range(&self) -> RangeInclusive<u32> {
        if self.sol_min > self.sol_max {
            tracing::warn!(
                "Sol Min {} > Sol Max {} in config, falling back to {}..={}",
                self.sol_min,
                self.sol_max,
                DEFAULT_SOL_MIN,
                DEFAULT_SOL_MAX
            );
            return DEFAULT_SOL_MIN..=DEFAULT_SOL_MAX;
        }
        self.sol_min..=self.sol_max
    }
}
