//! Storage facade configuration.
//!
//! The defaults reproduce the behaviour of the browser utility the facade stands in for,
//! so an empty configuration document is valid.
//!
//! # Example (YAML)
//! ```yaml
//! check_key: check
//! cookie_path: /app
//! cookie_check_days: 1
//! ```

use tinct_core::error::{Error, ErrorType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key written, read and removed by the support check of the persistent store.
    pub check_key: String,

    /// Value written by the support check.
    pub check_value: String,

    /// `path` attribute of every cookie created by the facade.
    pub cookie_path: String,

    /// Name of the cookie used by the cookie support check.
    pub cookie_check_name: String,

    /// Lifetime in days of the cookie used by the cookie support check.
    pub cookie_check_days: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            check_key: "test".to_owned(),
            check_value: "test local storage".to_owned(),
            cookie_path: "/".to_owned(),
            cookie_check_name: "cookieSupportTest".to_owned(),
            cookie_check_days: 10000,
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_key(mut self, key: &str) -> Self {
        self.check_key = key.to_owned();
        self
    }

    pub fn with_cookie_path(mut self, path: &str) -> Self {
        self.cookie_path = path.to_owned();
        self
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        serde_yaml::from_str(yaml).map_err(|e| {
            Error::new(
                ErrorType::ParseError,
                format!("Failed to parse YAML configuration: {}", e),
            )
        })
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| {
            Error::new(
                ErrorType::ParseError,
                format!("Failed to parse JSON configuration: {}", e),
            )
        })
    }

    /// Load configuration from a TOML string.
    #[cfg(feature = "toml")]
    pub fn from_toml(toml: &str) -> Result<Self, Error> {
        toml::from_str(toml).map_err(|e| {
            Error::new(
                ErrorType::ParseError,
                format!("Failed to parse TOML configuration: {}", e),
            )
        })
    }

    /// Serialize configuration to YAML string.
    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(self).map_err(|e| {
            Error::new(
                ErrorType::General,
                format!("Failed to serialize configuration to YAML: {}", e),
            )
        })
    }

    /// Serialize configuration to JSON string.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Error::new(
                ErrorType::General,
                format!("Failed to serialize configuration to JSON: {}", e),
            )
        })
    }
}
