// ABOUTME: Configuration for logging, filter behaviour and seed variables
// ABOUTME: Loads YAML from a file or default locations and applies DROPLET_* environment overrides

pub mod error;

pub use error::{ConfigError, Result};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_FILE_NAMES: [&str; 4] = ["droplet.yaml", "droplet.yml", ".droplet.yaml", ".droplet.yml"];

pub const ENV_LOG_LEVEL: &str = "DROPLET_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "DROPLET_LOG_FORMAT";
pub const ENV_STRICT_FILTERS: &str = "DROPLET_STRICT_FILTERS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub filters: FilterSettings,

    /// Variables seeded into every evaluation context
    #[serde(default)]
    pub variables: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Reject unknown filter names instead of passing the input through
    pub strict: bool,

    /// strptime patterns tried by the `date` filter before the English ones
    pub locale_date_formats: Vec<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a path or the default locations, then apply
    /// environment overrides. A missing file yields the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.or_else(|| Self::find_config_file(Path::new(".")));

        let mut config = match config_path {
            Some(config_path) if config_path.exists() => {
                debug!("Loading configuration from {:?}", config_path);
                Self::from_file(&config_path)?
            }
            _ => Config::default(),
        };

        config.merge_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Find a configuration file in `dir`, in `CONFIG_FILE_NAMES` order
    pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Merge DROPLET_* environment variables into the configuration
    pub fn merge_env(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any variable source; `lookup` returns `None` for
    /// unset variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format;
        }
        if let Some(strict) = lookup(ENV_STRICT_FILTERS) {
            self.filters.strict = parse_flag(ENV_STRICT_FILTERS, &strict)?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        match self.logging.format.as_str() {
            "pretty" | "compact" => Ok(()),
            other => Err(ConfigError::UnsupportedLogFormat(other.to_string())),
        }
    }
}

fn parse_flag(variable: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnvValue {
            variable: variable.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| pairs.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert!(!config.filters.strict);
        assert!(config.filters.locale_date_formats.is_empty());
        assert!(config.variables.is_empty());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
logging:
  level: debug
filters:
  strict: true
  locale_date_formats:
    - "%d.%m.%Y"
variables:
  title: Hello
  count: 3
  ratio: 0.5
"#;
        let config = Config::from_yaml_str(yaml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.filters.strict);
        assert_eq!(config.filters.locale_date_formats, vec!["%d.%m.%Y"]);
        assert_eq!(config.variables["title"], serde_json::json!("Hello"));
        assert_eq!(config.variables["count"], serde_json::json!(3));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let result = Config::from_yaml_str("logging: [unclosed");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }

    #[test]
    fn test_unsupported_format_is_error() {
        let result = Config::from_yaml_str("logging:\n  format: json\n");
        assert!(matches!(result, Err(ConfigError::UnsupportedLogFormat(f)) if f == "json"));
    }

    #[test]
    fn test_find_config_file_order() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(Config::find_config_file(dir.path()), None);

        std::fs::write(dir.path().join(".droplet.yml"), "").unwrap();
        assert_eq!(
            Config::find_config_file(dir.path()),
            Some(dir.path().join(".droplet.yml"))
        );

        std::fs::write(dir.path().join("droplet.yaml"), "").unwrap();
        assert_eq!(
            Config::find_config_file(dir.path()),
            Some(dir.path().join("droplet.yaml"))
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(overrides(&[
                (ENV_LOG_LEVEL, "trace"),
                (ENV_LOG_FORMAT, "compact"),
                (ENV_STRICT_FILTERS, "Yes"),
            ]))
            .unwrap();
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.logging.format, "compact");
        assert!(config.filters.strict);
    }

    #[test]
    fn test_bad_strict_flag_is_error() {
        let mut config = Config::default();
        let result = config.apply_overrides(overrides(&[(ENV_STRICT_FILTERS, "maybe")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidEnvValue { variable, .. }) if variable == ENV_STRICT_FILTERS
        ));
    }
}
