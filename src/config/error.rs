// ABOUTME: Error types for configuration loading
// ABOUTME: Covers file access, YAML decoding and malformed environment overrides

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid value '{value}' for environment variable {variable}")]
    InvalidEnvValue { variable: String, value: String },

    #[error("Unsupported log format '{0}'. Supported formats: pretty, compact")]
    UnsupportedLogFormat(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
