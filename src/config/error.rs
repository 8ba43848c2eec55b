//! Errors raised while loading and validating configuration.

use thiserror::Error;

/// Error produced by the configuration loader and the settings validators.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file is missing on disk
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// A configuration source could not be deserialized into `Settings`
    #[error("could not parse configuration: {0}")]
    ParseError(String),

    /// A settings key holds a value that fails validation
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Dotted path of the offending key, e.g. `jwt.secret`
        key: String,
        /// What the validator rejected about it
        reason: String,
    },

    /// The process environment selects an unusable configuration
    #[error("environment error: {0}")]
    Environment(String),

    /// Two configuration sources were given that cannot be combined
    #[error("conflicting configuration sources: {0}")]
    ConflictingSources(String),

    /// Error bubbled up from the underlying `config` crate
    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    /// A validation failure for the given settings key.
    pub fn validation(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// A missing configuration file, by path.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    /// Two sources that cannot both be in effect.
    pub fn conflicting_sources(message: impl Into<String>) -> Self {
        ConfigError::ConflictingSources(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_the_key() {
        let err = ConfigError::validation("jwt.secret", "too short");
        assert_eq!(err.to_string(), "invalid value for jwt.secret: too short");
    }

    #[test]
    fn test_file_not_found_carries_path() {
        let err = ConfigError::file_not_found("config/default.toml");
        assert!(matches!(err, ConfigError::FileNotFound(ref p) if p == "config/default.toml"));
    }
}
