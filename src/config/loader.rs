//! Configuration loader for bazaar-rs
//!
//! Provides the `ConfigLoader` struct that handles loading configuration
//! from multiple sources with proper precedence.

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "BAZAAR_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "BAZAAR_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "BAZAAR";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, in order of priority:
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `BAZAAR_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// # Errors
    ///
    /// Returns an error if both `BAZAAR_CONFIG_DIR` and `BAZAAR_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::conflicting_sources(
                "BAZAAR_CONFIG_DIR and BAZAAR_CONFIG_FILE cannot both be set. \
                 Use BAZAAR_CONFIG_DIR for layered configuration or \
                 BAZAAR_CONFIG_FILE for a single configuration file.",
            ));
        }

        let environment = AppEnvironment::from_env();

        Ok(Self {
            config_dir,
            config_file,
            environment,
        })
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources
    ///
    /// If `BAZAAR_CONFIG_FILE` is set, loads only that file. Otherwise,
    /// performs layered loading from the configuration directory.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        if let Some(file) = &self.config_file {
            if !file.exists() {
                return Err(ConfigError::file_not_found(file.display().to_string()));
            }
            builder = builder.add_source(File::from(file.clone()).format(FileFormat::Toml));
        } else {
            let default_path = self.config_dir.join("default.toml");
            if !default_path.exists() {
                return Err(ConfigError::file_not_found(
                    default_path.display().to_string(),
                ));
            }
            builder = builder
                .add_source(File::from(default_path).format(FileFormat::Toml))
                .add_source(
                    File::from(
                        self.config_dir
                            .join(format!("{}.toml", self.environment.as_str())),
                    )
                    .format(FileFormat::Toml)
                    .required(false),
                )
                .add_source(
                    File::from(self.config_dir.join("local.toml"))
                        .format(FileFormat::Toml)
                        .required(false),
                );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator(ENV_SEPARATOR)
                .try_parsing(true),
        );

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_single_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[server]
port = 4242

[database]
url = "postgres://localhost/bazaar_test"

[jwt]
secret = "0123456789abcdef0123456789abcdef"
"#
        )
        .unwrap();

        let loader = ConfigLoader {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path),
            environment: AppEnvironment::Test,
        };
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 4242);
        assert_eq!(settings.jwt.access_token_ttl_minutes, 15);
    }

    #[test]
    fn test_missing_file_is_reported() {
        let loader = ConfigLoader {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(PathBuf::from("/nonexistent/settings.toml")),
            environment: AppEnvironment::Test,
        };
        assert!(matches!(
            loader.load(),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_layered_loading_applies_environment_overrides() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[server]
port = 1000

[database]
url = "postgres://localhost/bazaar_test"

[jwt]
secret = "0123456789abcdef0123456789abcdef"
"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("test.toml"),
            "[server]\nport = 2000\n",
        )
        .unwrap();

        let loader = ConfigLoader {
            config_dir: dir.path().to_path_buf(),
            config_file: None,
            environment: AppEnvironment::Test,
        };
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 2000);
    }
}
