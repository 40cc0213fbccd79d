use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    pub expectations: Expectations,
    pub git: GitConfig,
    pub logging: LoggingConfig,
}

/// The literals the deployment tool writes into a project.
///
/// Every pending change is checked against these; anything else is refused.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Expectations {
    /// Directory the tool writes its run logs to, relative to the project root
    pub log_dir: String,
    /// Distribution name added to dependency manifests
    pub package_name: String,
    /// Entry added to INSTALLED_APPS
    pub installed_app: String,
    pub ignore_file_name: String,
    pub settings_file_name: String,
    pub dependency_manifests: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitConfig {
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub file_name: String,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME").map_err(|_| ConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("deploy-guard"))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Err(ConfigError::ReadError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Config file not found",
            )));
        }

        let contents = fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from file, or the defaults if no file exists
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Ok(path) if path.exists() => Self::load(),
            Ok(_) | Err(ConfigError::DirectoryNotFound) => Ok(Self::default_config()),
            Err(e) => Err(e),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Self {
        Config {
            expectations: Expectations::default(),
            git: GitConfig {
                timeout_seconds: 30,
            },
            logging: LoggingConfig {
                enabled: true,
                file_name: "verification.log".to_string(),
            },
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        let exp = &self.expectations;

        let literals = [
            ("log_dir", &exp.log_dir),
            ("package_name", &exp.package_name),
            ("installed_app", &exp.installed_app),
            ("ignore_file_name", &exp.ignore_file_name),
            ("settings_file_name", &exp.settings_file_name),
            ("logging.file_name", &self.logging.file_name),
        ];
        for (name, value) in literals {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue(format!("{} must not be empty", name)));
            }
        }

        if exp.log_dir.contains('/') || exp.log_dir.contains('\\') {
            return Err(ConfigError::InvalidValue(format!(
                "log_dir must be a single directory name, got: {}",
                exp.log_dir
            )));
        }

        if exp.dependency_manifests.is_empty()
            || exp.dependency_manifests.iter().any(|m| m.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue(
                "dependency_manifests must list at least one file name".to_string(),
            ));
        }

        if self.git.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Default for Expectations {
    fn default() -> Self {
        Expectations {
            log_dir: "dsd_logs".to_string(),
            package_name: "django-simple-deploy".to_string(),
            installed_app: "django_simple_deploy".to_string(),
            ignore_file_name: ".gitignore".to_string(),
            settings_file_name: "settings.py".to_string(),
            dependency_manifests: vec![
                "requirements.txt".to_string(),
                "Pipfile".to_string(),
                "pyproject.toml".to_string(),
            ],
        }
    }
}
