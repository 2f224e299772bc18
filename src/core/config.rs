use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Path probed when no `--config` flag is given
pub const DEFAULT_CONFIG_PATH: &str = "customer-console.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub form: FormPolicy,
    #[serde(default)]
    pub recovery: RecoveryConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the customers collection, e.g. `/customers` or `/api/customers`
    #[serde(default = "default_resource_path")]
    pub resource_path: String,
}

/// How the form turns its fields into requests
#[derive(Debug, Clone, Deserialize)]
pub struct FormPolicy {
    /// Missing required fields block create/update locally
    #[serde(default = "default_true")]
    pub require_fields: bool,
    /// `active` may be left unspecified on create/update
    #[serde(default = "default_true")]
    pub allow_unspecified_active: bool,
    /// Label of the status area that receives flash messages
    #[serde(default = "default_flash_target")]
    pub flash_target: String,
    #[serde(default)]
    pub payload: PayloadMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadMode {
    /// Empty fields are left out of the body
    #[default]
    Sparse,
    /// Empty fields are sent as empty strings
    Full,
}

/// What happens to the form when an action fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recovery {
    Clear,
    Preserve,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default = "default_preserve")]
    pub create: Recovery,
    #[serde(default = "default_clear")]
    pub retrieve: Recovery,
    #[serde(default = "default_preserve")]
    pub update: Recovery,
    #[serde(default = "default_preserve")]
    pub delete: Recovery,
    #[serde(default = "default_preserve")]
    pub activate: Recovery,
    #[serde(default = "default_preserve")]
    pub deactivate: Recovery,
    #[serde(default = "default_preserve")]
    pub search: Recovery,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_resource_path() -> String {
    "/customers".to_string()
}

fn default_true() -> bool {
    true
}

fn default_flash_target() -> String {
    "flash_message".to_string()
}

fn default_clear() -> Recovery {
    Recovery::Clear
}

fn default_preserve() -> Recovery {
    Recovery::Preserve
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_console() -> bool {
    false
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            resource_path: default_resource_path(),
        }
    }
}

impl Default for FormPolicy {
    fn default() -> Self {
        Self {
            require_fields: true,
            allow_unspecified_active: true,
            flash_target: default_flash_target(),
            payload: PayloadMode::default(),
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            create: Recovery::Preserve,
            retrieve: Recovery::Clear,
            update: Recovery::Preserve,
            delete: Recovery::Preserve,
            activate: Recovery::Preserve,
            deactivate: Recovery::Preserve,
            search: Recovery::Preserve,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Load the explicit path if given, otherwise the default path when it
    /// exists, otherwise built-in defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate backend config
        let base_url = &self.backend.base_url;
        if base_url.is_empty() {
            bail!("base_url must not be empty");
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            bail!("base_url '{}' must start with http:// or https://", base_url);
        }

        if !self.backend.resource_path.starts_with('/') {
            bail!(
                "resource_path '{}' must start with '/'",
                self.backend.resource_path
            );
        }

        // Validate form policy
        if self.form.flash_target.trim().is_empty() {
            bail!("flash_target must not be empty");
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.backend.resource_path, "/customers");
        assert!(config.form.require_fields);
        assert!(config.form.allow_unspecified_active);
        assert_eq!(config.form.payload, PayloadMode::Sparse);
        assert_eq!(config.recovery.retrieve, Recovery::Clear);
        assert_eq!(config.recovery.update, Recovery::Preserve);
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
[backend]
base_url = "http://customers.internal:5000"
resource_path = "/api/customers"

[form]
require_fields = false
payload = "full"

[recovery]
search = "clear"
"#,
        );

        let config = Config::from_file(file.path()).expect("Failed to load config");

        assert_eq!(config.backend.base_url, "http://customers.internal:5000");
        assert_eq!(config.backend.resource_path, "/api/customers");
        assert!(!config.form.require_fields);
        assert!(config.form.allow_unspecified_active);
        assert_eq!(config.form.flash_target, "flash_message");
        assert_eq!(config.form.payload, PayloadMode::Full);
        assert_eq!(config.recovery.search, Recovery::Clear);
        assert_eq!(config.recovery.retrieve, Recovery::Clear);
        assert_eq!(config.recovery.create, Recovery::Preserve);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let path = Path::new("customer-console.example.toml");
        let config = Config::from_file(path).expect("Failed to load example config");
        let defaults = Config::default();

        assert_eq!(config.backend.base_url, defaults.backend.base_url);
        assert_eq!(config.form.require_fields, defaults.form.require_fields);
        assert_eq!(config.form.payload, defaults.form.payload);
        assert_eq!(config.recovery.retrieve, defaults.recovery.retrieve);
        assert_eq!(config.recovery.delete, defaults.recovery.delete);
        assert_eq!(config.logging.format, defaults.logging.format);
    }

    #[test]
    fn test_invalid_log_level() {
        let file = write_config("[logging]\nlevel = \"loud\"\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        let file = write_config("[backend]\nbase_url = \"localhost:8080\"\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_invalid_resource_path() {
        let mut config = Config::default();
        config.backend.resource_path = "customers".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_recovery_value() {
        let file = write_config("[recovery]\nretrieve = \"sometimes\"\n");
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/customer-console.toml")));
        assert!(result.is_err());
    }
}
