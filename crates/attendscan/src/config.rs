//! Configuration management for attendscan.
//!
//! This module provides configuration loading and validation using figment,
//! supporting a TOML config file, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the platform config dir that holds the config file.
const CONFIG_DIR_NAME: &str = "attendscan";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "ATTENDSCAN_";

/// The registration sheet deployment the scanner app ships against.
pub const DEFAULT_ENDPOINT_URL: &str = "https://script.google.com/macros/s/AKfycbwkwqkSf5LJOe3tjefM9B1j19O4knWgnLUEmS89rWqj9ZPqCiQy7aHzn1LqaLLoV_FvxA/exec";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ATTENDSCAN_`, `__` between levels)
/// 2. TOML config file at `~/.config/attendscan/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lookup endpoint configuration.
    pub endpoint: EndpointConfig,
    /// HTTP client configuration.
    pub http: HttpConfig,
}

/// Where and how lookups are sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Base URL of the lookup service.
    pub url: String,
    /// Value of the `action` query parameter.
    pub action: String,
    /// Name of the query parameter carrying the scanned code.
    pub code_param: String,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT_URL.to_string(),
            action: "getFilteredItems".to_string(),
            code_param: "barcodeno".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_ms: 15_000 }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;

        if self.endpoint.action.trim().is_empty() {
            return Err(Error::config_validation("endpoint.action must not be empty"));
        }

        if self.endpoint.code_param.trim().is_empty() {
            return Err(Error::config_validation(
                "endpoint.code_param must not be empty",
            ));
        }

        if self.http.timeout_ms == 0 {
            return Err(Error::config_validation(
                "http.timeout_ms must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Parse the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL does not parse or is not `http`/`https`.
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint.url).map_err(|err| {
            Error::config_validation(format!(
                "endpoint.url '{}' is not a valid URL: {err}",
                self.endpoint.url
            ))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::config_validation(format!(
                "endpoint.url must use http or https, not '{scheme}'"
            ))),
        }
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.http.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.endpoint.url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.endpoint.action, "getFilteredItems");
        assert_eq!(config.endpoint.code_param, "barcodeno");
        assert_eq!(config.http.timeout_ms, 15_000);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_url() {
        let mut config = Config::default();
        config.endpoint.url = "not a url".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("endpoint.url"));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.endpoint.url = "ftp://example.com/exec".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("http or https"));
    }

    #[test]
    fn test_validate_empty_action() {
        let mut config = Config::default();
        config.endpoint.action = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("endpoint.action"));
    }

    #[test]
    fn test_validate_empty_code_param() {
        let mut config = Config::default();
        config.endpoint.code_param = String::new();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("endpoint.code_param"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_ms = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("timeout_ms"));
    }

    #[test]
    fn test_timeout() {
        let config = Config::default();
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_endpoint_url_parses_default() {
        let url = Config::default().endpoint_url().unwrap();
        assert_eq!(url.host_str(), Some("script.google.com"));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("attendscan"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "attendscan.toml",
                r#"
                [endpoint]
                url = "http://127.0.0.1:8080/exec"

                [http]
                timeout_ms = 2500
                "#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("attendscan.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.endpoint.url, "http://127.0.0.1:8080/exec");
            assert_eq!(config.endpoint.action, "getFilteredItems");
            assert_eq!(config.http.timeout_ms, 2500);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "attendscan.toml",
                r#"
                [endpoint]
                code_param = "code"
                "#,
            )?;
            jail.set_env("ATTENDSCAN_ENDPOINT__CODE_PARAM", "regno");
            jail.set_env("ATTENDSCAN_HTTP__TIMEOUT_MS", "500");

            let config = Config::load_from(Some(PathBuf::from("attendscan.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.endpoint.code_param, "regno");
            assert_eq!(config.http.timeout_ms, 500);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "attendscan.toml",
                r#"
                [http]
                timeout_ms = 0
                "#,
            )?;

            let result = Config::load_from(Some(PathBuf::from("attendscan.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_ignores_broken_default() {
        Jail::expect_with(|jail| {
            let config_home = jail.directory().join("xdg");
            jail.create_dir("xdg/attendscan")?;
            jail.create_file(
                "xdg/attendscan/config.toml",
                r#"
                [http]
                timeout_ms = 0
                "#,
            )?;
            jail.create_file(
                "good.toml",
                r#"
                [http]
                timeout_ms = 2500
                "#,
            )?;
            jail.set_env("XDG_CONFIG_HOME", config_home.display());

            assert!(Config::load_from(None).is_err());
            let config = Config::load_from(Some(PathBuf::from("good.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.http.timeout_ms, 2500);
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("code_param"));
        assert!(json.contains("timeout_ms"));
    }
}
