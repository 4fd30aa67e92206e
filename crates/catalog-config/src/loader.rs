//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use catalog_core::{CatalogError, CatalogResult};
use config::{Config, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default prefix for environment variable overrides.
pub const DEFAULT_ENV_PREFIX: &str = "CATALOG";

/// Default variable carrying the listening port.
pub const DEFAULT_PORT_VAR: &str = "PORT";

/// Layered configuration loader.
///
/// Sources are merged in order, later ones winning:
/// 1. `{config_dir}/default.toml`
/// 2. `{config_dir}/{environment}.toml`
/// 3. `{config_dir}/local.toml` (not committed to version control)
/// 4. Environment variables with the `CATALOG_` prefix (`__` separates sections)
/// 5. `PORT`, overriding `server.port`
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: String,
    env_prefix: String,
    port_var: Option<String>,
}

impl ConfigLoader {
    /// Creates a loader reading from `config_dir`.
    ///
    /// The environment name comes from `CATALOG_ENVIRONMENT` and defaults to
    /// `development`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let environment =
            std::env::var("CATALOG_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Self {
            config_dir: config_dir.into(),
            environment,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            port_var: Some(DEFAULT_PORT_VAR.to_string()),
        }
    }

    /// Creates a loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Overrides the environment name used to pick the per-environment file.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Overrides the environment variable prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Sets the variable that overrides `server.port`, or disables it.
    #[must_use]
    pub fn with_port_var(mut self, var: Option<&str>) -> Self {
        self.port_var = var.map(str::to_string);
        self
    }

    /// Loads, merges and validates the configuration.
    pub fn load(&self) -> CatalogResult<AppConfig> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        info!(
            "Loading configuration for environment: {} from {}",
            self.environment,
            self.config_dir.display()
        );

        let mut builder = Config::builder()
            .set_default("app.environment", self.environment.as_str())
            .map_err(config_error_to_catalog_error)?;

        for name in ["default", self.environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{}.toml", name));
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        );

        if let Some(port) = self.port_override()? {
            debug!("Overriding server.port from environment: {}", port);
            builder = builder
                .set_override("server.port", i64::from(port))
                .map_err(config_error_to_catalog_error)?;
        }

        let app_config: AppConfig = builder
            .build()
            .map_err(config_error_to_catalog_error)?
            .try_deserialize()
            .map_err(config_error_to_catalog_error)?;

        Self::validate(&app_config)?;

        Ok(app_config)
    }

    fn port_override(&self) -> CatalogResult<Option<u16>> {
        let Some(var) = &self.port_var else {
            return Ok(None);
        };

        match std::env::var(var) {
            Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<u16>().map(Some).map_err(|e| {
                CatalogError::Configuration(format!("{} must be a port number, got '{}': {}", var, raw, e))
            }),
            _ => Ok(None),
        }
    }

    fn validate(config: &AppConfig) -> CatalogResult<()> {
        if config.app.environment == "production" && config.observability.log_level == "trace" {
            warn!("Trace logging is enabled in production");
        }

        ConfigValidator::validate(config).map_err(|errors| {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            CatalogError::Configuration(message)
        })
    }
}

fn config_error_to_catalog_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WriteFailurePolicy;
    use std::fs;

    fn loader(dir: &Path, prefix: &str) -> ConfigLoader {
        ConfigLoader::new(dir)
            .with_environment("test")
            .with_env_prefix(prefix)
            .with_port_var(None)
    }

    #[test]
    fn test_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = loader(dir.path(), "CATALOG_TEST_EMPTY").load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.key, "Products");
        assert_eq!(config.cache.ttl_secs, 10);
        assert_eq!(config.cache.write_failure_policy, WriteFailurePolicy::Fail);
        assert_eq!(config.redis.operation_timeout_ms, 2000);
        assert_eq!(config.server.shutdown_grace_secs, 30);
        assert_eq!(config.app.environment, "test");
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[cache]\nttl_secs = 30\n\n[server]\nport = 9000\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("test.toml"),
            "[cache]\nwrite_failure_policy = \"ignore\"\n\n[server]\nport = 9100\n",
        )
        .unwrap();

        let config = loader(dir.path(), "CATALOG_TEST_FILES").load().unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.cache.write_failure_policy, WriteFailurePolicy::Ignore);
        assert_eq!(config.cache.key, "Products");
    }

    #[test]
    fn test_environment_variables_override_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[redis]\nenabled = true\n").unwrap();
        std::env::set_var("CATALOG_TEST_ENV_REDIS__ENABLED", "false");

        let config = loader(dir.path(), "CATALOG_TEST_ENV").load().unwrap();

        assert!(!config.redis.enabled);
        std::env::remove_var("CATALOG_TEST_ENV_REDIS__ENABLED");
    }

    #[test]
    fn test_port_variable_overrides_server_port() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("CATALOG_TEST_PORT_VALUE", "3001");

        let config = loader(dir.path(), "CATALOG_TEST_PORT")
            .with_port_var(Some("CATALOG_TEST_PORT_VALUE"))
            .load()
            .unwrap();

        assert_eq!(config.server.port, 3001);
        std::env::remove_var("CATALOG_TEST_PORT_VALUE");
    }

    #[test]
    fn test_invalid_port_variable_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("CATALOG_TEST_BAD_PORT_VALUE", "eighty");

        let result = loader(dir.path(), "CATALOG_TEST_BAD_PORT")
            .with_port_var(Some("CATALOG_TEST_BAD_PORT_VALUE"))
            .load();

        assert!(matches!(result, Err(CatalogError::Configuration(_))));
        std::env::remove_var("CATALOG_TEST_BAD_PORT_VALUE");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nkey = \"\"\n").unwrap();

        let err = loader(dir.path(), "CATALOG_TEST_INVALID").load().unwrap_err();
        assert!(err.to_string().contains("Cache key cannot be empty"));
    }
}
