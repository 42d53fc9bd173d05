//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use journal_infra::DatabaseConfig;

/// Default upload size cap: 10 MiB.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Configuration errors - fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not defined in environment variables")]
    Missing(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub uploads_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database = DatabaseConfig {
            url,
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            min_connections: lookup("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            uploads_dir: lookup("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public/uploads")),
            max_upload_bytes: lookup("MAX_UPLOAD_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_missing_database_url_is_fatal() {
        let err = load(&[("PORT", "3000")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
        assert_eq!(
            err.to_string(),
            "DATABASE_URL is not defined in environment variables"
        );

        assert!(load(&[("DATABASE_URL", "  ")]).is_err());
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/journal")]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.url, "postgres://localhost/journal");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.uploads_dir, PathBuf::from("public/uploads"));
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/journal"),
            ("HOST", "0.0.0.0"),
            ("PORT", "not-a-port"),
            ("UPLOADS_DIR", "/srv/uploads"),
            ("DB_MAX_CONNECTIONS", "25"),
        ])
        .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.uploads_dir, PathBuf::from("/srv/uploads"));
        assert_eq!(config.database.max_connections, 25);
    }
}
