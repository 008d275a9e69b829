//! Application configuration
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional JSON config file
//! 3. `.env` file in the working directory
//! 4. Environment variables (`HOST`, `PORT`, `DB_HOST`, `DB_PORT`, `DB_USER`,
//!    `DB_PASS`, `DB_NAME`, `DB_MAX_CONNECTIONS`)
//! 5. Command-line flags
//!
//! Layers 3 and 4 use the same keys. A variable set in the process
//! environment wins over the same key in `.env`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::db::DatabaseConfig;
use crate::http_server::HttpServerConfig;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load from `path` when given, otherwise start from defaults
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Override fields from the process environment, then from `dotenv`
    /// for keys the environment leaves unset
    pub fn apply_process_env(&mut self, dotenv: &HashMap<String, String>) -> CliResult<()> {
        self.apply_env(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()))
    }

    /// Override fields from any key lookup; unset keys leave values alone
    pub fn apply_env<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_var("PORT", &port)?;
        }
        if let Some(host) = lookup("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = lookup("DB_PORT") {
            self.database.port = parse_var("DB_PORT", &port)?;
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.user = user;
        }
        if let Some(password) = lookup("DB_PASS") {
            self.database.password = password;
        }
        if let Some(name) = lookup("DB_NAME") {
            self.database.database = name;
        }
        if let Some(max) = lookup("DB_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("DB_MAX_CONNECTIONS", &max)?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.server.host.is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }
        if self.database.host.is_empty() {
            return Err(CliError::config_error("database.host must not be empty"));
        }
        if self.database.database.is_empty() {
            return Err(CliError::config_error("database.database must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(CliError::config_error("database.max_connections must be > 0"));
        }
        Ok(())
    }

    /// Copy safe to log or print
    pub fn redacted(&self) -> Self {
        Self {
            server: self.server.clone(),
            database: self.database.redacted(),
        }
    }
}

/// Default location of the dotenv file
pub const DOTENV_FILE: &str = ".env";

/// Read `KEY=value` pairs from a dotenv file.
///
/// A missing file yields no pairs. The process environment is not touched.
pub fn read_env_file(path: &Path) -> CliResult<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => {
            return Err(CliError::config_error(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    iter.map(|item| {
        item.map_err(|e| CliError::config_error(format!("Invalid line in {}: {}", path.display(), e)))
    })
    .collect()
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> CliResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::config_error(format!("Invalid value for {}: '{}'", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_file() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.database, "testdb");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"server":{{"port":8088}},"database":{{"host":"db.internal"}}}}"#).unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.user, "root");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert_eq!(err.code(), &super::super::errors::CliErrorCode::ConfigError);
    }

    #[test]
    fn test_invalid_json_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup(&[
                ("PORT", "4000"),
                ("DB_HOST", "mysql"),
                ("DB_PORT", "3307"),
                ("DB_USER", "app"),
                ("DB_PASS", "secret"),
                ("DB_NAME", "crm"),
            ]))
            .unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.database.host, "mysql");
        assert_eq!(config.database.port, 3307);
        assert_eq!(config.database.user, "app");
        assert_eq!(config.database.password, "secret");
        assert_eq!(config.database.database, "crm");
    }

    #[test]
    fn test_env_file_pairs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# local overrides").unwrap();
        writeln!(file, "DB_HOST=db.local").unwrap();
        writeln!(file, "DB_PASS=\"s3cret\"").unwrap();
        writeln!(file, "PORT=4100").unwrap();

        let vars = read_env_file(file.path()).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars["DB_HOST"], "db.local");
        assert_eq!(vars["DB_PASS"], "s3cret");

        let mut config = AppConfig::default();
        config.apply_env(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.server.port, 4100);
        assert_eq!(config.database.host, "db.local");
        assert_eq!(config.database.password, "s3cret");
    }

    #[test]
    fn test_missing_env_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_env_file(&dir.path().join(DOTENV_FILE)).unwrap();
        assert!(vars.is_empty());
    }

    #[test]
    fn test_process_env_wins_over_env_file() {
        let dotenv: HashMap<String, String> = [("DB_NAME", "from_dotenv"), ("DB_USER", "dotenv_user")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut config = AppConfig::default();
        config.apply_process_env(&dotenv).unwrap();

        let expected_name = std::env::var("DB_NAME").unwrap_or_else(|_| "from_dotenv".to_string());
        let expected_user = std::env::var("DB_USER").unwrap_or_else(|_| "dotenv_user".to_string());
        assert_eq!(config.database.database, expected_name);
        assert_eq!(config.database.user, expected_user);
    }

    #[test]
    fn test_unparseable_env_rejected() {
        let mut config = AppConfig::default();
        let err = config.apply_env(lookup(&[("DB_PORT", "mysql")])).unwrap_err();
        assert!(err.message().contains("DB_PORT"));
    }

    #[test]
    fn test_validate_rejects_zero_pool() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(config.validate().is_err());
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_redacted_keeps_server() {
        let mut config = AppConfig::default();
        config.database.password = "secret".to_string();
        let shown = serde_json::to_string(&config.redacted()).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("3000"));
    }
}
