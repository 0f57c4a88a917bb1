//! Where expenses are persisted, shared by the server binary and the
//! migrator so both open the same file.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Plain connection string used by hosting platforms. Wins over settings.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// `database = "memory"` or `database = { sqlite = "holiday_tracker.db" }`.
/// A full connection string goes through `url`.
///
/// Only the sqlite driver is compiled in: any other scheme is rejected by
/// [`DatabaseConfig::connection_url`].
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseConfig {
    Memory,
    Sqlite(String),
    Url(String),
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig::Sqlite("holiday_tracker.db".to_string())
    }
}

impl DatabaseConfig {
    /// Read the `database` entry from `settings.toml` and `HOLIDAY__DATABASE__*`.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("HOLIDAY").separator("__"))
            .build()?;

        match settings.get::<DatabaseConfig>("database") {
            Err(ConfigError::NotFound(_)) => Ok(DatabaseConfig::default()),
            other => other,
        }
    }

    /// Connection string for sea-orm. `DATABASE_URL` wins when set.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        let url = std::env::var(DATABASE_URL_VAR).unwrap_or_else(|_| self.configured_url());
        sqlite_only(url)
    }

    pub fn configured_url(&self) -> String {
        match self {
            DatabaseConfig::Memory => String::from("sqlite::memory:"),
            DatabaseConfig::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
            DatabaseConfig::Url(url) => url.clone(),
        }
    }
}

/// Reject URLs for drivers this build cannot open. Credentials in the URL
/// are never echoed back.
pub fn sqlite_only(url: String) -> Result<String, ConfigError> {
    if url.starts_with("sqlite:") {
        return Ok(url);
    }
    let scheme = url.split(':').next().unwrap_or_default();
    Err(ConfigError::Message(format!(
        "only sqlite databases are supported, got a \"{scheme}\" URL"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_urls() {
        assert_eq!(
            DatabaseConfig::default().configured_url(),
            "sqlite:holiday_tracker.db?mode=rwc"
        );
        assert_eq!(DatabaseConfig::Memory.configured_url(), "sqlite::memory:");
        assert_eq!(
            DatabaseConfig::Url("sqlite:/data/h.db?mode=ro".to_string()).configured_url(),
            "sqlite:/data/h.db?mode=ro"
        );
    }

    #[test]
    fn non_sqlite_urls_are_rejected() {
        assert_eq!(
            sqlite_only("sqlite::memory:".to_string()).unwrap(),
            "sqlite::memory:"
        );

        let err = sqlite_only("postgres://admin:hunter2@db/holiday".to_string()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("only sqlite databases are supported"), "{message}");
        assert!(message.contains("postgres"), "{message}");
        assert!(!message.contains("hunter2"), "{message}");

        assert!(sqlite_only("holiday_tracker.db".to_string()).is_err());
    }
}
