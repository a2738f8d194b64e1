//! Settings of the `ledgerbook` binary.
//!
//! Values come from `settings.toml` (or the file named by `LEDGERBOOK_CONFIG`),
//! overridden by `LEDGERBOOK__`-prefixed environment variables, e.g.
//! `LEDGERBOOK__SERVER__PORT=8080`.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct App {
    /// Log level for the workspace crates.
    pub level: String,
    /// IANA timezone deciding which entries count as "today".
    pub timezone: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            database: Database::Memory,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let path =
            std::env::var("LEDGERBOOK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("LEDGERBOOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn defaults_apply_to_missing_sections() {
        let settings = from_toml("");
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.app.timezone, "UTC");
        assert_eq!(settings.server.port, 3000);
        assert!(matches!(settings.server.database, Database::Memory));
    }

    #[test]
    fn sqlite_database_takes_a_path() {
        let settings = from_toml(
            r#"
            [app]
            timezone = "Asia/Kolkata"

            [server]
            port = 8080
            database = { sqlite = "ledgerbook.db" }
            "#,
        );
        assert_eq!(settings.app.timezone, "Asia/Kolkata");
        assert_eq!(settings.server.port, 8080);
        assert!(matches!(
            settings.server.database,
            Database::Sqlite(ref path) if path == "ledgerbook.db"
        ));
    }
}
