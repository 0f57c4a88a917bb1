//! Settings for the `holiday_tracker` binary.
//!
//! Values come from an optional `settings.toml` next to the binary, then from
//! `HOLIDAY__*` environment variables (`HOLIDAY__SERVER__PORT=9000`). The
//! plain `PORT`, `ADMIN_PIN` and `DATABASE_URL` variables used by hosting
//! platforms are honoured as well. Only sqlite databases can be opened.
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use migration::DatabaseConfig;
use serde::Deserialize;

const DEFAULT_CHILDREN: [&str; 4] = ["Xav", "Emma", "Frankie", "Zoe"];

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_pin")]
    pub admin_pin: String,
    pub static_dir: Option<PathBuf>,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: None,
            port: default_port(),
            admin_pin: default_pin(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub server: Server,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default = "default_children")]
    pub children: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("HOLIDAY")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("children"),
            )
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("server.admin_pin", std::env::var("ADMIN_PIN").ok())?
            .build()?;

        settings.try_deserialize()
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_pin() -> String {
    "1122".to_string()
}

fn default_children() -> Vec<String> {
    DEFAULT_CHILDREN.iter().map(|name| name.to_string()).collect()
}
