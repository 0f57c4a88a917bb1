use clap::Args;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/holiday_cli.toml";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub timezone: String,
    /// Admin PIN. Prompted for when absent.
    pub pin: Option<String>,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timezone: "Europe/London".to_string(),
            pin: None,
            level: "warn".to_string(),
        }
    }
}

/// Flags shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000). A bare host is
    /// reached over https.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Override timezone used to display dates (IANA name).
    #[arg(long, global = true)]
    timezone: Option<String>,
    /// Admin PIN for add, edit and delete.
    #[arg(long, global = true)]
    pin: Option<String>,
}

pub fn load(args: &GlobalArgs) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("HOLIDAY_CLI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &args.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(timezone) = &args.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(pin) = &args.pin {
        settings.pin = Some(pin.clone());
    }
    settings.base_url = resolve_base_url(&settings.base_url);

    Ok(settings)
}

/// Normalise a configured base URL.
///
/// Empty values fall back to the local server, bare hosts get `https://`
/// and the result always ends with `/` so endpoints can be joined to it.
pub fn resolve_base_url(raw: &str) -> String {
    let raw = raw.trim();
    let mut url = if raw.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{raw}")
    };
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}
