//! # Configuration
//!
//! Process configuration read from environment variables. A `.env` file, if
//! present, is loaded into the environment first by [`load_env_file`].
//!
//! Unset and empty variables both fall back to the default.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::http_server::cors::parse_origin;
use crate::http_server::HttpServerConfig;
use crate::trends::SortPolicy;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used
    #[error("invalid {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Load a `.env` file into the process environment.
///
/// `None` searches the current directory and its parents. A missing file is
/// `Ok(false)`; an unreadable or malformed one is an error.
pub fn load_env_file(path: Option<&Path>) -> ConfigResult<bool> {
    let result = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };

    match result {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(ConfigError::Invalid {
            key: ".env",
            message: e.to_string(),
        }),
    }
}

/// Deployment mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppMode {
    /// Connect to the datastore before binding the port
    #[default]
    Local,
    /// Connect on the first request that needs the datastore
    Production,
}

impl FromStr for AppMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" | "development" | "dev" => Ok(AppMode::Local),
            "production" | "prod" => Ok(AppMode::Production),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// Datastore location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub uri: String,
    /// Logical database name
    pub database: String,
    /// Collection holding one document per country
    pub collection: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017/".to_string(),
            database: "trending_keywords".to_string(),
            collection: "keywords".to_string(),
        }
    }
}

/// Mail relay configuration for the contact form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,

    /// Relay account; also used as the From address
    pub smtp_user: Option<String>,

    /// Relay password (app password for Gmail)
    pub smtp_password: Option<String>,

    /// Where contact submissions are delivered
    pub recipient: String,

    /// Shown in the subject line and footer
    pub site_name: String,
}

impl MailConfig {
    /// Whether relay credentials are present
    pub fn has_credentials(&self) -> bool {
        self.smtp_user.is_some() && self.smtp_password.is_some()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_user: None,
            smtp_password: None,
            recipient: "contact@realtimekeyword.app".to_string(),
            site_name: "RealtimeKeyword".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `realtime_keyword=debug,tower_http=info`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

/// Complete process configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mode: AppMode,
    pub http: HttpServerConfig,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    pub logging: LoggingConfig,
    pub sort_policy: SortPolicy,
    /// Static front end served behind the locale routes
    pub public_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: AppMode::default(),
            http: HttpServerConfig::default(),
            database: DatabaseConfig::default(),
            mail: MailConfig::default(),
            logging: LoggingConfig::default(),
            sort_policy: SortPolicy::default(),
            public_dir: PathBuf::from("public"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = AppConfig::default();

        let http = HttpServerConfig {
            host: get("HOST").unwrap_or(defaults.http.host),
            port: parse_or("PORT", get("PORT"), defaults.http.port)?,
            cors_origins: match get("CORS_ORIGINS") {
                Some(raw) => parse_origins(&raw)?,
                None => defaults.http.cors_origins,
            },
        };

        let database = DatabaseConfig {
            uri: get("MONGODB_URI").unwrap_or(defaults.database.uri),
            database: get("MONGODB_DATABASE").unwrap_or(defaults.database.database),
            collection: get("MONGODB_COLLECTION").unwrap_or(defaults.database.collection),
        };

        let mail = MailConfig {
            smtp_host: get("SMTP_HOST").unwrap_or(defaults.mail.smtp_host),
            smtp_port: parse_or("SMTP_PORT", get("SMTP_PORT"), defaults.mail.smtp_port)?,
            smtp_user: get("GMAIL_USER"),
            smtp_password: get("GMAIL_APP_PASSWORD"),
            recipient: get("CONTACT_RECIPIENT").unwrap_or(defaults.mail.recipient),
            site_name: get("SITE_NAME").unwrap_or(defaults.mail.site_name),
        };

        let logging = LoggingConfig {
            level: get("LOG_LEVEL").unwrap_or(defaults.logging.level),
            format: parse_or("LOG_FORMAT", get("LOG_FORMAT"), defaults.logging.format)?,
        };

        Ok(AppConfig {
            mode: parse_or("APP_MODE", get("APP_MODE"), defaults.mode)?,
            http,
            database,
            mail,
            logging,
            sort_policy: parse_or("TRENDS_SORT", get("TRENDS_SORT"), defaults.sort_policy)?,
            public_dir: get("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
        })
    }
}

/// Comma separated origin list; every entry must be a usable origin
fn parse_origins(raw: &str) -> ConfigResult<Vec<String>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            parse_origin(origin)
                .map(|_| origin.to_string())
                .map_err(|message| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    message,
                })
        })
        .collect()
}

fn parse_or<T>(key: &'static str, value: Option<String>, default: T) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        }),
    }
}
