use std::{env, time::Duration};

use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use ksm_notification::{EmailConfig, RetryPolicy};
use serde::Deserialize;
use validator::ValidateEmail;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RelayConfig {
    /// Studio inbox every inquiry is delivered to
    #[serde(default = "default_inbox_address")]
    pub inbox_address: String,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    #[serde(default)]
    pub dead_letter_path: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            inbox_address: default_inbox_address(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            dead_letter_path: None,
        }
    }
}

impl RelayConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            ..RetryPolicy::default()
        }
    }
}

fn default_inbox_address() -> String {
    "mshalibhadra@gmail.com".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    8000
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy EMAIL_USER / EMAIL_PASS variables
    /// 2. Environment variables (KSM__EMAIL__SMTP_HOST, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("KSM")
                .separator("__")
                .try_parsing(true),
        );

        // Variables the site has always been deployed with
        if let Ok(user) = env::var("EMAIL_USER") {
            builder = builder
                .set_override("email.smtp_username", user.clone())?
                .set_override("email.from_address", user)?;
        }
        if let Ok(pass) = env::var("EMAIL_PASS") {
            builder = builder.set_override("email.smtp_password", pass)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.relay.max_attempts < 1 {
            return Err("Relay max_attempts must be at least 1".to_string());
        }
        if self.relay.initial_backoff_ms > self.relay.max_backoff_ms {
            return Err("Relay initial_backoff_ms must not exceed max_backoff_ms".to_string());
        }

        let inbox = self.relay.inbox_address.trim();
        if inbox.is_empty() {
            return Err("Relay inbox_address must be set".to_string());
        }
        if !inbox.validate_email() {
            return Err(format!(
                "Relay inbox_address '{}' is not a valid email address",
                inbox
            ));
        }

        self.email.validate()
    }
}
