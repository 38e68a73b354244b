use lettre::Address;
use serde::Deserialize;

/// Values shipped in old `.env` samples. They never authenticate.
pub const PLACEHOLDER_USERNAME: &str = "your-email@gmail.com";
pub const PLACEHOLDER_PASSWORD: &str = "your-app-password";

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default)]
    pub smtp_username: String,
    #[serde(default)]
    pub smtp_password: String,
    #[serde(default)]
    pub from_address: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// STARTTLS on the submission port; `false` means implicit TLS (port 465)
    #[serde(default = "default_starttls")]
    pub starttls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::new(),
            from_name: default_from_name(),
            timeout_secs: default_timeout_secs(),
            starttls: default_starttls(),
        }
    }
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    "KSM Portfolio".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_starttls() -> bool {
    true
}

impl EmailConfig {
    /// Reject credentials that would only fail later, at the first send.
    pub fn validate(&self) -> Result<(), String> {
        if self.smtp_host.trim().is_empty() {
            return Err("SMTP host must be set".to_string());
        }
        if self.smtp_port == 0 {
            return Err("SMTP port must be greater than 0".to_string());
        }
        if self.smtp_username.trim().is_empty() || self.smtp_username == PLACEHOLDER_USERNAME {
            return Err("SMTP username is not configured (set EMAIL_USER)".to_string());
        }
        if self.smtp_password.trim().is_empty() || self.smtp_password == PLACEHOLDER_PASSWORD {
            return Err("SMTP password is not configured (set EMAIL_PASS)".to_string());
        }
        if self.from_address.parse::<Address>().is_err() {
            return Err(format!(
                "Sender address '{}' is not a valid email address",
                self.from_address
            ));
        }
        if self.timeout_secs == 0 {
            return Err("SMTP timeout must be greater than 0 seconds".to_string());
        }
        Ok(())
    }
}
