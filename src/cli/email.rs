use ksm_inquiry::InquiryInput;
use ksm_portfolio::{Config, InquiryRelay};

fn status(value: &str) -> &'static str {
    if value.trim().is_empty() { "not set" } else { "set" }
}

/// Report which mail settings are present without printing secrets.
pub fn check_config(config: &Config) -> anyhow::Result<()> {
    tracing::info!(
        smtp_host = %config.email.smtp_host,
        smtp_port = config.email.smtp_port,
        smtp_username = status(&config.email.smtp_username),
        smtp_password = status(&config.email.smtp_password),
        from_address = %config.email.from_address,
        inbox_address = %config.relay.inbox_address,
        "Email configuration"
    );

    match config.validate() {
        Ok(()) => {
            tracing::info!("Configuration looks good");
            Ok(())
        }
        Err(reason) => {
            tracing::error!(%reason, "Configuration is incomplete");
            tracing::error!(
                "Set EMAIL_USER and EMAIL_PASS (a Gmail app password, not the account password)"
            );
            Err(anyhow::anyhow!(reason))
        }
    }
}

/// Relay a sample inquiry through the real mail transport.
pub async fn send_test(config: &Config) -> anyhow::Result<()> {
    let relay = InquiryRelay::from_config(config)?;

    let inquiry = InquiryInput {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        project_type: "Custom Painting".to_string(),
        budget: None,
        message: "I would like to commission a custom painting for my living room. \
                  The piece should be abstract with warm colors and measure approximately \
                  36x48 inches."
            .to_string(),
    }
    .into_inquiry()?;

    tracing::info!(inbox = %relay.inbox(), subject = %inquiry.subject(), "Sending test inquiry");

    let delivery = relay.relay(&inquiry).await?;

    tracing::info!(
        reference = %delivery.reference,
        attempts = delivery.attempts,
        "Test inquiry delivered, check the inbox"
    );

    Ok(())
}
