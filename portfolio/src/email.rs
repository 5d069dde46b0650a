use anyhow::Context;
use portfolio_config::EmailConfig;
use portfolio_email_impl::EmailServiceImpl;

/// Connect to the SMTP server
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(
        &config.smtp_url,
        config.from.clone().into(),
        config.timeout.into(),
    )
    .context("Failed to connect to SMTP server")
}
