use anyhow::Context;
use portfolio_config::EmailConfig;
use portfolio_email_impl::EmailServiceImpl;

/// Set up the SMTP transport
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&config.smtp_url, config.from.clone())
        .context("Failed to set up SMTP transport")
}
