use anyhow::Context;
use portfolio_config::Config;
use portfolio_email_contracts::EmailService;
use portfolio_rate_limit_contracts::RateLimitStore;
use tracing::info;

use crate::{email, environment::Environment, rate_limit};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Opening rate limit store");
    let rate_limit = rate_limit::connect(&config.rate_limit).await?;
    rate_limit
        .ping()
        .await
        .context("Rate limit store is not available")?;

    info!("Connecting to smtp server");
    let email = email::connect(&config.email)?;
    email.ping().await?;

    let server = Environment::new(config, email, rate_limit).rest_server()?;
    server.serve().await
}
