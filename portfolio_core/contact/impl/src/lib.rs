use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use portfolio_audit_contracts::AuditLogService;
use portfolio_core_contact_contracts::{ContactFeatureService, ContactSubmitError};
use portfolio_email_contracts::template::TemplateEmailService;
use portfolio_models::{
    audit::{AuditLogEntry, ContactOutcome},
    contact::{ContactMessage, ContactSubmission, ContactSubmissionOrigin},
    email_address::EmailAddressWithName,
    sanitize::encode_html,
};
use portfolio_rate_limit_contracts::RateLimitStore;
use portfolio_shared_contracts::{hash::HashService, time::TimeService};
use portfolio_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};
use tracing::{debug, error, info, warn};


const RATE_LIMIT_KEY_PREFIX: &str = "contact_rate_limit";
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";
const USER_AGENT_UNKNOWN: &str = "Not available";

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Time, Hash, RateLimit, TemplateEmail, Audit> {
    time: Time,
    hash: Hash,
    rate_limit: RateLimit,
    template_email: TemplateEmail,
    audit: Audit,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Mailbox receiving the notifications.
    pub recipient: Arc<EmailAddressWithName>,
    pub owner_name: Arc<str>,
    /// Minimum time between two accepted submissions from the same address.
    pub rate_limit: Duration,
    /// Whether to send a confirmation email to the submitter.
    pub confirmation: bool,
}

impl<Time, Hash, RateLimit, TemplateEmail, Audit>
    ContactFeatureServiceImpl<Time, Hash, RateLimit, TemplateEmail, Audit>
{
    pub fn new(
        time: Time,
        hash: Hash,
        rate_limit: RateLimit,
        template_email: TemplateEmail,
        audit: Audit,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            time,
            hash,
            rate_limit,
            template_email,
            audit,
            config,
        }
    }
}

impl<Time, Hash, RateLimit, TemplateEmail, Audit> ContactFeatureService
    for ContactFeatureServiceImpl<Time, Hash, RateLimit, TemplateEmail, Audit>
where
    Time: TimeService,
    Hash: HashService,
    RateLimit: RateLimitStore,
    TemplateEmail: TemplateEmailService,
    Audit: AuditLogService,
{
    #[tracing::instrument(skip_all, fields(client_ip = %origin.client_ip))]
    async fn submit(
        &self,
        submission: ContactSubmission,
        origin: ContactSubmissionOrigin,
    ) -> Result<(), ContactSubmitError> {
        let message = ContactMessage::try_from(&submission).inspect_err(|errors| {
            debug!(?errors, "rejected invalid submission");
        })?;

        if submission.is_spam() {
            info!("rejected submission with filled honeypot");
            return Err(ContactSubmitError::Spam);
        }

        let now = self.time.now();
        let key = self.rate_limit_key(&origin);
        if !self
            .rate_limit
            .acquire(&key, self.config.rate_limit, now)
            .await?
        {
            info!("rejected rate limited submission");
            return Err(ContactSubmitError::RateLimited);
        }

        let sent = self.send_notification(&message, &origin, now).await;

        if sent && self.config.confirmation {
            self.send_confirmation(&message).await;
        }

        let outcome = if sent {
            ContactOutcome::Success
        } else {
            ContactOutcome::Failed
        };
        self.write_audit_log(&message, &origin, now, outcome).await;

        if !sent {
            return Err(ContactSubmitError::Send);
        }

        Ok(())
    }
}

impl<Time, Hash, RateLimit, TemplateEmail, Audit>
    ContactFeatureServiceImpl<Time, Hash, RateLimit, TemplateEmail, Audit>
where
    Time: TimeService,
    Hash: HashService,
    RateLimit: RateLimitStore,
    TemplateEmail: TemplateEmailService,
    Audit: AuditLogService,
{
    fn rate_limit_key(&self, origin: &ContactSubmissionOrigin) -> String {
        let hash = self.hash.sha256(origin.client_ip.to_string().as_bytes());
        format!("{RATE_LIMIT_KEY_PREFIX}:{hash}")
    }

    /// Returns whether the smtp server accepted the notification.
    async fn send_notification(
        &self,
        message: &ContactMessage,
        origin: &ContactSubmissionOrigin,
        now: DateTime<Utc>,
    ) -> bool {
        let data = ContactNotificationTemplate {
            name: (*message.author.name).clone(),
            email: message.author.email.as_str().into(),
            subject: (*message.subject).clone(),
            message: (*message.content).clone(),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            client_ip: origin.client_ip.to_string(),
            user_agent: origin
                .user_agent
                .as_deref()
                .map_or_else(|| USER_AGENT_UNKNOWN.into(), encode_html),
        };
        let reply_to = message
            .author
            .email
            .clone()
            .with_name((*message.author.name).clone());

        match self
            .template_email
            .send_contact_notification_email((*self.config.recipient).clone(), reply_to, &data)
            .await
        {
            Ok(true) => true,
            Ok(false) => {
                error!("smtp server rejected the notification email");
                false
            }
            Err(err) => {
                error!("failed to send notification email: {err:#}");
                false
            }
        }
    }

    async fn send_confirmation(&self, message: &ContactMessage) {
        let data = ContactConfirmationTemplate {
            name: (*message.author.name).clone(),
            message: (*message.content).clone(),
            owner_name: self.config.owner_name.to_string(),
        };
        let recipient = message
            .author
            .email
            .clone()
            .with_name((*message.author.name).clone());

        match self
            .template_email
            .send_contact_confirmation_email(recipient, &data)
            .await
        {
            Ok(true) => {}
            Ok(false) => warn!("smtp server rejected the confirmation email"),
            Err(err) => warn!("failed to send confirmation email: {err:#}"),
        }
    }

    async fn write_audit_log(
        &self,
        message: &ContactMessage,
        origin: &ContactSubmissionOrigin,
        now: DateTime<Utc>,
        outcome: ContactOutcome,
    ) {
        let entry = AuditLogEntry {
            timestamp: now,
            name: (*message.author.name).clone(),
            email: message.author.email.as_str().into(),
            outcome,
            client_ip: origin.client_ip,
        };

        if let Err(err) = self.audit.append(&entry).await {
            error!("failed to write audit log entry: {err:#}");
        }
    }
}
