use std::{sync::LazyLock, time::Duration};

use portfolio_models::{
    audit::{AuditLogEntry, ContactOutcome},
    contact::{ContactSubmission, ContactSubmissionOrigin},
    email_address::EmailAddressWithName,
};
use portfolio_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};

use crate::{CLIENT_ADDR, CLIENT_IP, CLIENT_IP_HASH_HEX, NOW};

pub const OWNER_NAME: &str = "Eduardo Cruz";
pub const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:131.0) Gecko/20100101 Firefox/131.0";
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

pub static RATE_LIMIT_KEY: LazyLock<String> =
    LazyLock::new(|| format!("contact_rate_limit:{CLIENT_IP_HASH_HEX}"));

pub static OWNER: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "Eduardo Cruz <contact@eduardocruz.dev>".parse().unwrap());

pub static SUBMITTER: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "Al <al@example.com>".parse().unwrap());

pub static SUBMISSION: LazyLock<ContactSubmission> = LazyLock::new(|| ContactSubmission {
    name: "Al".into(),
    email: "al@example.com".into(),
    subject: "Hello there".into(),
    message: "This is a test message.".into(),
    website: String::new(),
});

pub static ORIGIN: LazyLock<ContactSubmissionOrigin> =
    LazyLock::new(|| ContactSubmissionOrigin {
        client_ip: *CLIENT_ADDR,
        user_agent: Some(USER_AGENT.into()),
    });

pub static NOTIFICATION_TEMPLATE: LazyLock<ContactNotificationTemplate> =
    LazyLock::new(|| ContactNotificationTemplate {
        name: "Al".into(),
        email: "al@example.com".into(),
        subject: "Hello there".into(),
        message: "This is a test message.".into(),
        timestamp: "07/03/2024 14:05:09".into(),
        client_ip: CLIENT_IP.into(),
        user_agent: USER_AGENT.into(),
    });

pub static CONFIRMATION_TEMPLATE: LazyLock<ContactConfirmationTemplate> =
    LazyLock::new(|| ContactConfirmationTemplate {
        name: "Al".into(),
        message: "This is a test message.".into(),
        owner_name: OWNER_NAME.into(),
    });

pub static AUDIT_SUCCESS: LazyLock<AuditLogEntry> = LazyLock::new(|| audit(ContactOutcome::Success));

pub static AUDIT_FAILED: LazyLock<AuditLogEntry> = LazyLock::new(|| audit(ContactOutcome::Failed));

fn audit(outcome: ContactOutcome) -> AuditLogEntry {
    AuditLogEntry {
        timestamp: *NOW,
        name: "Al".into(),
        email: "al@example.com".into(),
        outcome,
        client_ip: *CLIENT_ADDR,
    }
}
