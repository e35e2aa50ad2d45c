use std::{fmt, net::IpAddr};

use chrono::{DateTime, Utc};

/// Whether the notification email of a submission could be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Success,
    Failed,
}

impl fmt::Display for ContactOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        })
    }
}

/// One line of the contact audit log.
///
/// Rendered as `timestamp | name | email | outcome | client ip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditLogEntry {
    pub timestamp: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub outcome: ContactOutcome,
    pub client_ip: IpAddr,
}

impl fmt::Display for AuditLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            single_line(&self.name),
            single_line(&self.email),
            self.outcome,
            self.client_ip,
        )
    }
}

fn single_line(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}
