use std::{net::IpAddr, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use thiserror::Error;

use crate::{email_address::EmailAddress, sanitize::sanitize};

pub const NAME_MIN_LEN: usize = 2;
pub const SUBJECT_MIN_LEN: usize = 5;
pub const MESSAGE_MIN_LEN: usize = 10;

/// Accepts anything shaped like `local@domain.tld`.
pub static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// The user editable fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// The form field name, as used in the request body and the page markup.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Id of the element displaying the validation error of this field.
    pub fn error_element_id(self) -> String {
        format!("{}-error", self.name())
    }

    /// Checks `value` against the rule of this field.
    ///
    /// `value` is expected to be trimmed already. Lengths are counted in
    /// characters.
    pub fn check(self, value: &str) -> Result<(), ContactValidationError> {
        let len = value.chars().count();
        match self {
            Self::Name if len < NAME_MIN_LEN => Err(ContactValidationError::NameTooShort),
            Self::Email if value.is_empty() => Err(ContactValidationError::EmailMissing),
            Self::Email if !EMAIL_REGEX.is_match(value) => {
                Err(ContactValidationError::EmailInvalid)
            }
            Self::Subject if len < SUBJECT_MIN_LEN => Err(ContactValidationError::SubjectTooShort),
            Self::Message if len < MESSAGE_MIN_LEN => Err(ContactValidationError::MessageTooShort),
            _ => Ok(()),
        }
    }
}

/// A contact form submission exactly as it was received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    /// Honeypot, hidden from humans.
    pub website: String,
}

impl ContactSubmission {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Whether the honeypot field has been filled in.
    pub fn is_spam(&self) -> bool {
        !self.website.is_empty()
    }
}

/// Where a submission came from. Attached by the server, never by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmissionOrigin {
    pub client_ip: IpAddr,
    pub user_agent: Option<String>,
}

/// A sanitized and validated contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

#[nutype(
    sanitize(with = |s: String| crate::sanitize::sanitize(&s)),
    validate(predicate = |s: &str| ContactField::Name.check(s).is_ok()),
    derive(Debug, Clone, PartialEq, Eq, Deref, AsRef)
)]
pub struct ContactMessageAuthorName(String);

#[nutype(
    sanitize(with = |s: String| crate::sanitize::sanitize(&s)),
    validate(predicate = |s: &str| ContactField::Subject.check(s).is_ok()),
    derive(Debug, Clone, PartialEq, Eq, Deref, AsRef)
)]
pub struct ContactMessageSubject(String);

#[nutype(
    sanitize(with = |s: String| crate::sanitize::sanitize(&s)),
    validate(predicate = |s: &str| ContactField::Message.check(s).is_ok()),
    derive(Debug, Clone, PartialEq, Eq, Deref, AsRef)
)]
pub struct ContactMessageContent(String);

impl TryFrom<&ContactSubmission> for ContactMessage {
    type Error = ContactValidationErrors;

    /// Sanitizes and validates all fields, collecting every violation.
    fn try_from(submission: &ContactSubmission) -> Result<Self, Self::Error> {
        let name = ContactMessageAuthorName::try_new(submission.name.clone())
            .map_err(|_| ContactValidationError::NameTooShort);
        let email = parse_email(&submission.email);
        let subject = ContactMessageSubject::try_new(submission.subject.clone())
            .map_err(|_| ContactValidationError::SubjectTooShort);
        let content = ContactMessageContent::try_new(submission.message.clone())
            .map_err(|_| ContactValidationError::MessageTooShort);

        match (name, email, subject, content) {
            (Ok(name), Ok(email), Ok(subject), Ok(content)) => Ok(Self {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            }),
            (name, email, subject, content) => Err(ContactValidationErrors(
                [name.err(), email.err(), subject.err(), content.err()]
                    .into_iter()
                    .flatten()
                    .collect(),
            )),
        }
    }
}

fn parse_email(raw: &str) -> Result<EmailAddress, ContactValidationError> {
    let email = sanitize(raw);
    ContactField::Email.check(&email)?;
    email
        .parse()
        .map_err(|_| ContactValidationError::EmailInvalid)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactValidationError {
    #[error("Name must be at least 2 characters long")]
    NameTooShort,
    #[error("Email is required")]
    EmailMissing,
    #[error("Email is not valid")]
    EmailInvalid,
    #[error("Subject must be at least 5 characters long")]
    SubjectTooShort,
    #[error("Message must be at least 10 characters long")]
    MessageTooShort,
}

impl ContactValidationError {
    pub fn field(self) -> ContactField {
        match self {
            Self::NameTooShort => ContactField::Name,
            Self::EmailMissing | Self::EmailInvalid => ContactField::Email,
            Self::SubjectTooShort => ContactField::Subject,
            Self::MessageTooShort => ContactField::Message,
        }
    }
}

/// All rule violations of a submission, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ContactValidationErrors(pub Vec<ContactValidationError>);

impl ContactValidationErrors {
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "Al".into(),
            email: "al@example.com".into(),
            subject: "Hello there".into(),
            message: "This is a test message.".into(),
            website: String::new(),
        }
    }

    #[test]
    fn valid() {
        let message = ContactMessage::try_from(&submission()).unwrap();
        assert_eq!(&**message.author.name, "Al");
        assert_eq!(message.author.email.as_str(), "al@example.com");
        assert_eq!(&**message.subject, "Hello there");
        assert_eq!(&**message.content, "This is a test message.");
    }

    #[test]
    fn trims_before_checking_length() {
        let result = ContactMessage::try_from(&ContactSubmission {
            name: "  A  ".into(),
            ..submission()
        });
        assert_eq!(
            result.unwrap_err(),
            ContactValidationErrors(vec![ContactValidationError::NameTooShort])
        );
    }

    #[test]
    fn collects_all_violations() {
        let result = ContactMessage::try_from(&ContactSubmission {
            name: "A".into(),
            email: "not-an-email".into(),
            subject: "Hey".into(),
            message: "short".into(),
            website: String::new(),
        });
        let errors = result.unwrap_err();
        assert_eq!(
            errors.0,
            [
                ContactValidationError::NameTooShort,
                ContactValidationError::EmailInvalid,
                ContactValidationError::SubjectTooShort,
                ContactValidationError::MessageTooShort,
            ]
        );
        assert_eq!(
            errors.messages(),
            [
                "Name must be at least 2 characters long",
                "Email is not valid",
                "Subject must be at least 5 characters long",
                "Message must be at least 10 characters long",
            ]
        );
    }

    #[test]
    fn missing_email() {
        let result = ContactMessage::try_from(&ContactSubmission {
            email: "   ".into(),
            ..submission()
        });
        assert_eq!(
            result.unwrap_err().0,
            [ContactValidationError::EmailMissing]
        );
    }

    #[test]
    fn email_pattern() {
        for (email, ok) in [
            ("al@example.com", true),
            ("first.last+tag@sub.example.org", true),
            ("al@example", false),
            ("al example@example.com", false),
            ("@example.com", false),
            ("al@@example.com", false),
        ] {
            assert_eq!(ContactField::Email.check(email).is_ok(), ok, "{email}");
        }
    }

    #[test]
    fn sanitizes_fields() {
        let message = ContactMessage::try_from(&ContactSubmission {
            subject: "<b>Hello</b>".into(),
            message: r#"<script>alert("x")</script>"#.into(),
            ..submission()
        })
        .unwrap();
        assert_eq!(&**message.subject, "&lt;b&gt;Hello&lt;/b&gt;");
        assert_eq!(
            &**message.content,
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn honeypot() {
        assert!(!submission().is_spam());
        assert!(ContactSubmission {
            website: "http://spam.example".into(),
            ..submission()
        }
        .is_spam());
    }

    #[test]
    fn error_element_ids() {
        let ids = ContactField::ALL.map(ContactField::error_element_id);
        assert_eq!(
            ids,
            ["name-error", "email-error", "subject-error", "message-error"]
        );
    }

    #[test]
    fn error_fields() {
        assert_eq!(
            ContactValidationError::EmailMissing.field(),
            ContactField::Email
        );
        assert_eq!(
            ContactValidationError::MessageTooShort.field(),
            ContactField::Message
        );
    }
}
