use std::time::Duration;

use portfolio_models::contact::{ContactField, ContactSubmission};

use crate::field::FieldState;

/// How long a result banner stays visible.
pub const BANNER_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: FieldState,
    email: FieldState,
    subject: FieldState,
    message: FieldState,
    /// Honeypot. Hidden from humans, so it stays empty unless a bot fills it.
    website: String,
    submit: SubmitButton,
    banner: Option<Banner>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    /// Show the loading indicator instead of the idle label.
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Input(ContactField, String),
    Blur(ContactField),
    /// The honeypot input changed.
    HoneypotInput(String),
    Submit,
    /// The request finished with the message to show to the user.
    SubmissionFinished(Result<String, String>),
    BannerExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Send(ContactSubmission),
    DismissBannerAfter(Duration),
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: ContactField) -> &FieldState {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: ContactField) -> &mut FieldState {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    pub fn submit_button(&self) -> SubmitButton {
        self.submit
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Text of every error element, keyed by element id.
    pub fn error_elements(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        ContactField::ALL.into_iter().map(|field| {
            (
                field.error_element_id(),
                self.field(field).error.unwrap_or_default(),
            )
        })
    }

    pub fn handle(&mut self, event: Event) -> Option<Effect> {
        match event {
            Event::Input(field, value) => {
                let state = self.field_mut(field);
                state.value = value;
                state.clear_error();
                None
            }
            Event::Blur(field) => {
                self.validate_field(field);
                None
            }
            Event::HoneypotInput(value) => {
                self.website = value;
                None
            }
            Event::Submit => self.submit(),
            Event::SubmissionFinished(result) => Some(self.finish(result)),
            Event::BannerExpired => {
                self.banner = None;
                None
            }
        }
    }

    pub fn validate_field(&mut self, field: ContactField) -> bool {
        self.field_mut(field).validate(field)
    }

    pub fn clear_error(&mut self, field: ContactField) {
        self.field_mut(field).clear_error();
    }

    /// Validate every field, so each one shows its own feedback.
    pub fn validate_form(&mut self) -> bool {
        ContactField::ALL
            .into_iter()
            .fold(true, |valid, field| self.validate_field(field) && valid)
    }

    pub fn submission(&self) -> ContactSubmission {
        ContactSubmission {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            subject: self.subject.value.clone(),
            message: self.message.value.clone(),
            website: self.website.clone(),
        }
    }

    fn submit(&mut self) -> Option<Effect> {
        if self.submit.disabled || !self.validate_form() {
            return None;
        }

        self.submit = SubmitButton {
            disabled: true,
            loading: true,
        };
        Some(Effect::Send(self.submission()))
    }

    fn finish(&mut self, result: Result<String, String>) -> Effect {
        self.submit = SubmitButton::default();

        self.banner = Some(match result {
            Ok(text) => {
                self.reset();
                Banner {
                    kind: BannerKind::Success,
                    text,
                }
            }
            Err(text) => Banner {
                kind: BannerKind::Error,
                text,
            },
        });

        Effect::DismissBannerAfter(BANNER_DURATION)
    }

    fn reset(&mut self) {
        for field in ContactField::ALL {
            *self.field_mut(field) = FieldState::default();
        }
        self.website.clear();
    }
}
