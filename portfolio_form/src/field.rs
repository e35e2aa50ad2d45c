use portfolio_models::contact::{ContactField, ContactValidationError};

/// Visual state of an input border.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Indicator {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub error: Option<&'static str>,
    pub indicator: Indicator,
}

impl FieldState {
    /// Check the trimmed value against the rule of `field` and update the
    /// error text and indicator.
    pub fn validate(&mut self, field: ContactField) -> bool {
        match field.check(self.value.trim()) {
            Ok(()) => {
                self.error = None;
                self.indicator = Indicator::Valid;
                true
            }
            Err(err) => {
                self.error = Some(message(err));
                self.indicator = Indicator::Invalid;
                false
            }
        }
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.indicator = Indicator::Neutral;
    }
}

fn message(err: ContactValidationError) -> &'static str {
    match err {
        ContactValidationError::EmailMissing | ContactValidationError::EmailInvalid => {
            "Please enter a valid email address"
        }
        ContactValidationError::NameTooShort => "Name must be at least 2 characters long",
        ContactValidationError::SubjectTooShort => "Subject must be at least 5 characters long",
        ContactValidationError::MessageTooShort => "Message must be at least 10 characters long",
    }
}
