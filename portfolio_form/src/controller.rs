use portfolio_extern_contracts::contact::{ContactApiResponse, ContactApiService};
use tracing::warn;

use crate::form::{ContactForm, Effect, Event};

pub const NETWORK_ERROR: &str = "An error occurred while sending the message. Please try again.";

/// Drives a [`ContactForm`], performing `Send` effects through the api.
#[derive(Debug)]
pub struct FormController<Api> {
    api: Api,
    form: ContactForm,
}

impl<Api: ContactApiService> FormController<Api> {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            form: ContactForm::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Handle `event`, sending the submission if the form produced one.
    ///
    /// Returns the effect left for the host, i.e. the banner timer.
    pub async fn dispatch(&mut self, event: Event) -> Option<Effect> {
        let mut effect = self.form.handle(event);

        while let Some(Effect::Send(submission)) = effect {
            let result = match self.api.submit(&submission).await {
                Ok(ContactApiResponse {
                    success: true,
                    message,
                    ..
                }) => Ok(message),
                Ok(ContactApiResponse {
                    success: false,
                    message,
                    errors,
                }) => Err(std::iter::once(message)
                    .chain(errors)
                    .collect::<Vec<_>>()
                    .join("\n")),
                Err(err) => {
                    warn!("failed to submit contact form: {err:#}");
                    Err(NETWORK_ERROR.into())
                }
            };
            effect = self.form.handle(Event::SubmissionFinished(result));
        }

        effect
    }
}

#[cfg(test)]
mod tests {
    use portfolio_demo::contact::SUBMISSION;
    use portfolio_extern_contracts::contact::MockContactApiService;
    use portfolio_models::contact::ContactField;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        form::{Banner, BannerKind, SubmitButton, BANNER_DURATION},
        FieldState,
    };

    async fn fill(controller: &mut FormController<MockContactApiService>) {
        for field in ContactField::ALL {
            let effect = controller
                .dispatch(Event::Input(field, SUBMISSION.field(field).into()))
                .await;
            assert_eq!(effect, None);
        }
    }

    #[tokio::test]
    async fn success() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            SUBMISSION.clone(),
            Some(ContactApiResponse {
                success: true,
                message: "Message sent successfully! I will get back to you soon.".into(),
                errors: Vec::new(),
            }),
        );
        let mut sut = FormController::new(api);
        fill(&mut sut).await;

        // Act
        let effect = sut.dispatch(Event::Submit).await;

        // Assert
        assert_eq!(effect, Some(Effect::DismissBannerAfter(BANNER_DURATION)));
        assert_eq!(
            sut.form().banner(),
            Some(&Banner {
                kind: BannerKind::Success,
                text: "Message sent successfully! I will get back to you soon.".into(),
            })
        );
        assert_eq!(sut.form().submit_button(), SubmitButton::default());
        assert_eq!(sut.form().field(ContactField::Name), &FieldState::default());
    }

    #[tokio::test]
    async fn rejected() {
        // Arrange
        let api = MockContactApiService::new().with_submit(
            SUBMISSION.clone(),
            Some(ContactApiResponse {
                success: false,
                message: "Invalid form data".into(),
                errors: vec!["Message must be at least 10 characters long".into()],
            }),
        );
        let mut sut = FormController::new(api);
        fill(&mut sut).await;

        // Act
        let effect = sut.dispatch(Event::Submit).await;

        // Assert
        assert_eq!(effect, Some(Effect::DismissBannerAfter(BANNER_DURATION)));
        assert_eq!(
            sut.form().banner(),
            Some(&Banner {
                kind: BannerKind::Error,
                text: "Invalid form data\nMessage must be at least 10 characters long".into(),
            })
        );
        assert_eq!(sut.form().submission(), *SUBMISSION);
    }

    #[tokio::test]
    async fn network_error_restores_button() {
        // Arrange
        let api = MockContactApiService::new().with_submit(SUBMISSION.clone(), None);
        let mut sut = FormController::new(api);
        fill(&mut sut).await;

        // Act
        let effect = sut.dispatch(Event::Submit).await;

        // Assert
        assert_eq!(effect, Some(Effect::DismissBannerAfter(BANNER_DURATION)));
        assert_eq!(
            sut.form().banner(),
            Some(&Banner {
                kind: BannerKind::Error,
                text: NETWORK_ERROR.into(),
            })
        );
        assert_eq!(sut.form().submit_button(), SubmitButton::default());
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        // Arrange
        let mut sut = FormController::new(MockContactApiService::new());

        // Act
        let effect = sut.dispatch(Event::Submit).await;

        // Assert
        assert_eq!(effect, None);
        assert_eq!(sut.form().banner(), None);
        assert!(sut
            .form()
            .error_elements()
            .all(|(_, text)| !text.is_empty()));
    }
}
