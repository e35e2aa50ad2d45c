use std::sync::Arc;

use anyhow::Context;
use portfolio_templates_contracts::{Template, TemplateService, BASE_TEMPLATE, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone)]
pub struct TemplateServiceImpl {
    tera: Arc<Tera>,
}

impl TemplateServiceImpl {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_template("base", BASE_TEMPLATE)
            .context("Failed to load base template")?;
        for &(name, template) in TEMPLATES {
            tera.add_raw_template(name, template)
                .with_context(|| format!("Failed to load template {name}"))?;
        }

        Ok(Self { tera: tera.into() })
    }
}

impl TemplateService for TemplateServiceImpl {
    #[tracing::instrument(skip_all, fields(template = T::NAME))]
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.tera.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use portfolio_templates_contracts::{ContactConfirmationTemplate, ContactNotificationTemplate};

    use super::*;

    fn notification() -> ContactNotificationTemplate {
        ContactNotificationTemplate {
            name: "Al".into(),
            email: "al@example.com".into(),
            subject: "Hello there".into(),
            message: "First line\nSecond line".into(),
            timestamp: "07/03/2024 14:05:09".into(),
            client_ip: "192.0.2.1".into(),
            user_agent: "Not available".into(),
        }
    }

    #[test]
    fn contact_notification() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();

        // Act
        let result = sut.render(&notification()).unwrap();

        // Assert
        assert!(result.starts_with("<!DOCTYPE html>"));
        assert!(result.contains(r#"<a href="mailto:al@example.com">al@example.com</a>"#));
        assert!(result.contains("Hello there"));
        assert!(result.contains("First line<br>Second line"));
        assert!(result.contains("Date: 07/03/2024 14:05:09"));
        assert!(result.contains("IP: 192.0.2.1"));
        assert!(result.contains("User agent: Not available"));
    }

    #[test]
    fn contact_notification_keeps_encoded_text() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();
        let template = ContactNotificationTemplate {
            message: "&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;".into(),
            ..notification()
        };

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert!(result.contains("&lt;script&gt;alert(&quot;hi&quot;)&lt;/script&gt;"));
        assert!(!result.contains("<script>"));
        assert!(!result.contains("&amp;lt;"));
    }

    #[test]
    fn contact_confirmation() {
        // Arrange
        let sut = TemplateServiceImpl::new().unwrap();
        let template = ContactConfirmationTemplate {
            name: "Al".into(),
            message: "This is a test message.".into(),
            owner_name: "Eduardo Cruz".into(),
        };

        // Act
        let result = sut.render(&template).unwrap();

        // Assert
        assert!(result.contains("Hi <strong>Al</strong>,"));
        assert!(result.contains("<blockquote>This is a test message.</blockquote>"));
        assert!(result.contains("<p>Eduardo Cruz</p>"));
    }
}
