use portfolio_email_contracts::{template::TemplateEmailService, ContentType, Email, EmailService};
use portfolio_models::email_address::EmailAddressWithName;
use portfolio_templates_contracts::{
    ContactConfirmationTemplate, ContactNotificationTemplate, Template, TemplateService,
};

#[derive(Debug, Clone)]
pub struct TemplateEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<Email, Template> TemplateEmailServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template) -> Self {
        Self { email, template }
    }
}

impl<EmailS, TemplateS> TemplateEmailService for TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_contact_notification_email(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> anyhow::Result<bool> {
        let subject = format!("New portfolio message: {}", data.subject);
        self.send_email(recipient, Some(reply_to), data, subject)
            .await
    }

    async fn send_contact_confirmation_email(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactConfirmationTemplate,
    ) -> anyhow::Result<bool> {
        let subject = format!(
            "Confirmation: your message has been sent - {}",
            data.owner_name
        );
        self.send_email(recipient, None, data, subject).await
    }
}

impl<EmailS, TemplateS> TemplateEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: String,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipient,
                subject,
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}
