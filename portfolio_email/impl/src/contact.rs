use portfolio_email_contracts::{contact::ContactEmailService, ContentType, Email, EmailService};
use portfolio_models::email_address::EmailAddressWithName;
use portfolio_templates_contracts::{
    ContactAcknowledgmentTemplate, ContactNotificationTemplate, Template, TemplateService,
};

#[derive(Debug, Clone)]
pub struct ContactEmailServiceImpl<Email, Template> {
    email: Email,
    template: Template,
}

impl<Email, Template> ContactEmailServiceImpl<Email, Template> {
    pub fn new(email: Email, template: Template) -> Self {
        Self { email, template }
    }
}

impl<EmailS, TemplateS> ContactEmailService for ContactEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_owner_notification(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            Some(reply_to),
            data,
            format!("New Contact: {}", data.subject),
        )
        .await
    }

    async fn send_acknowledgment(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactAcknowledgmentTemplate,
    ) -> anyhow::Result<bool> {
        self.send_email(
            recipient,
            None,
            data,
            format!("Thank you for contacting me - {}", data.subject),
        )
        .await
    }
}

impl<EmailS, TemplateS> ContactEmailServiceImpl<EmailS, TemplateS>
where
    EmailS: EmailService,
    TemplateS: TemplateService,
{
    async fn send_email<T: Template + 'static>(
        &self,
        recipient: EmailAddressWithName,
        reply_to: Option<EmailAddressWithName>,
        data: &T,
        subject: impl Into<String>,
    ) -> anyhow::Result<bool> {
        self.email
            .send(Email {
                recipient,
                subject: subject.into(),
                body: self.template.render(data)?,
                content_type: ContentType::Html,
                reply_to,
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use portfolio_email_contracts::MockEmailService;
    use portfolio_templates_contracts::MockTemplateService;

    use super::*;

    type Sut = ContactEmailServiceImpl<MockEmailService, MockTemplateService>;

    #[tokio::test]
    async fn owner_notification() {
        // Arrange
        let owner = mailbox("owner@example.com", "Jane Doe");
        let submitter = mailbox("max@example.com", "Max");

        let data = ContactNotificationTemplate {
            name: "Max".into(),
            email: "max@example.com".into(),
            subject: "Hello".into(),
            message: "Hi".into(),
            submitted_at: "2025-01-01 12:00:00 UTC".into(),
        };

        let email = MockEmailService::new().with_send(
            Email {
                recipient: owner.clone(),
                subject: "New Contact: Hello".into(),
                body: "rendered".into(),
                content_type: ContentType::Html,
                reply_to: Some(submitter.clone()),
            },
            true,
        );

        let template = MockTemplateService::new().with_render(data.clone(), "rendered".into());

        let sut = Sut::new(email, template);

        // Act
        let result = sut.send_owner_notification(owner, submitter, &data).await;

        // Assert
        assert!(result.unwrap());
    }

    #[tokio::test]
    async fn acknowledgment() {
        // Arrange
        let submitter = mailbox("max@example.com", "Max");

        let data = ContactAcknowledgmentTemplate {
            name: "Max".into(),
            subject: "Hello".into(),
            message: "Hi".into(),
            owner_name: "Jane Doe".into(),
        };

        let email = MockEmailService::new().with_send(
            Email {
                recipient: submitter.clone(),
                subject: "Thank you for contacting me - Hello".into(),
                body: "rendered".into(),
                content_type: ContentType::Html,
                reply_to: None,
            },
            true,
        );

        let template = MockTemplateService::new().with_render(data.clone(), "rendered".into());

        let sut = Sut::new(email, template);

        // Act
        let result = sut.send_acknowledgment(submitter, &data).await;

        // Assert
        assert!(result.unwrap());
    }

    fn mailbox(address: &str, name: &str) -> EmailAddressWithName {
        address
            .parse::<portfolio_models::email_address::EmailAddress>()
            .unwrap()
            .with_name(name.into())
    }
}
