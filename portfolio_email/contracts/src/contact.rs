use std::future::Future;

use portfolio_models::email_address::EmailAddressWithName;
use portfolio_templates_contracts::{ContactAcknowledgmentTemplate, ContactNotificationTemplate};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactEmailService: Send + Sync + 'static {
    /// Send the notification email alerting the site owner of a new
    /// submission. Replies to this email go to the submitter.
    fn send_owner_notification(
        &self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: &ContactNotificationTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Send the acknowledgment email back to the submitter.
    fn send_acknowledgment(
        &self,
        recipient: EmailAddressWithName,
        data: &ContactAcknowledgmentTemplate,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl MockContactEmailService {
    pub fn with_send_owner_notification(
        mut self,
        recipient: EmailAddressWithName,
        reply_to: EmailAddressWithName,
        data: ContactNotificationTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_owner_notification()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(reply_to),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _, _| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_send_acknowledgment(
        mut self,
        recipient: EmailAddressWithName,
        data: ContactAcknowledgmentTemplate,
        result: anyhow::Result<bool>,
    ) -> Self {
        self.expect_send_acknowledgment()
            .once()
            .with(
                mockall::predicate::eq(recipient),
                mockall::predicate::eq(data),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
