use std::{sync::Arc, time::Duration};

use anyhow::Context;
use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactUpdateStatusError, SubmissionListQuery,
    SubmissionListResult, SubmitContactRequest, SubmissionValidateError,
};
use portfolio_email_contracts::contact::ContactEmailService;
use portfolio_models::{
    email_address::{EmailAddress, EmailAddressWithName},
    submission::{
        Submission, SubmissionComposite, SubmissionId, SubmissionMessage, SubmissionMessageError,
        SubmissionMeta, SubmissionName, SubmissionNameError, SubmissionStatus, SubmissionSubject,
        SubmissionSubjectError,
    },
};
use portfolio_persistence_contracts::{submission::SubmissionRepository, Database, Transaction};
use portfolio_shared_contracts::{id::IdService, time::TimeService};
use portfolio_templates_contracts::{ContactAcknowledgmentTemplate, ContactNotificationTemplate};

use crate::spam::SpamFilter;

pub mod spam;

#[cfg(test)]
mod tests;

#[derive(Debug, Clone, Default)]
pub struct ContactFeatureServiceImpl<Db, Time, Id, SubmissionRepo, ContactEmail> {
    db: Db,
    time: Time,
    id: Id,
    submission_repo: SubmissionRepo,
    contact_email: Option<ContactEmail>,
    config: ContactFeatureConfig,
    spam_filter: SpamFilter,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Recipient of new submission notifications. `None` disables email
    /// notifications entirely.
    pub owner_email: Option<Arc<EmailAddressWithName>>,
    pub owner_name: String,
    /// Window within which a resubmission of the same email and message is
    /// rejected as a duplicate.
    pub duplicate_window: Duration,
}

impl Default for ContactFeatureConfig {
    fn default() -> Self {
        Self {
            owner_email: None,
            owner_name: String::new(),
            duplicate_window: Duration::from_secs(60 * 60),
        }
    }
}

impl<Db, Time, Id, SubmissionRepo, ContactEmail>
    ContactFeatureServiceImpl<Db, Time, Id, SubmissionRepo, ContactEmail>
{
    pub fn new(
        db: Db,
        time: Time,
        id: Id,
        submission_repo: SubmissionRepo,
        contact_email: Option<ContactEmail>,
        config: ContactFeatureConfig,
        spam_filter: SpamFilter,
    ) -> Self {
        Self {
            db,
            time,
            id,
            submission_repo,
            contact_email,
            config,
            spam_filter,
        }
    }
}

impl<Db, Time, Id, SubmissionRepo, ContactEmail> ContactFeatureService
    for ContactFeatureServiceImpl<Db, Time, Id, SubmissionRepo, ContactEmail>
where
    Db: Database,
    Time: TimeService,
    Id: IdService,
    SubmissionRepo: SubmissionRepository<Db::Transaction>,
    ContactEmail: ContactEmailService,
{
    async fn submit(
        &self,
        request: SubmitContactRequest,
    ) -> Result<SubmissionId, ContactSubmitError> {
        let SubmitContactRequest {
            name,
            email,
            subject,
            message,
            ip_address,
            user_agent,
        } = request;

        if [&name, &email, &subject, &message]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(SubmissionValidateError::FieldsMissing.into());
        }

        let email = email
            .parse::<EmailAddress>()
            .map_err(|_| SubmissionValidateError::InvalidEmail)?;

        let name = SubmissionName::try_new(tera::escape_html(name.trim())).map_err(|err| {
            match err {
                SubmissionNameError::NotEmptyViolated => SubmissionValidateError::FieldsMissing,
                SubmissionNameError::LenCharMaxViolated => SubmissionValidateError::NameTooLong,
            }
        })?;

        let subject =
            SubmissionSubject::try_new(tera::escape_html(subject.trim())).map_err(|err| {
                match err {
                    SubmissionSubjectError::NotEmptyViolated => {
                        SubmissionValidateError::FieldsMissing
                    }
                    SubmissionSubjectError::LenCharMaxViolated => {
                        SubmissionValidateError::SubjectTooLong
                    }
                }
            })?;

        let message =
            SubmissionMessage::try_new(tera::escape_html(message.trim())).map_err(|err| {
                match err {
                    SubmissionMessageError::NotEmptyViolated => {
                        SubmissionValidateError::FieldsMissing
                    }
                    SubmissionMessageError::LenCharMaxViolated => {
                        SubmissionValidateError::MessageTooLong
                    }
                }
            })?;

        if self.spam_filter.is_spam(&subject) || self.spam_filter.is_spam(&message) {
            return Err(ContactSubmitError::Spam);
        }

        let now = self.time.now();

        let composite = SubmissionComposite {
            submission: Submission {
                id: self.id.generate(),
                name,
                email,
                subject,
                message,
                created_at: now,
                status: SubmissionStatus::default(),
            },
            meta: SubmissionMeta {
                ip_address,
                user_agent,
            },
        };

        let mut txn = self.db.begin_transaction().await?;

        let duplicate = self
            .submission_repo
            .exists_recent(
                &mut txn,
                &composite.submission.email,
                &composite.submission.message,
                now - self.config.duplicate_window,
            )
            .await
            .context("Failed to check for duplicate submissions in database")?;

        if duplicate {
            return Err(ContactSubmitError::Duplicate);
        }

        self.submission_repo
            .create(&mut txn, &composite)
            .await
            .context("Failed to store submission in database")?;

        txn.commit()
            .await
            .context("Failed to commit transaction")?;

        // The submission is durable at this point. Notification failures no
        // longer roll it back.
        self.notify(&composite.submission).await?;

        Ok(composite.submission.id)
    }

    async fn list(&self, query: SubmissionListQuery) -> anyhow::Result<SubmissionListResult> {
        let mut txn = self.db.begin_transaction().await?;

        let total = self
            .submission_repo
            .count(&mut txn)
            .await
            .context("Failed to get total number of submissions from database")?;

        let submissions = self
            .submission_repo
            .list(&mut txn, query.pagination)
            .await
            .context("Failed to get submissions from database")?;

        Ok(SubmissionListResult { total, submissions })
    }

    async fn update_status(
        &self,
        submission_id: SubmissionId,
        status: SubmissionStatus,
    ) -> Result<Submission, ContactUpdateStatusError> {
        let mut txn = self.db.begin_transaction().await?;

        let submission = self
            .submission_repo
            .update_status(&mut txn, submission_id, status)
            .await
            .context("Failed to update submission status in database")?
            .ok_or(ContactUpdateStatusError::NotFound)?;

        txn.commit()
            .await
            .context("Failed to commit transaction")?;

        Ok(submission)
    }
}

impl<Db, Time, Id, SubmissionRepo, ContactEmail>
    ContactFeatureServiceImpl<Db, Time, Id, SubmissionRepo, ContactEmail>
where
    Db: Database,
    Time: TimeService,
    Id: IdService,
    SubmissionRepo: SubmissionRepository<Db::Transaction>,
    ContactEmail: ContactEmailService,
{
    async fn notify(&self, submission: &Submission) -> Result<(), ContactSubmitError> {
        let (Some(contact_email), Some(owner_email)) =
            (&self.contact_email, &self.config.owner_email)
        else {
            tracing::debug!("Email is not configured, skipping notifications");
            return Ok(());
        };

        let submitter = submission
            .email
            .clone()
            .with_name(submission.name.clone().into_inner());

        let notification = ContactNotificationTemplate {
            name: submission.name.clone().into_inner(),
            email: submission.email.to_string(),
            subject: submission.subject.clone().into_inner(),
            message: submission.message.clone().into_inner(),
            submitted_at: submission
                .created_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        };

        let acknowledgment = ContactAcknowledgmentTemplate {
            name: submission.name.clone().into_inner(),
            subject: submission.subject.clone().into_inner(),
            message: submission.message.clone().into_inner(),
            owner_name: self.config.owner_name.clone(),
        };

        // Both emails are always attempted; only the owner notification
        // outcome affects the response.
        let owner_result = contact_email
            .send_owner_notification((**owner_email).clone(), submitter.clone(), &notification)
            .await;

        match contact_email
            .send_acknowledgment(submitter, &acknowledgment)
            .await
        {
            Ok(true) => {}
            Ok(false) => tracing::warn!("Acknowledgment email was rejected"),
            Err(err) => tracing::warn!("Failed to send acknowledgment email: {err:#}"),
        }

        match owner_result {
            Ok(true) => Ok(()),
            Ok(false) => Err(ContactSubmitError::NotifyOwner),
            Err(err) => {
                tracing::error!("Failed to send notification email: {err:#}");
                Err(ContactSubmitError::NotifyOwner)
            }
        }
    }
}
