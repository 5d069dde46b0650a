use std::future::Future;

use portfolio_models::{
    pagination::PaginationSlice,
    submission::{Submission, SubmissionId, SubmissionStatus},
};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validate, sanitize and persist a contact form submission, then notify
    /// the site owner and acknowledge the submitter via email.
    fn submit(
        &self,
        request: SubmitContactRequest,
    ) -> impl Future<Output = Result<SubmissionId, ContactSubmitError>> + Send;

    /// Return a page of submissions, newest first.
    fn list(
        &self,
        query: SubmissionListQuery,
    ) -> impl Future<Output = anyhow::Result<SubmissionListResult>> + Send;

    /// Update the triage status of a submission.
    fn update_status(
        &self,
        submission_id: SubmissionId,
        status: SubmissionStatus,
    ) -> impl Future<Output = Result<Submission, ContactUpdateStatusError>> + Send;
}

/// Raw submission as received from the client. Fields are validated and
/// sanitized by [`ContactFeatureService::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionListQuery {
    pub pagination: PaginationSlice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionListResult {
    pub total: u64,
    pub submissions: Vec<Submission>,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error(transparent)]
    Validation(#[from] SubmissionValidateError),
    #[error("Message appears to be spam")]
    Spam,
    #[error("Duplicate submission detected")]
    Duplicate,
    #[error("Failed to send notification email")]
    NotifyOwner,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionValidateError {
    #[error("All fields are required")]
    FieldsMissing,
    #[error("Please provide a valid email address")]
    InvalidEmail,
    #[error("Name cannot exceed 100 characters")]
    NameTooLong,
    #[error("Subject cannot exceed 200 characters")]
    SubjectTooLong,
    #[error("Message cannot exceed 2000 characters")]
    MessageTooLong,
}

#[derive(Debug, Error)]
pub enum ContactUpdateStatusError {
    #[error("Contact not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        request: SubmitContactRequest,
        result: Result<SubmissionId, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(request))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_list(mut self, query: SubmissionListQuery, result: SubmissionListResult) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::eq(query))
            .return_once(|_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_update_status(
        mut self,
        submission_id: SubmissionId,
        status: SubmissionStatus,
        result: Result<Submission, ContactUpdateStatusError>,
    ) -> Self {
        self.expect_update_status()
            .once()
            .with(
                mockall::predicate::eq(submission_id),
                mockall::predicate::eq(status),
            )
            .return_once(|_, _| Box::pin(std::future::ready(result)));
        self
    }
}
