use std::future::Future;

use chrono::{DateTime, Utc};
use portfolio_models::{
    email_address::EmailAddress,
    pagination::PaginationSlice,
    submission::{Submission, SubmissionComposite, SubmissionId, SubmissionMessage, SubmissionStatus},
};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait SubmissionRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Returns the total number of stored submissions.
    fn count(&self, txn: &mut Txn) -> impl Future<Output = anyhow::Result<u64>> + Send;

    /// Returns the submissions for the given pagination slice, newest first.
    ///
    /// Request metadata (IP address, user agent) is not included.
    fn list(
        &self,
        txn: &mut Txn,
        pagination: PaginationSlice,
    ) -> impl Future<Output = anyhow::Result<Vec<Submission>>> + Send;

    /// Returns whether a submission with the same email and message has been
    /// stored at or after `since`.
    fn exists_recent(
        &self,
        txn: &mut Txn,
        email: &EmailAddress,
        message: &SubmissionMessage,
        since: DateTime<Utc>,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;

    /// Stores a new submission.
    fn create(
        &self,
        txn: &mut Txn,
        submission: &SubmissionComposite,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Updates the status of the submission with the given id and returns the
    /// updated record, or `None` if the id does not exist.
    fn update_status(
        &self,
        txn: &mut Txn,
        submission_id: SubmissionId,
        status: SubmissionStatus,
    ) -> impl Future<Output = anyhow::Result<Option<Submission>>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockSubmissionRepository<Txn> {
    pub fn with_count(mut self, result: u64) -> Self {
        self.expect_count()
            .once()
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(mut self, pagination: PaginationSlice, result: Vec<Submission>) -> Self {
        self.expect_list()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(pagination),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_exists_recent(
        mut self,
        email: EmailAddress,
        message: SubmissionMessage,
        since: DateTime<Utc>,
        result: bool,
    ) -> Self {
        self.expect_exists_recent()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(email),
                mockall::predicate::eq(message),
                mockall::predicate::eq(since),
            )
            .return_once(move |_, _, _, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_create(mut self, submission: SubmissionComposite) -> Self {
        self.expect_create()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(submission),
            )
            .return_once(|_, _| Box::pin(std::future::ready(Ok(()))));
        self
    }

    pub fn with_update_status(
        mut self,
        submission_id: SubmissionId,
        status: SubmissionStatus,
        result: Option<Submission>,
    ) -> Self {
        self.expect_update_status()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(submission_id),
                mockall::predicate::eq(status),
            )
            .return_once(|_, _, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
