use anyhow::Context;
use chrono::{DateTime, Utc};
use portfolio_models::{
    email_address::EmailAddress,
    pagination::PaginationSlice,
    submission::{
        Submission, SubmissionComposite, SubmissionId, SubmissionMessage, SubmissionName,
        SubmissionStatus, SubmissionSubject,
    },
};
use portfolio_persistence_contracts::submission::SubmissionRepository;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::{arg_indices, columns, PostgresTransaction};

#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresSubmissionRepository;

columns!(submission as "s": "id", "name", "email", "subject", "message", "ip_address", "user_agent", "created_at", "status");
// the listing view never exposes ip_address or user_agent
columns!(submission_public as "s": "id", "name", "email", "subject", "message", "created_at", "status");

impl SubmissionRepository<PostgresTransaction> for PostgresSubmissionRepository {
    async fn count(&self, txn: &mut PostgresTransaction) -> anyhow::Result<u64> {
        txn.txn()
            .query_one("select count(*) from submissions s", &[])
            .await
            .map(|row| row.get::<_, i64>(0) as _)
            .map_err(Into::into)
    }

    async fn list(
        &self,
        txn: &mut PostgresTransaction,
        pagination: PaginationSlice,
    ) -> anyhow::Result<Vec<Submission>> {
        txn.txn()
            .query(
                &format!(
                    "select {SUBMISSION_PUBLIC_COLS} from submissions s order by s.created_at \
                     desc limit {} offset {}",
                    *pagination.limit, pagination.offset
                ),
                &[],
            )
            .await
            .map_err(Into::into)
            .and_then(|rows| rows.iter().map(decode_submission).collect())
    }

    async fn exists_recent(
        &self,
        txn: &mut PostgresTransaction,
        email: &EmailAddress,
        message: &SubmissionMessage,
        since: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        txn.txn()
            .query_opt(
                "select 1 from submissions s where s.email=$1 and s.message=$2 and \
                 s.created_at>=$3 limit 1",
                &[&email.as_str(), &message.as_str(), &since],
            )
            .await
            .map(|row| row.is_some())
            .map_err(Into::into)
    }

    async fn create(
        &self,
        txn: &mut PostgresTransaction,
        submission: &SubmissionComposite,
    ) -> anyhow::Result<()> {
        let SubmissionComposite { submission, meta } = submission;
        txn.txn()
            .execute(
                &format!(
                    "insert into submissions ({SUBMISSION_COL_NAMES}) values ({})",
                    arg_indices(1..=SUBMISSION_CNT)
                ),
                &[
                    &*submission.id,
                    &submission.name.as_str(),
                    &submission.email.as_str(),
                    &submission.subject.as_str(),
                    &submission.message.as_str(),
                    &meta.ip_address,
                    &meta.user_agent,
                    &submission.created_at,
                    &submission.status.as_str(),
                ],
            )
            .await
            .context("Failed to insert submission")?;
        Ok(())
    }

    async fn update_status(
        &self,
        txn: &mut PostgresTransaction,
        submission_id: SubmissionId,
        status: SubmissionStatus,
    ) -> anyhow::Result<Option<Submission>> {
        txn.txn()
            .query_opt(
                &format!(
                    "update submissions as s set status=$2 where s.id=$1 returning \
                     {SUBMISSION_PUBLIC_COLS}"
                ),
                &[&*submission_id, &status.as_str()],
            )
            .await
            .map_err(Into::into)
            .and_then(|row| row.as_ref().map(decode_submission).transpose())
    }
}

fn decode_submission(row: &Row) -> anyhow::Result<Submission> {
    Ok(Submission {
        id: row.get::<_, Uuid>(0).into(),
        name: SubmissionName::try_new(row.get::<_, String>(1))
            .context("Failed to decode submission name")?,
        email: row
            .get::<_, String>(2)
            .parse()
            .context("Failed to decode submission email")?,
        subject: SubmissionSubject::try_new(row.get::<_, String>(3))
            .context("Failed to decode submission subject")?,
        message: SubmissionMessage::try_new(row.get::<_, String>(4))
            .context("Failed to decode submission message")?,
        created_at: row.get(5),
        status: row
            .get::<_, String>(6)
            .parse()
            .context("Failed to decode submission status")?,
    })
}
