use chrono::{DateTime, Utc};
use portfolio_core_contact_contracts::SubmitContactRequest;
use portfolio_models::{
    email_address::EmailAddress,
    submission::{
        Submission, SubmissionId, SubmissionMessage, SubmissionName, SubmissionStatus,
        SubmissionSubject,
    },
};
use serde::{Deserialize, Serialize};

/// Raw contact form payload. Fields default to empty strings so that missing
/// fields are reported as a validation error instead of a deserialization
/// failure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiSubmitContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ApiSubmitContactRequest {
    pub fn into_request(
        self,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> SubmitContactRequest {
        SubmitContactRequest {
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            ip_address,
            user_agent,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSubmission {
    pub id: SubmissionId,
    pub name: SubmissionName,
    pub email: EmailAddress,
    pub subject: SubmissionSubject,
    pub message: SubmissionMessage,
    pub created_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

impl From<Submission> for ApiSubmission {
    fn from(value: Submission) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            subject: value.subject,
            message: value.message,
            created_at: value.created_at,
            status: value.status,
        }
    }
}
