use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    email_address::EmailAddress,
    macros::{id, nutype_string},
};

id!(SubmissionId);

/// A contact form submission as exposed to API consumers.
///
/// The request metadata captured alongside it lives in [`SubmissionMeta`] so
/// that listings never leak IP addresses or user agents by accident.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub name: SubmissionName,
    pub email: EmailAddress,
    pub subject: SubmissionSubject,
    pub message: SubmissionMessage,
    pub created_at: DateTime<Utc>,
    pub status: SubmissionStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionComposite {
    pub submission: Submission,
    pub meta: SubmissionMeta,
}

nutype_string!(SubmissionName(validate(not_empty, len_char_max = 100)));
nutype_string!(SubmissionSubject(validate(not_empty, len_char_max = 200)));
nutype_string!(SubmissionMessage(validate(not_empty, len_char_max = 2000)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    New,
    Read,
    Replied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid status")]
pub struct InvalidSubmissionStatusError;

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl FromStr for SubmissionStatus {
    type Err = InvalidSubmissionStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            _ => Err(InvalidSubmissionStatusError),
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_default() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::New);
    }

    #[test]
    fn status_roundtrip() {
        for status in [
            SubmissionStatus::New,
            SubmissionStatus::Read,
            SubmissionStatus::Replied,
        ] {
            assert_eq!(status.as_str().parse(), Ok(status));
        }
        assert_eq!(
            "deleted".parse::<SubmissionStatus>(),
            Err(InvalidSubmissionStatusError)
        );
    }

    #[test]
    fn status_serde() {
        assert_eq!(
            serde_json::to_value(SubmissionStatus::Replied).unwrap(),
            serde_json::json!("replied")
        );
    }

    #[test]
    fn name_trimmed_and_bounded() {
        let name = SubmissionName::try_new("  A  ").unwrap();
        assert_eq!(&*name, "A");
        assert!(SubmissionName::try_new("   ").is_err());
        assert!(SubmissionName::try_new("x".repeat(101)).is_err());
    }
}
