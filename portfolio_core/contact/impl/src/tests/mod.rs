use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeZone, Utc};
use portfolio_email_contracts::contact::MockContactEmailService;
use portfolio_models::{
    email_address::EmailAddressWithName,
    submission::{Submission, SubmissionId, SubmissionStatus},
};
use portfolio_persistence_contracts::{
    submission::MockSubmissionRepository, MockDatabase, MockTransaction,
};
use portfolio_shared_contracts::{id::MockIdService, time::MockTimeService};
use uuid::Uuid;

use crate::{ContactFeatureConfig, ContactFeatureServiceImpl};

mod submit;
mod update_status;

type Sut = ContactFeatureServiceImpl<
    MockDatabase,
    MockTimeService,
    MockIdService,
    MockSubmissionRepository<MockTransaction>,
    MockContactEmailService,
>;

fn submission_id() -> SubmissionId {
    Uuid::from_u128(0xc0ffee).into()
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

fn owner() -> EmailAddressWithName {
    "owner@example.com"
        .parse::<portfolio_models::email_address::EmailAddress>()
        .unwrap()
        .with_name("Jane Doe".into())
}

fn config() -> ContactFeatureConfig {
    ContactFeatureConfig {
        owner_email: Some(Arc::new(owner())),
        owner_name: "Jane Doe".into(),
        duplicate_window: Duration::from_secs(60 * 60),
    }
}

fn submission() -> Submission {
    Submission {
        id: submission_id(),
        name: "Max Mustermann".try_into().unwrap(),
        email: "max.mustermann@example.com".parse().unwrap(),
        subject: "Project inquiry".try_into().unwrap(),
        message: "Hello!\nLooking forward to working together.".try_into().unwrap(),
        created_at: now(),
        status: SubmissionStatus::New,
    }
}
