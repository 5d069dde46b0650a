use portfolio_core_contact_contracts::{ContactFeatureService, ContactUpdateStatusError};
use portfolio_models::submission::SubmissionStatus;
use portfolio_persistence_contracts::{submission::MockSubmissionRepository, MockDatabase};
use portfolio_utils::assert_matches;

use crate::{
    tests::{submission, submission_id, Sut},
    ContactFeatureServiceImpl,
};

#[tokio::test]
async fn ok() {
    // Arrange
    let expected = portfolio_models::submission::Submission {
        status: SubmissionStatus::Read,
        ..submission()
    };

    let db = MockDatabase::build(true);
    let submission_repo = MockSubmissionRepository::new().with_update_status(
        submission_id(),
        SubmissionStatus::Read,
        Some(expected.clone()),
    );

    let sut = ContactFeatureServiceImpl {
        db,
        submission_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.update_status(submission_id(), SubmissionStatus::Read).await;

    // Assert
    assert_eq!(result.unwrap(), expected);
}

#[tokio::test]
async fn not_found() {
    // Arrange
    let db = MockDatabase::build(false);
    let submission_repo = MockSubmissionRepository::new().with_update_status(
        submission_id(),
        SubmissionStatus::Replied,
        None,
    );

    let sut = ContactFeatureServiceImpl {
        db,
        submission_repo,
        ..Sut::default()
    };

    // Act
    let result = sut
        .update_status(submission_id(), SubmissionStatus::Replied)
        .await;

    // Assert
    assert_matches!(result, Err(ContactUpdateStatusError::NotFound));
}
