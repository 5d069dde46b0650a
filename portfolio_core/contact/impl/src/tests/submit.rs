use std::time::Duration;

use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, SubmitContactRequest, SubmissionValidateError,
};
use portfolio_email_contracts::contact::MockContactEmailService;
use portfolio_models::{
    email_address::{EmailAddress, EmailAddressWithName},
    submission::{SubmissionComposite, SubmissionMeta},
};
use portfolio_persistence_contracts::{submission::MockSubmissionRepository, MockDatabase};
use portfolio_shared_contracts::{id::MockIdService, time::MockTimeService};
use portfolio_templates_contracts::{ContactAcknowledgmentTemplate, ContactNotificationTemplate};
use portfolio_utils::assert_matches;

use crate::{
    tests::{config, now, owner, submission, submission_id, Sut},
    ContactFeatureServiceImpl,
};

#[tokio::test]
async fn ok() {
    // Arrange
    let db = MockDatabase::build(true);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new()
        .with_exists_recent(
            submission().email,
            submission().message,
            now() - Duration::from_secs(60 * 60),
            false,
        )
        .with_create(composite());

    let contact_email = MockContactEmailService::new()
        .with_send_owner_notification(owner(), submitter(), notification(), Ok(true))
        .with_send_acknowledgment(submitter(), acknowledgment(), Ok(true));

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        contact_email: Some(contact_email),
        config: config(),
        ..Sut::default()
    };

    // Act
    let result = sut.submit(request()).await;

    // Assert
    assert_eq!(result.unwrap(), submission_id());
}

#[tokio::test]
async fn ok_email_not_configured() {
    // Arrange
    let db = MockDatabase::build(true);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new()
        .with_exists_recent(
            submission().email,
            submission().message,
            now() - Duration::from_secs(60 * 60),
            false,
        )
        .with_create(composite());

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.submit(request()).await;

    // Assert
    assert_eq!(result.unwrap(), submission_id());
}

#[tokio::test]
async fn missing_fields() {
    for blank in ["name", "email", "subject", "message"] {
        // Arrange
        let mut req = request();
        match blank {
            "name" => req.name = "  ".into(),
            "email" => req.email = String::new(),
            "subject" => req.subject = " ".into(),
            _ => req.message = String::new(),
        }

        let sut = Sut::default();

        // Act
        let result = sut.submit(req).await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Validation(
                SubmissionValidateError::FieldsMissing
            ))
        );
    }
}

#[tokio::test]
async fn invalid_email() {
    // Arrange
    let req = SubmitContactRequest {
        email: "not-an-email".into(),
        ..request()
    };

    let sut = Sut::default();

    // Act
    let result = sut.submit(req).await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSubmitError::Validation(
            SubmissionValidateError::InvalidEmail
        ))
    );
}

#[tokio::test]
async fn fields_too_long() {
    for (req, expected) in [
        (
            SubmitContactRequest {
                name: "x".repeat(101),
                ..request()
            },
            SubmissionValidateError::NameTooLong,
        ),
        (
            SubmitContactRequest {
                subject: "x y".repeat(100),
                ..request()
            },
            SubmissionValidateError::SubjectTooLong,
        ),
        (
            SubmitContactRequest {
                message: "x y".repeat(1000),
                ..request()
            },
            SubmissionValidateError::MessageTooLong,
        ),
    ] {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut.submit(req).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Validation(err)) if *err == expected);
    }
}

#[tokio::test]
async fn spam() {
    for req in [
        SubmitContactRequest {
            message: "buy cheap viagra now".into(),
            ..request()
        },
        SubmitContactRequest {
            subject: "You are our LOTTERY winner".into(),
            ..request()
        },
        SubmitContactRequest {
            message: "hello aaaaaaaaaaaaaaaa".into(),
            ..request()
        },
    ] {
        // Arrange
        let sut = Sut::default();

        // Act
        let result = sut.submit(req).await;

        // Assert
        assert_matches!(result, Err(ContactSubmitError::Spam));
    }
}

#[tokio::test]
async fn duplicate() {
    // Arrange
    let db = MockDatabase::build(false);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new().with_exists_recent(
        submission().email,
        submission().message,
        now() - Duration::from_secs(60 * 60),
        true,
    );

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        config: config(),
        ..Sut::default()
    };

    // Act
    let result = sut.submit(request()).await;

    // Assert
    assert_matches!(result, Err(ContactSubmitError::Duplicate));
}

#[tokio::test]
async fn owner_notification_rejected() {
    // Arrange
    let db = MockDatabase::build(true);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new()
        .with_exists_recent(
            submission().email,
            submission().message,
            now() - Duration::from_secs(60 * 60),
            false,
        )
        .with_create(composite());

    let contact_email = MockContactEmailService::new()
        .with_send_owner_notification(owner(), submitter(), notification(), Ok(false))
        .with_send_acknowledgment(submitter(), acknowledgment(), Ok(true));

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        contact_email: Some(contact_email),
        config: config(),
        ..Sut::default()
    };

    // Act
    let result = sut.submit(request()).await;

    // Assert
    assert_matches!(result, Err(ContactSubmitError::NotifyOwner));
}

#[tokio::test]
async fn owner_notification_error() {
    // Arrange
    let db = MockDatabase::build(true);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new()
        .with_exists_recent(
            submission().email,
            submission().message,
            now() - Duration::from_secs(60 * 60),
            false,
        )
        .with_create(composite());

    let contact_email = MockContactEmailService::new()
        .with_send_owner_notification(
            owner(),
            submitter(),
            notification(),
            Err(anyhow::anyhow!("smtp server unreachable")),
        )
        .with_send_acknowledgment(submitter(), acknowledgment(), Ok(true));

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        contact_email: Some(contact_email),
        config: config(),
        ..Sut::default()
    };

    // Act
    let result = sut.submit(request()).await;

    // Assert
    assert_matches!(result, Err(ContactSubmitError::NotifyOwner));
}

#[tokio::test]
async fn acknowledgment_attempted_despite_owner_notification_failure() {
    // Arrange
    let db = MockDatabase::build(true);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new()
        .with_exists_recent(
            submission().email,
            submission().message,
            now() - Duration::from_secs(60 * 60),
            false,
        )
        .with_create(composite());

    // Both sends fail. The acknowledgment must still be attempted and only
    // the owner notification failure is reported.
    let contact_email = MockContactEmailService::new()
        .with_send_owner_notification(
            owner(),
            submitter(),
            notification(),
            Err(anyhow::anyhow!("smtp server unreachable")),
        )
        .with_send_acknowledgment(
            submitter(),
            acknowledgment(),
            Err(anyhow::anyhow!("smtp server unreachable")),
        );

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        contact_email: Some(contact_email),
        config: config(),
        ..Sut::default()
    };

    // Act
    let result = sut.submit(request()).await;

    // Assert
    assert_matches!(result, Err(ContactSubmitError::NotifyOwner));
}

#[tokio::test]
async fn acknowledgment_failure_is_ignored() {
    // Arrange
    let db = MockDatabase::build(true);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new()
        .with_exists_recent(
            submission().email,
            submission().message,
            now() - Duration::from_secs(60 * 60),
            false,
        )
        .with_create(composite());

    let contact_email = MockContactEmailService::new()
        .with_send_owner_notification(owner(), submitter(), notification(), Ok(true))
        .with_send_acknowledgment(
            submitter(),
            acknowledgment(),
            Err(anyhow::anyhow!("smtp server unreachable")),
        );

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        contact_email: Some(contact_email),
        config: config(),
        ..Sut::default()
    };

    // Act
    let result = sut.submit(request()).await;

    // Assert
    assert_eq!(result.unwrap(), submission_id());
}

#[tokio::test]
async fn escapes_html() {
    // Arrange
    let req = SubmitContactRequest {
        name: "Tom & Jerry <admins>".into(),
        ..request()
    };

    let mut expected = composite();
    expected.submission.name = "Tom &amp; Jerry &lt;admins&gt;".try_into().unwrap();

    let db = MockDatabase::build(true);
    let time = MockTimeService::new().with_now(now());
    let id = MockIdService::new().with_generate(submission_id());

    let submission_repo = MockSubmissionRepository::new()
        .with_exists_recent(
            submission().email,
            submission().message,
            now() - Duration::from_secs(60 * 60),
            false,
        )
        .with_create(expected);

    let sut = ContactFeatureServiceImpl {
        db,
        time,
        id,
        submission_repo,
        ..Sut::default()
    };

    // Act
    let result = sut.submit(req).await;

    // Assert
    assert_eq!(result.unwrap(), submission_id());
}

fn request() -> SubmitContactRequest {
    SubmitContactRequest {
        name: "  Max Mustermann ".into(),
        email: " Max.Mustermann@Example.COM ".into(),
        subject: "Project inquiry".into(),
        message: "Hello!\nLooking forward to working together.".into(),
        ip_address: Some("203.0.113.7".into()),
        user_agent: Some("Mozilla/5.0".into()),
    }
}

fn composite() -> SubmissionComposite {
    SubmissionComposite {
        submission: submission(),
        meta: SubmissionMeta {
            ip_address: Some("203.0.113.7".into()),
            user_agent: Some("Mozilla/5.0".into()),
        },
    }
}

fn submitter() -> EmailAddressWithName {
    "max.mustermann@example.com"
        .parse::<EmailAddress>()
        .unwrap()
        .with_name("Max Mustermann".into())
}

fn notification() -> ContactNotificationTemplate {
    ContactNotificationTemplate {
        name: "Max Mustermann".into(),
        email: "max.mustermann@example.com".into(),
        subject: "Project inquiry".into(),
        message: "Hello!\nLooking forward to working together.".into(),
        submitted_at: "2025-01-01 12:00:00 UTC".into(),
    }
}

fn acknowledgment() -> ContactAcknowledgmentTemplate {
    ContactAcknowledgmentTemplate {
        name: "Max Mustermann".into(),
        subject: "Project inquiry".into(),
        message: "Hello!\nLooking forward to working together.".into(),
        owner_name: "Jane Doe".into(),
    }
}
