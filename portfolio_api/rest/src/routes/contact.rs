use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use portfolio_core_contact_contracts::{
    ContactFeatureService, ContactSubmitError, ContactUpdateStatusError, SubmissionListQuery,
    SubmissionListResult,
};
use portfolio_models::submission::{SubmissionId, SubmissionStatus};
use serde::{Deserialize, Serialize};

use super::{error, internal_error};
use crate::{
    extractors::user_agent::UserAgent,
    middlewares::client_ip::ClientIp,
    models::{
        contact::{ApiSubmission, ApiSubmitContactRequest},
        ApiPaginationQuery,
    },
};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .route("/api/contacts", routing::get(list))
        .route(
            "/api/contacts/:submission_id/status",
            routing::patch(update_status),
        )
        .with_state(service)
}

#[derive(Serialize)]
struct SubmitContactResponse {
    message: &'static str,
    id: SubmissionId,
}

async fn submit(
    service: State<Arc<impl ContactFeatureService>>,
    Extension(client_ip): Extension<ClientIp>,
    UserAgent(user_agent): UserAgent,
    request: Option<Json<ApiSubmitContactRequest>>,
) -> Response {
    // A missing or malformed body is reported like empty fields instead of
    // surfacing the extractor rejection.
    let request = request.map(|Json(request)| request).unwrap_or_default();
    let request = request.into_request(Some(client_ip.0.to_string()), user_agent);

    match service.submit(request).await {
        Ok(id) => (
            StatusCode::CREATED,
            Json(SubmitContactResponse {
                message: "Thank you for your message! I'll get back to you soon.",
                id,
            }),
        )
            .into_response(),
        Err(err @ ContactSubmitError::Validation(_)) => {
            error(StatusCode::BAD_REQUEST, err.to_string())
        }
        Err(err @ ContactSubmitError::Spam) => error(StatusCode::BAD_REQUEST, err.to_string()),
        Err(err @ ContactSubmitError::Duplicate) => {
            error(StatusCode::TOO_MANY_REQUESTS, err.to_string())
        }
        Err(err @ ContactSubmitError::NotifyOwner) => {
            error(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        Err(ContactSubmitError::Other(err)) => {
            internal_error(err, "Something went wrong. Please try again later.")
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListSubmissionsResponse {
    contacts: Vec<ApiSubmission>,
    current_page: u64,
    total_pages: u64,
    total_contacts: u64,
}

async fn list(
    service: State<Arc<impl ContactFeatureService>>,
    Query(pagination): Query<ApiPaginationQuery>,
) -> Response {
    let query = SubmissionListQuery {
        pagination: pagination.slice(),
    };

    match service.list(query).await {
        Ok(SubmissionListResult { total, submissions }) => Json(ListSubmissionsResponse {
            contacts: submissions.into_iter().map(Into::into).collect(),
            current_page: pagination.page(),
            total_pages: pagination.total_pages(total),
            total_contacts: total,
        })
        .into_response(),
        Err(err) => internal_error(err, "Failed to fetch contacts"),
    }
}

#[derive(Deserialize)]
struct UpdateSubmissionStatusRequest {
    #[serde(default)]
    status: String,
}

#[derive(Serialize)]
struct UpdateSubmissionStatusResponse {
    message: &'static str,
    contact: ApiSubmission,
}

async fn update_status(
    service: State<Arc<impl ContactFeatureService>>,
    Path(submission_id): Path<SubmissionId>,
    Json(request): Json<UpdateSubmissionStatusRequest>,
) -> Response {
    let Ok(status) = request.status.parse::<SubmissionStatus>() else {
        return error(StatusCode::BAD_REQUEST, "Invalid status");
    };

    match service.update_status(submission_id, status).await {
        Ok(submission) => Json(UpdateSubmissionStatusResponse {
            message: "Status updated",
            contact: submission.into(),
        })
        .into_response(),
        Err(ContactUpdateStatusError::NotFound) => error(StatusCode::NOT_FOUND, "Contact not found"),
        Err(ContactUpdateStatusError::Other(err)) => internal_error(err, "Failed to update contact"),
    }
}
