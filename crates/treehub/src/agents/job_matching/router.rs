use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::JobPosting;
use super::repository::{ContractorDirectory, MatchPublisher};
use super::service::{JobMatchingService, MatchingServiceError};
use crate::catalog::ContractorId;

/// Job payload plus an optional evaluation date (defaults to today).
#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    pub job: JobPosting,
    #[serde(default)]
    pub today: Option<NaiveDate>,
}

/// Router builder exposing the matching endpoints.
pub fn matching_router<D, P>(service: Arc<JobMatchingService<D, P>>) -> Router
where
    D: ContractorDirectory + 'static,
    P: MatchPublisher + 'static,
{
    Router::new()
        .route("/api/v1/jobs/match", post(match_handler::<D, P>))
        .route(
            "/api/v1/jobs/match/:contractor_id",
            post(explain_handler::<D, P>),
        )
        .with_state(service)
}

fn error_response(error: MatchingServiceError) -> Response {
    let status = match &error {
        MatchingServiceError::Matching(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MatchingServiceError::UnknownContractor(_) => StatusCode::NOT_FOUND,
        MatchingServiceError::Directory(_) => StatusCode::SERVICE_UNAVAILABLE,
        MatchingServiceError::Publish(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn match_handler<D, P>(
    State(service): State<Arc<JobMatchingService<D, P>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    D: ContractorDirectory + 'static,
    P: MatchPublisher + 'static,
{
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    match service.match_job(&request.job, today) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn explain_handler<D, P>(
    State(service): State<Arc<JobMatchingService<D, P>>>,
    Path(contractor_id): Path<String>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    D: ContractorDirectory + 'static,
    P: MatchPublisher + 'static,
{
    let today = request.today.unwrap_or_else(|| Local::now().date_naive());
    let id = ContractorId(contractor_id);
    match service.explain(&request.job, &id, today) {
        Ok(Some(result)) => (StatusCode::OK, axum::Json(result)).into_response(),
        Ok(None) => {
            let payload = json!({
                "contractor_id": id.0,
                "job_id": request.job.id.0,
                "eligible": false,
                "reason": "contractor is outside the job's service radius",
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}
