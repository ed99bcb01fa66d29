use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use treehub::agents::equipment::{
    recommend_for_job, score_listing, EquipmentConfig, EquipmentListing, EquipmentScore,
};
use treehub::agents::job_matching::{
    matching_router, ContractorDirectory, ContractorProfile, JobMatchingService, MatchPublisher,
};
use treehub::agents::storm_response::{
    LeadGenerationConfig, StormEvent, StormResponseAgent, StormResponsePlan,
};
use treehub::catalog::{ProfessionalTier, ServiceCategory};
use treehub::conquest::{
    CommissionQuote, CommissionSchedule, MonthlyPerformance, TierBenefits, TierEngine,
    TierEvaluation,
};
use treehub::error::AppError;
use treehub::geo::Coordinates;

#[derive(Debug, Deserialize)]
pub(crate) struct StormRequest {
    pub(crate) storm: StormEvent,
    #[serde(default)]
    pub(crate) contractors: Vec<ContractorProfile>,
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EquipmentRequest {
    pub(crate) buyer_location: Coordinates,
    pub(crate) listings: Vec<EquipmentListing>,
    #[serde(default)]
    pub(crate) category: Option<ServiceCategory>,
    #[serde(default)]
    pub(crate) current_year: Option<i32>,
    #[serde(default)]
    pub(crate) config: Option<EquipmentConfig>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommissionRequest {
    pub(crate) category: ServiceCategory,
    pub(crate) tier: ProfessionalTier,
    pub(crate) job_value_cents: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TierRequest {
    pub(crate) current: ProfessionalTier,
    #[serde(default)]
    pub(crate) history: Vec<MonthlyPerformance>,
    #[serde(default)]
    pub(crate) window_months: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TierResponse {
    pub(crate) evaluation: TierEvaluation,
    pub(crate) benefits: TierBenefits,
}

/// Matching endpoints plus probes and the stateless engine endpoints.
pub(crate) fn with_engine_routes<D, P>(service: Arc<JobMatchingService<D, P>>) -> axum::Router
where
    D: ContractorDirectory + 'static,
    P: MatchPublisher + 'static,
{
    matching_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/storms/respond", post(storm_endpoint))
        .route("/api/v1/equipment/score", post(equipment_endpoint))
        .route("/api/v1/commission/quote", post(commission_endpoint))
        .route("/api/v1/tiers/evaluate", post(tier_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn storm_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<StormRequest>,
) -> Result<Json<StormResponsePlan>, AppError> {
    let StormRequest {
        storm,
        contractors,
        seed,
    } = payload;

    let agent = StormResponseAgent::new(LeadGenerationConfig {
        seed: seed.or(state.lead_seed),
        ..LeadGenerationConfig::default()
    });
    let plan = agent.respond(&storm, &contractors)?;
    Ok(Json(plan))
}

pub(crate) async fn equipment_endpoint(
    Json(payload): Json<EquipmentRequest>,
) -> Json<Vec<EquipmentScore>> {
    let EquipmentRequest {
        buyer_location,
        listings,
        category,
        current_year,
        config,
    } = payload;

    let config = config.unwrap_or_default();
    let current_year = current_year.unwrap_or_else(|| Local::now().year());

    let scores = match category {
        Some(category) => {
            recommend_for_job(category, &listings, buyer_location, current_year, &config)
        }
        None => {
            let mut scores: Vec<EquipmentScore> = listings
                .iter()
                .map(|listing| score_listing(listing, buyer_location, current_year, &config))
                .collect();
            scores.sort_by(|a, b| {
                b.total
                    .total_cmp(&a.total)
                    .then_with(|| a.equipment_id.cmp(&b.equipment_id))
            });
            scores
        }
    };

    Json(scores)
}

pub(crate) async fn commission_endpoint(
    Json(payload): Json<CommissionRequest>,
) -> Result<Json<CommissionQuote>, AppError> {
    let quote = CommissionSchedule::default().quote(
        payload.category,
        payload.tier,
        payload.job_value_cents,
    )?;
    Ok(Json(quote))
}

pub(crate) async fn tier_endpoint(Json(payload): Json<TierRequest>) -> Json<TierResponse> {
    let engine = payload
        .window_months
        .map(TierEngine::new)
        .unwrap_or_default();
    let evaluation = engine.evaluate(payload.current, &payload.history);
    let benefits = TierBenefits::for_tier(evaluation.current);

    Json(TierResponse {
        evaluation,
        benefits,
    })
}
