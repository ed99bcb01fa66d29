use crate::cli::ServeArgs;
use crate::infra::{sample_roster, AppState, InMemoryContractorDirectory, InMemoryMatchPublisher};
use crate::routes::with_engine_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use treehub::agents::job_matching::JobMatchingService;
use treehub::config::AppConfig;
use treehub::error::AppError;
use treehub::import::RosterImporter;
use treehub::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        lead_seed: config.engine.lead_seed,
    };

    let profiles = match args.roster.take() {
        Some(path) => RosterImporter::from_path(path)?,
        None => sample_roster(Local::now().date_naive()),
    };
    let directory = Arc::new(InMemoryContractorDirectory::from_profiles(profiles));
    info!(contractors = directory.len(), "contractor directory loaded");

    let publisher = Arc::new(InMemoryMatchPublisher::default());
    let matching_service = Arc::new(JobMatchingService::new(
        directory,
        publisher,
        config.engine.matching(),
    )?);

    let app = with_engine_routes(matching_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "treehub scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
