use crate::agents::job_matching::MatchingServiceError;
use crate::agents::storm_response::StormError;
use crate::config::ConfigError;
use crate::conquest::{CommissionError, PartnershipError, TerritoryError};
use crate::import::ImportError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(ImportError),
    Matching(MatchingServiceError),
    Storm(StormError),
    Commission(CommissionError),
    Territory(TerritoryError),
    Partnership(PartnershipError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Matching(err) => write!(f, "matching error: {}", err),
            AppError::Storm(err) => write!(f, "storm response error: {}", err),
            AppError::Commission(err) => write!(f, "commission error: {}", err),
            AppError::Territory(err) => write!(f, "territory error: {}", err),
            AppError::Partnership(err) => write!(f, "partnership error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Matching(err) => Some(err),
            AppError::Storm(err) => Some(err),
            AppError::Commission(err) => Some(err),
            AppError::Territory(err) => Some(err),
            AppError::Partnership(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Matching(MatchingServiceError::Matching(_))
            | AppError::Storm(_)
            | AppError::Commission(_)
            | AppError::Partnership(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Matching(MatchingServiceError::UnknownContractor(_))
            | AppError::Territory(TerritoryError::UnknownTerritory(_)) => StatusCode::NOT_FOUND,
            AppError::Territory(_) => StatusCode::CONFLICT,
            AppError::Matching(MatchingServiceError::Directory(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Matching(MatchingServiceError::Publish(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<MatchingServiceError> for AppError {
    fn from(value: MatchingServiceError) -> Self {
        Self::Matching(value)
    }
}

impl From<StormError> for AppError {
    fn from(value: StormError) -> Self {
        Self::Storm(value)
    }
}

impl From<CommissionError> for AppError {
    fn from(value: CommissionError) -> Self {
        Self::Commission(value)
    }
}

impl From<TerritoryError> for AppError {
    fn from(value: TerritoryError) -> Self {
        Self::Territory(value)
    }
}

impl From<PartnershipError> for AppError {
    fn from(value: PartnershipError) -> Self {
        Self::Partnership(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ProfessionalTier, ServiceCategory, TerritoryId};

    #[test]
    fn client_errors_map_to_4xx() {
        let commission = AppError::from(CommissionError::UnknownCategory(ServiceCategory::Consultation));
        assert_eq!(commission.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let missing = AppError::from(TerritoryError::UnknownTerritory(TerritoryId::new("t-1")));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let conflict = AppError::from(TerritoryError::TierNotEligible {
            tier: ProfessionalTier::Bronze,
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_errors_are_internal() {
        let io = AppError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(io.to_string().starts_with("io error"));
        assert!(std::error::Error::source(&io).is_some());
    }
}
