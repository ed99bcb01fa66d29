use serde::{Deserialize, Serialize};

use super::domain::{ContractorProfile, MatchRecommendation, MatchResult};
use crate::catalog::{ContractorId, JobId};
use crate::geo::Coordinates;

/// Read access to contractor records so the service can be exercised in isolation.
pub trait ContractorDirectory: Send + Sync {
    /// Contractors whose base location lies within `radius_miles` of `location`.
    fn candidates_near(
        &self,
        location: Coordinates,
        radius_miles: f64,
    ) -> Result<Vec<ContractorProfile>, DirectoryError>;

    fn fetch(&self, id: &ContractorId) -> Result<Option<ContractorProfile>, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("contractor directory unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for match notifications (e-mail, SMS, in-app).
pub trait MatchPublisher: Send + Sync {
    fn publish(&self, notification: MatchNotification) -> Result<(), PublishError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchNotification {
    pub job_id: JobId,
    pub contractor_id: ContractorId,
    pub total_score: f64,
    pub recommendation: MatchRecommendation,
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Ranked matches returned for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub job_id: JobId,
    /// Number of candidates loaded from the directory before ranking.
    pub evaluated: usize,
    pub matches: Vec<MatchResult>,
    pub notified: usize,
}

impl MatchReport {
    pub fn best(&self) -> Option<&MatchResult> {
        self.matches.first()
    }
}
