use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{ContractorId, JobId, ProfessionalTier, ServiceCategory};
use crate::geo::Coordinates;

/// Job posted by a property owner, as fetched from the marketplace store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub category: ServiceCategory,
    pub location: Coordinates,
    pub zip_code: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Owner budget in cents.
    #[serde(default)]
    pub budget: Option<u64>,
    pub estimated_hours: f64,
    pub posted_on: NaiveDate,
    #[serde(default)]
    pub urgent: bool,
}

/// Contractor snapshot used for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractorProfile {
    pub id: ContractorId,
    pub display_name: String,
    pub tier: ProfessionalTier,
    pub base_location: Coordinates,
    pub service_radius_miles: f64,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    pub hourly_rate_cents: u64,
    pub active_jobs: u32,
    pub max_concurrent_jobs: u32,
    #[serde(default)]
    pub last_active_on: Option<NaiveDate>,
    #[serde(default)]
    pub jobs_completed_last_30_days: u32,
    #[serde(default)]
    pub average_rating: f32,
}

/// Factors contributing to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    Location,
    Skill,
    Availability,
    Price,
}

/// Discrete, auditable contribution to a match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: MatchFactor,
    pub score: f64,
    pub weight: f64,
    pub weighted: f64,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRecommendation {
    Weak,
    Fair,
    Strong,
    Excellent,
}

impl MatchRecommendation {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            MatchRecommendation::Excellent
        } else if score >= 70.0 {
            MatchRecommendation::Strong
        } else if score >= 50.0 {
            MatchRecommendation::Fair
        } else {
            MatchRecommendation::Weak
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchRecommendation::Weak => "weak",
            MatchRecommendation::Fair => "fair",
            MatchRecommendation::Strong => "strong",
            MatchRecommendation::Excellent => "excellent",
        }
    }

    /// Whether the match is good enough to notify the contractor.
    pub const fn is_notifiable(self) -> bool {
        matches!(
            self,
            MatchRecommendation::Strong | MatchRecommendation::Excellent
        )
    }
}

/// Score of one contractor against one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub contractor_id: ContractorId,
    pub total_score: f64,
    pub distance_miles: f64,
    pub recommendation: MatchRecommendation,
    pub components: Vec<FactorScore>,
}

impl MatchResult {
    pub fn component(&self, factor: MatchFactor) -> Option<&FactorScore> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
    }
}
