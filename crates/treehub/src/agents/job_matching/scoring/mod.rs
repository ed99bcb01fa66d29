mod config;
mod factors;

pub use config::{MatchWeights, MatchingConfig};

use chrono::NaiveDate;

use super::domain::{
    ContractorProfile, FactorScore, JobPosting, MatchFactor, MatchRecommendation, MatchResult,
};

/// Errors raised while configuring the scorer or validating a job.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchingError {
    #[error("match weights must be non-negative and sum to 1.0 (found {sum:.4})")]
    InvalidWeights { sum: f64 },
    #[error("invalid matching configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid job posting: {0}")]
    InvalidJob(String),
}

/// Stateless scorer applying the configured weights to job/contractor pairs.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    config: MatchingConfig,
}

impl MatchScorer {
    pub fn new(config: MatchingConfig) -> Result<Self, MatchingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    pub fn validate_job(job: &JobPosting) -> Result<(), MatchingError> {
        if !job.location.is_valid() {
            return Err(MatchingError::InvalidJob(format!(
                "job {} has out-of-range coordinates",
                job.id
            )));
        }
        if !job.estimated_hours.is_finite() || job.estimated_hours < 0.0 {
            return Err(MatchingError::InvalidJob(format!(
                "job {} estimated hours must be a non-negative number",
                job.id
            )));
        }
        Ok(())
    }

    /// Score a single contractor. `None` means the contractor is out of range.
    pub fn score(
        &self,
        job: &JobPosting,
        contractor: &ContractorProfile,
        today: NaiveDate,
    ) -> Option<MatchResult> {
        let distance_miles = job.location.distance_miles(&contractor.base_location);
        let radius = contractor
            .service_radius_miles
            .max(0.0)
            .min(self.config.max_distance_miles);
        let location = factors::location_score(distance_miles, radius)?;

        let weights = if job.urgent {
            self.config.weights.for_urgent_job()
        } else {
            self.config.weights
        };

        let outcomes = [
            (MatchFactor::Location, weights.location, location),
            (
                MatchFactor::Skill,
                weights.skill,
                factors::skill_score(job, contractor),
            ),
            (
                MatchFactor::Availability,
                weights.availability,
                factors::availability_score(contractor, today),
            ),
            (
                MatchFactor::Price,
                weights.price,
                factors::price_score(job, contractor),
            ),
        ];

        let components: Vec<FactorScore> = outcomes
            .into_iter()
            .map(|(factor, weight, outcome)| FactorScore {
                factor,
                score: outcome.score,
                weight,
                weighted: outcome.score * weight,
                notes: outcome.notes,
            })
            .collect();

        let raw_total: f64 = components.iter().map(|component| component.weighted).sum();
        let total_score = (raw_total * 100.0).round() / 100.0;

        Some(MatchResult {
            contractor_id: contractor.id.clone(),
            total_score,
            distance_miles,
            recommendation: MatchRecommendation::from_score(total_score),
            components,
        })
    }

    /// Rank candidates best first, dropping out-of-range and below-threshold matches.
    pub fn rank(
        &self,
        job: &JobPosting,
        candidates: &[ContractorProfile],
        today: NaiveDate,
    ) -> Vec<MatchResult> {
        let mut results: Vec<MatchResult> = candidates
            .iter()
            .filter_map(|contractor| self.score(job, contractor, today))
            .filter(|result| result.total_score >= self.config.minimum_match_score)
            .collect();

        results.sort_by(|a, b| {
            b.total_score
                .total_cmp(&a.total_score)
                .then_with(|| a.distance_miles.total_cmp(&b.distance_miles))
                .then_with(|| a.contractor_id.cmp(&b.contractor_id))
        });
        results.truncate(self.config.max_candidates);
        results
    }
}
