use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::domain::{ContractorProfile, JobPosting, MatchResult};
use super::repository::{
    ContractorDirectory, DirectoryError, MatchNotification, MatchPublisher, MatchReport,
    PublishError,
};
use super::scoring::{MatchScorer, MatchingConfig, MatchingError};
use crate::catalog::ContractorId;

/// Service composing the contractor directory, the scorer, and match notifications.
pub struct JobMatchingService<D, P> {
    directory: Arc<D>,
    publisher: Arc<P>,
    scorer: MatchScorer,
}

impl<D, P> JobMatchingService<D, P>
where
    D: ContractorDirectory + 'static,
    P: MatchPublisher + 'static,
{
    pub fn new(
        directory: Arc<D>,
        publisher: Arc<P>,
        config: MatchingConfig,
    ) -> Result<Self, MatchingServiceError> {
        let scorer = MatchScorer::new(config)?;
        Ok(Self {
            directory,
            publisher,
            scorer,
        })
    }

    pub fn config(&self) -> &MatchingConfig {
        self.scorer.config()
    }

    /// Rank nearby contractors for a job and notify the strong matches.
    ///
    /// Notifications go out best-first and delivery is at-least-once: if the
    /// publisher fails partway the call errors, the notifications already sent
    /// stay sent, and a retry of the same job sends them again. Publishers
    /// should treat `(job_id, contractor_id)` as the idempotency key.
    pub fn match_job(
        &self,
        job: &JobPosting,
        today: NaiveDate,
    ) -> Result<MatchReport, MatchingServiceError> {
        MatchScorer::validate_job(job)?;

        let candidates = self
            .directory
            .candidates_near(job.location, self.scorer.config().max_distance_miles)?;
        let matches = self.scorer.rank(job, &candidates, today);

        let mut notified = 0;
        for result in matches
            .iter()
            .filter(|result| result.recommendation.is_notifiable())
        {
            self.publisher.publish(MatchNotification {
                job_id: job.id.clone(),
                contractor_id: result.contractor_id.clone(),
                total_score: result.total_score,
                recommendation: result.recommendation,
            })?;
            notified += 1;
        }

        match matches.first() {
            Some(best) => info!(
                job_id = %job.id,
                category = job.category.label(),
                evaluated = candidates.len(),
                matched = matches.len(),
                notified,
                best_contractor = %best.contractor_id,
                best_score = best.total_score,
                "ranked contractors for job"
            ),
            None => warn!(
                job_id = %job.id,
                evaluated = candidates.len(),
                "no contractor met the minimum match score"
            ),
        }

        Ok(MatchReport {
            job_id: job.id.clone(),
            evaluated: candidates.len(),
            matches,
            notified,
        })
    }

    /// Score one known contractor against a job without ranking or notifying.
    pub fn explain(
        &self,
        job: &JobPosting,
        contractor_id: &ContractorId,
        today: NaiveDate,
    ) -> Result<Option<MatchResult>, MatchingServiceError> {
        MatchScorer::validate_job(job)?;
        let contractor: ContractorProfile = self
            .directory
            .fetch(contractor_id)?
            .ok_or_else(|| MatchingServiceError::UnknownContractor(contractor_id.clone()))?;

        let result = self.scorer.score(job, &contractor, today);
        debug!(
            job_id = %job.id,
            contractor_id = %contractor_id,
            in_range = result.is_some(),
            "explained match"
        );
        Ok(result)
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    Matching(#[from] MatchingError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Publish(#[from] PublishError),
    #[error("unknown contractor {0}")]
    UnknownContractor(ContractorId),
}
