//! Storm response agent.
//!
//! Fabricates demonstration leads proportional to a storm's severity and
//! alerts crews whose service areas overlap the storm footprint.

mod alerts;
pub mod domain;
mod generator;

#[cfg(test)]
mod tests;

pub use alerts::crew_alerts;
pub use domain::{
    AlertPriority, CrewAlert, LeadUrgency, StormEvent, StormLead, StormResponsePlan,
    StormSeverity,
};
pub use generator::{generate_leads, value_range_dollars, LeadGenerationConfig};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::agents::job_matching::ContractorProfile;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StormError {
    #[error("storm {storm_id} has an invalid footprint: {reason}")]
    InvalidStorm { storm_id: String, reason: String },
}

/// Rule-based agent turning a storm event into leads and crew alerts.
#[derive(Debug, Clone, Default)]
pub struct StormResponseAgent {
    config: LeadGenerationConfig,
}

impl StormResponseAgent {
    pub fn new(config: LeadGenerationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LeadGenerationConfig {
        &self.config
    }

    pub fn validate(storm: &StormEvent) -> Result<(), StormError> {
        let invalid = |reason: &str| StormError::InvalidStorm {
            storm_id: storm.id.0.clone(),
            reason: reason.to_string(),
        };

        if !storm.center.is_valid() {
            return Err(invalid("center coordinates out of range"));
        }
        if !storm.radius_miles.is_finite() || storm.radius_miles < 0.0 {
            return Err(invalid("radius must be a non-negative number of miles"));
        }
        Ok(())
    }

    /// Build a plan using the configured seed, or entropy when none is set.
    pub fn respond(
        &self,
        storm: &StormEvent,
        contractors: &[ContractorProfile],
    ) -> Result<StormResponsePlan, StormError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.respond_with_rng(storm, contractors, &mut rng)
    }

    pub fn respond_with_rng<R>(
        &self,
        storm: &StormEvent,
        contractors: &[ContractorProfile],
        rng: &mut R,
    ) -> Result<StormResponsePlan, StormError>
    where
        R: Rng + ?Sized,
    {
        Self::validate(storm)?;

        let leads = generate_leads(storm, &self.config, rng);
        let alerts = crew_alerts(storm, contractors);
        let projected_value_cents = leads
            .iter()
            .fold(0u64, |total, lead| total.saturating_add(lead.estimated_value_cents));

        info!(
            storm_id = %storm.id,
            severity = storm.severity.label(),
            leads = leads.len(),
            alerts = alerts.len(),
            projected_value_cents,
            "storm response plan generated"
        );

        Ok(StormResponsePlan {
            storm_id: storm.id.clone(),
            severity: storm.severity,
            leads,
            alerts,
            projected_value_cents,
        })
    }
}
