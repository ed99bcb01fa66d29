use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{LeadUrgency, StormEvent, StormLead, StormSeverity};
use crate::catalog::{LeadId, ServiceCategory};
use crate::geo::offset_within;

const UNKNOWN_ZIP: &str = "unknown";

/// Controls how many leads a storm fabricates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadGenerationConfig {
    pub leads_per_severity_level: u32,
    pub max_leads: u32,
    /// Fixed seed for reproducible demos; entropy is used when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for LeadGenerationConfig {
    fn default() -> Self {
        Self {
            leads_per_severity_level: 6,
            max_leads: 60,
            seed: None,
        }
    }
}

impl LeadGenerationConfig {
    pub fn lead_count(&self, severity: StormSeverity) -> u32 {
        severity
            .level()
            .saturating_mul(self.leads_per_severity_level)
            .min(self.max_leads)
    }
}

fn category_mix(severity: StormSeverity) -> &'static [(ServiceCategory, u32)] {
    match severity.level() {
        1 | 2 => &[
            (ServiceCategory::TreeTrimming, 5),
            (ServiceCategory::TreeRemoval, 2),
            (ServiceCategory::PlantHealthCare, 2),
            (ServiceCategory::Consultation, 1),
        ],
        3 => &[
            (ServiceCategory::EmergencyStorm, 4),
            (ServiceCategory::TreeRemoval, 4),
            (ServiceCategory::TreeTrimming, 2),
        ],
        _ => &[
            (ServiceCategory::EmergencyStorm, 6),
            (ServiceCategory::TreeRemoval, 3),
            (ServiceCategory::LandClearing, 1),
        ],
    }
}

/// Dollar range for a lead's estimated value.
pub fn value_range_dollars(severity: StormSeverity) -> (u64, u64) {
    let level = u64::from(severity.level());
    (level * 400, level * 1500)
}

/// Fabricate leads proportional to storm severity.
pub fn generate_leads<R>(
    storm: &StormEvent,
    config: &LeadGenerationConfig,
    rng: &mut R,
) -> Vec<StormLead>
where
    R: Rng + ?Sized,
{
    let count = config.lead_count(storm.severity);
    let mix = category_mix(storm.severity);
    let picker = WeightedIndex::new(mix.iter().map(|(_, weight)| *weight)).ok();
    let (min_value, max_value) = value_range_dollars(storm.severity);
    let urgency = LeadUrgency::for_severity(storm.severity);
    let radius = if storm.radius_miles.is_finite() {
        storm.radius_miles.max(0.0)
    } else {
        0.0
    };

    (0..count)
        .map(|n| {
            let fraction: f64 = rng.gen::<f64>().sqrt();
            let bearing: f64 = rng.gen_range(0.0..360.0);
            let location = offset_within(storm.center, radius, bearing, fraction);

            let zip_code = if storm.affected_zip_codes.is_empty() {
                UNKNOWN_ZIP.to_string()
            } else {
                storm.affected_zip_codes[n as usize % storm.affected_zip_codes.len()].clone()
            };

            let category = match &picker {
                Some(picker) => mix[picker.sample(&mut *rng)].0,
                None => ServiceCategory::EmergencyStorm,
            };
            let dollars = rng.gen_range(min_value..=max_value);

            StormLead {
                id: LeadId(format!("{}-lead-{:03}", storm.id, n + 1)),
                storm_id: storm.id.clone(),
                location,
                zip_code,
                category,
                estimated_value_cents: dollars * 100,
                urgency,
                generated_on: storm.occurred_on,
                synthetic: true,
            }
        })
        .collect()
}
