use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use super::{dollars_to_cents, empty_string_as_none, reader, ImportError};
use crate::agents::job_matching::ContractorProfile;
use crate::catalog::{ContractorId, ProfessionalTier};
use crate::geo::Coordinates;

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    tier: String,
    latitude: f64,
    longitude: f64,
    radius_miles: f64,
    #[serde(default)]
    skills: String,
    hourly_rate: String,
    #[serde(default)]
    active_jobs: u32,
    max_jobs: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_active: Option<String>,
    #[serde(default)]
    completed_30d: u32,
    #[serde(default)]
    rating: f32,
}

impl RosterRow {
    fn into_profile(self, line: u64) -> Result<ContractorProfile, ImportError> {
        if self.id.is_empty() {
            return Err(ImportError::row(line, "contractor id is empty"));
        }
        let tier: ProfessionalTier = self
            .tier
            .parse()
            .map_err(|reason: String| ImportError::row(line, reason))?;
        let base_location = Coordinates::new(self.latitude, self.longitude)
            .map_err(|err| ImportError::row(line, err.to_string()))?;
        if self.radius_miles.is_nan() || self.radius_miles <= 0.0 {
            return Err(ImportError::row(line, "radius_miles must be positive"));
        }
        if self.max_jobs == 0 {
            return Err(ImportError::row(line, "max_jobs must be at least 1"));
        }
        let hourly_rate_cents = dollars_to_cents(&self.hourly_rate).ok_or_else(|| {
            ImportError::row(line, format!("invalid hourly_rate '{}'", self.hourly_rate))
        })?;
        let last_active_on = match self.last_active.as_deref() {
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ImportError::row(line, format!("invalid last_active date '{raw}'"))
            })?),
            None => None,
        };
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(ImportError::row(line, "rating must be between 0 and 5"));
        }

        let skills = self
            .skills
            .split(';')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ContractorProfile {
            id: ContractorId::new(self.id),
            display_name: self.name,
            tier,
            base_location,
            service_radius_miles: self.radius_miles,
            skills,
            certifications: Vec::new(),
            hourly_rate_cents,
            active_jobs: self.active_jobs,
            max_concurrent_jobs: self.max_jobs,
            last_active_on,
            jobs_completed_last_30_days: self.completed_30d,
            average_rating: self.rating,
        })
    }
}

/// Loads contractor profiles from a roster export.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ContractorProfile>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Vec<ContractorProfile>, ImportError> {
        let mut csv_reader = reader(source);
        let headers = csv_reader.headers()?.clone();
        let mut profiles = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            let row: RosterRow = record
                .deserialize(Some(&headers))
                .map_err(|err| ImportError::row(line, err.to_string()))?;
            profiles.push(row.into_profile(line)?);
        }

        debug!(count = profiles.len(), "roster imported");
        Ok(profiles)
    }
}
