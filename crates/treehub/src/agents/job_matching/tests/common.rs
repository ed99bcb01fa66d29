use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::agents::job_matching::domain::{ContractorProfile, JobPosting};
use crate::agents::job_matching::repository::{
    ContractorDirectory, DirectoryError, MatchNotification, MatchPublisher, PublishError,
};
use crate::agents::job_matching::{
    matching_router, JobMatchingService, MatchScorer, MatchingConfig,
};
use crate::catalog::{ContractorId, JobId, ProfessionalTier, ServiceCategory};
use crate::geo::Coordinates;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 16).expect("valid date")
}

pub(super) fn job_site() -> Coordinates {
    Coordinates::new(41.5868, -93.6250).expect("valid coordinates")
}

/// Point roughly `miles` north of the job site.
pub(super) fn north_of_site(miles: f64) -> Coordinates {
    Coordinates::new(41.5868 + miles / 69.09, -93.6250).expect("valid coordinates")
}

pub(super) fn job() -> JobPosting {
    JobPosting {
        id: JobId::new("job-100"),
        category: ServiceCategory::TreeRemoval,
        location: job_site(),
        zip_code: "50309".to_string(),
        required_skills: vec!["Crane Rigging".to_string(), "climbing".to_string()],
        budget: Some(200_000),
        estimated_hours: 16.0,
        posted_on: today(),
        urgent: false,
    }
}

pub(super) fn contractor(id: &str, miles_away: f64) -> ContractorProfile {
    ContractorProfile {
        id: ContractorId::new(id),
        display_name: format!("Crew {id}"),
        tier: ProfessionalTier::Gold,
        base_location: north_of_site(miles_away),
        service_radius_miles: 40.0,
        skills: vec!["climbing".to_string(), "crane rigging".to_string()],
        certifications: vec!["ISA Certified Arborist".to_string()],
        hourly_rate_cents: 9_500,
        active_jobs: 1,
        max_concurrent_jobs: 4,
        last_active_on: Some(today()),
        jobs_completed_last_30_days: 6,
        average_rating: 4.7,
    }
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig::default()
}

pub(super) fn scorer() -> MatchScorer {
    MatchScorer::new(matching_config()).expect("default config is valid")
}

#[derive(Default, Clone)]
pub(super) struct MemoryDirectory {
    pub(super) contractors: Arc<Mutex<HashMap<ContractorId, ContractorProfile>>>,
}

impl MemoryDirectory {
    pub(super) fn with(contractors: Vec<ContractorProfile>) -> Self {
        let directory = Self::default();
        {
            let mut guard = directory.contractors.lock().expect("directory mutex poisoned");
            for contractor in contractors {
                guard.insert(contractor.id.clone(), contractor);
            }
        }
        directory
    }
}

impl ContractorDirectory for MemoryDirectory {
    fn candidates_near(
        &self,
        location: Coordinates,
        radius_miles: f64,
    ) -> Result<Vec<ContractorProfile>, DirectoryError> {
        let guard = self.contractors.lock().expect("directory mutex poisoned");
        Ok(guard
            .values()
            .filter(|contractor| location.distance_miles(&contractor.base_location) <= radius_miles)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &ContractorId) -> Result<Option<ContractorProfile>, DirectoryError> {
        let guard = self.contractors.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct OfflineDirectory;

impl ContractorDirectory for OfflineDirectory {
    fn candidates_near(
        &self,
        _location: Coordinates,
        _radius_miles: f64,
    ) -> Result<Vec<ContractorProfile>, DirectoryError> {
        Err(DirectoryError::Unavailable("replica lagging".to_string()))
    }

    fn fetch(&self, _id: &ContractorId) -> Result<Option<ContractorProfile>, DirectoryError> {
        Err(DirectoryError::Unavailable("replica lagging".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryPublisher {
    events: Arc<Mutex<Vec<MatchNotification>>>,
}

impl MemoryPublisher {
    pub(super) fn events(&self) -> Vec<MatchNotification> {
        self.events.lock().expect("publisher mutex poisoned").clone()
    }
}

impl MatchPublisher for MemoryPublisher {
    fn publish(&self, notification: MatchNotification) -> Result<(), PublishError> {
        self.events
            .lock()
            .expect("publisher mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct FailingPublisher;

impl MatchPublisher for FailingPublisher {
    fn publish(&self, _notification: MatchNotification) -> Result<(), PublishError> {
        Err(PublishError::Transport("smtp relay down".to_string()))
    }
}

/// Delivers the first `capacity` notifications, then fails.
#[derive(Default)]
pub(super) struct FlakyPublisher {
    pub(super) capacity: usize,
    pub(super) delivered: MemoryPublisher,
}

impl MatchPublisher for FlakyPublisher {
    fn publish(&self, notification: MatchNotification) -> Result<(), PublishError> {
        if self.delivered.events().len() >= self.capacity {
            return Err(PublishError::Transport("queue full".to_string()));
        }
        self.delivered.publish(notification)
    }
}

pub(super) fn build_service(
    contractors: Vec<ContractorProfile>,
) -> (
    JobMatchingService<MemoryDirectory, MemoryPublisher>,
    Arc<MemoryPublisher>,
) {
    let directory = Arc::new(MemoryDirectory::with(contractors));
    let publisher = Arc::new(MemoryPublisher::default());
    let service = JobMatchingService::new(directory, publisher.clone(), matching_config())
        .expect("service builds");
    (service, publisher)
}

pub(super) fn router_with(contractors: Vec<ContractorProfile>) -> axum::Router {
    let (service, _) = build_service(contractors);
    matching_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
