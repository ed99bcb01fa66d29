use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing::debug;
use treehub::agents::equipment::{EquipmentCondition, EquipmentKind, EquipmentListing};
use treehub::agents::job_matching::{
    ContractorDirectory, ContractorProfile, DirectoryError, MatchNotification, MatchPublisher,
    PublishError,
};
use treehub::catalog::{
    ContractorId, EquipmentId, ProfessionalTier, ServiceCategory, TerritoryId,
};
use treehub::conquest::{Territory, TerritoryKind};
use treehub::geo::Coordinates;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    /// Fallback seed for storm lead generation when a request carries none.
    pub(crate) lead_seed: Option<u64>,
}

/// Roster held in memory; candidate search is a linear haversine scan.
#[derive(Default, Clone)]
pub(crate) struct InMemoryContractorDirectory {
    profiles: Arc<Mutex<Vec<ContractorProfile>>>,
}

impl InMemoryContractorDirectory {
    pub(crate) fn from_profiles(profiles: Vec<ContractorProfile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.profiles.lock().expect("directory mutex poisoned").len()
    }
}

impl ContractorDirectory for InMemoryContractorDirectory {
    fn candidates_near(
        &self,
        location: Coordinates,
        radius_miles: f64,
    ) -> Result<Vec<ContractorProfile>, DirectoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|profile| profile.base_location.distance_miles(&location) <= radius_miles)
            .cloned()
            .collect())
    }

    fn fetch(&self, id: &ContractorId) -> Result<Option<ContractorProfile>, DirectoryError> {
        let guard = self.profiles.lock().expect("directory mutex poisoned");
        Ok(guard.iter().find(|profile| &profile.id == id).cloned())
    }
}

/// Notifications kept in memory before the oldest are dropped.
pub(crate) const MAX_BUFFERED_NOTIFICATIONS: usize = 256;

#[derive(Default, Clone)]
pub(crate) struct InMemoryMatchPublisher {
    events: Arc<Mutex<VecDeque<MatchNotification>>>,
}

impl MatchPublisher for InMemoryMatchPublisher {
    fn publish(&self, notification: MatchNotification) -> Result<(), PublishError> {
        let mut guard = self.events.lock().expect("publisher mutex poisoned");
        if guard.len() >= MAX_BUFFERED_NOTIFICATIONS {
            if let Some(dropped) = guard.pop_front() {
                debug!(
                    job_id = %dropped.job_id,
                    contractor_id = %dropped.contractor_id,
                    "notification buffer full, dropping oldest"
                );
            }
        }
        guard.push_back(notification);
        Ok(())
    }
}

impl InMemoryMatchPublisher {
    pub(crate) fn events(&self) -> Vec<MatchNotification> {
        self.events
            .lock()
            .expect("publisher mutex poisoned")
            .iter()
            .cloned()
            .collect()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_category(raw: &str) -> Result<ServiceCategory, String> {
    raw.parse()
}

pub(crate) fn parse_tier(raw: &str) -> Result<ProfessionalTier, String> {
    raw.parse()
}

pub(crate) fn dollars_to_cents(dollars: f64) -> u64 {
    (dollars.max(0.0) * 100.0).round() as u64
}

pub(crate) fn des_moines() -> Coordinates {
    Coordinates {
        latitude: 41.5868,
        longitude: -93.6250,
    }
}

fn at(latitude: f64, longitude: f64) -> Coordinates {
    Coordinates {
        latitude,
        longitude,
    }
}

/// Small central-Iowa roster used when no CSV is supplied.
pub(crate) fn sample_roster(today: NaiveDate) -> Vec<ContractorProfile> {
    let recent = today.checked_sub_signed(chrono::Duration::days(2));
    let stale = today.checked_sub_signed(chrono::Duration::days(45));

    let profile = |id: &str,
                   name: &str,
                   tier: ProfessionalTier,
                   location: Coordinates,
                   radius: f64,
                   skills: &[&str],
                   rate_cents: u64,
                   load: (u32, u32),
                   last_active: Option<NaiveDate>,
                   completed: u32,
                   rating: f32| ContractorProfile {
        id: ContractorId::new(id),
        display_name: name.to_string(),
        tier,
        base_location: location,
        service_radius_miles: radius,
        skills: skills.iter().map(|skill| skill.to_string()).collect(),
        certifications: Vec::new(),
        hourly_rate_cents: rate_cents,
        active_jobs: load.0,
        max_concurrent_jobs: load.1,
        last_active_on: last_active,
        jobs_completed_last_30_days: completed,
        average_rating: rating,
    };

    vec![
        profile(
            "c-oak-ash",
            "Oak & Ash Tree Co",
            ProfessionalTier::Gold,
            at(41.6005, -93.6091),
            35.0,
            &["tree removal", "crane work", "storm cleanup"],
            9_500,
            (1, 4),
            recent,
            18,
            4.8,
        ),
        profile(
            "c-cedar-crew",
            "Cedar Crew Arborists",
            ProfessionalTier::Platinum,
            at(41.6611, -93.7360),
            40.0,
            &["tree trimming", "tree removal", "plant health care"],
            11_000,
            (3, 5),
            recent,
            27,
            4.9,
        ),
        profile(
            "c-stump-bros",
            "Stump Bros",
            ProfessionalTier::Bronze,
            at(41.5250, -93.6000),
            20.0,
            &["stump grinding"],
            6_000,
            (0, 2),
            stale,
            0,
            4.1,
        ),
        profile(
            "c-ridge-line",
            "Ridge Line Land Clearing",
            ProfessionalTier::Silver,
            at(41.7400, -93.4500),
            50.0,
            &["land clearing", "tree removal"],
            8_000,
            (2, 3),
            recent,
            6,
            4.4,
        ),
        profile(
            "c-ames-canopy",
            "Ames Canopy Care",
            ProfessionalTier::Elite,
            at(42.0308, -93.6319),
            45.0,
            &["tree removal", "storm cleanup", "crane work", "tree trimming"],
            12_500,
            (1, 6),
            recent,
            41,
            4.95,
        ),
    ]
}

pub(crate) fn sample_equipment() -> Vec<EquipmentListing> {
    let listing = |id: &str,
                   kind: EquipmentKind,
                   condition: EquipmentCondition,
                   year: i32,
                   hours: (u32, u32),
                   prices: (u64, u64),
                   location: Coordinates| EquipmentListing {
        id: EquipmentId::new(id),
        kind,
        condition,
        year,
        engine_hours: hours.0,
        hours_since_service: hours.1,
        asking_price_cents: prices.0,
        market_price_cents: prices.1,
        location,
    };

    vec![
        listing(
            "eq-chipper-12",
            EquipmentKind::Chipper,
            EquipmentCondition::Good,
            2019,
            (1_800, 120),
            (2_850_000, 3_200_000),
            at(41.62, -93.58),
        ),
        listing(
            "eq-bucket-60",
            EquipmentKind::BucketTruck,
            EquipmentCondition::Fair,
            2012,
            (6_400, 240),
            (6_900_000, 6_500_000),
            at(41.88, -93.10),
        ),
        listing(
            "eq-crane-28",
            EquipmentKind::Crane,
            EquipmentCondition::Excellent,
            2021,
            (900, 40),
            (18_500_000, 21_000_000),
            at(42.03, -93.63),
        ),
        listing(
            "eq-grinder-35",
            EquipmentKind::StumpGrinder,
            EquipmentCondition::Poor,
            2004,
            (4_100, 310),
            (650_000, 0),
            at(41.52, -93.60),
        ),
    ]
}

pub(crate) fn sample_territories() -> Vec<Territory> {
    let territory = |id: &str, name: &str, kind: TerritoryKind, zips: &[&str]| Territory {
        id: TerritoryId::new(id),
        name: name.to_string(),
        kind,
        zip_codes: zips.iter().map(|zip| zip.to_string()).collect(),
        protected_by: None,
        protected_since: None,
    };

    vec![
        territory(
            "t-downtown-dsm",
            "Downtown Des Moines",
            TerritoryKind::Zip,
            &["50309"],
        ),
        territory(
            "t-west-metro",
            "West Metro",
            TerritoryKind::Region,
            &["50265", "50266", "50325"],
        ),
        territory("t-ames", "Ames", TerritoryKind::Region, &["50010", "50014"]),
    ]
}
