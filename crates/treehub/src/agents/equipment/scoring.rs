use serde::{Deserialize, Serialize};

use super::domain::{
    EquipmentComponent, EquipmentFactor, EquipmentKind, EquipmentListing, EquipmentScore,
    MaintenanceAlert,
};
use crate::catalog::ServiceCategory;
use crate::geo::Coordinates;

const CONDITION_WEIGHT: f64 = 0.35;
const AGE_WEIGHT: f64 = 0.20;
const VALUE_WEIGHT: f64 = 0.30;
const DISTANCE_WEIGHT: f64 = 0.15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentConfig {
    pub service_interval_hours: u32,
    pub max_age_years: i32,
    pub max_distance_miles: f64,
}

impl Default for EquipmentConfig {
    fn default() -> Self {
        Self {
            service_interval_hours: 250,
            max_age_years: 20,
            max_distance_miles: 150.0,
        }
    }
}

fn linear_decay(value: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return if value <= 0.0 { 100.0 } else { 0.0 };
    }
    (100.0 * (1.0 - value / limit)).clamp(0.0, 100.0)
}

fn value_score(asking: u64, market: u64) -> (f64, String) {
    if market == 0 {
        return (0.0, "no market reference price".to_string());
    }

    let ratio = asking as f64 / market as f64;
    let score = if ratio <= 1.0 {
        let discount = 1.0 - ratio;
        (70.0 + 30.0 * discount / 0.2).min(100.0)
    } else {
        // Decays to zero at 150% of market.
        (70.0 * (1.0 - (ratio - 1.0) / 0.5)).max(0.0)
    };

    (score, format!("asking {:.0}% of market", ratio * 100.0))
}

fn maintenance_alerts(
    listing: &EquipmentListing,
    age_years: i32,
    config: &EquipmentConfig,
) -> Vec<MaintenanceAlert> {
    let mut alerts = Vec::new();
    let interval = config.service_interval_hours;

    if interval > 0 && listing.hours_since_service >= interval {
        alerts.push(MaintenanceAlert::ServiceOverdue {
            hours_since_service: listing.hours_since_service,
            interval,
        });
    } else if interval > 0 && u64::from(listing.hours_since_service) * 10 >= u64::from(interval) * 8
    {
        alerts.push(MaintenanceAlert::ServiceDueSoon {
            hours_remaining: interval - listing.hours_since_service,
        });
    }

    if age_years > config.max_age_years {
        alerts.push(MaintenanceAlert::AgingUnit { age_years });
    }
    if listing.market_price_cents == 0 {
        alerts.push(MaintenanceAlert::UnknownMarketPrice);
    }

    alerts
}

pub fn score_listing(
    listing: &EquipmentListing,
    buyer_location: Coordinates,
    current_year: i32,
    config: &EquipmentConfig,
) -> EquipmentScore {
    let age_years = (current_year - listing.year).max(0);
    let distance_miles = buyer_location.distance_miles(&listing.location);
    let (value, value_notes) = value_score(listing.asking_price_cents, listing.market_price_cents);

    let components = vec![
        EquipmentComponent {
            factor: EquipmentFactor::Condition,
            score: listing.condition.score(),
            weight: CONDITION_WEIGHT,
            notes: format!("{:?} condition", listing.condition).to_lowercase(),
        },
        EquipmentComponent {
            factor: EquipmentFactor::Age,
            score: linear_decay(f64::from(age_years), f64::from(config.max_age_years)),
            weight: AGE_WEIGHT,
            notes: format!("{age_years} year(s) old, {} engine hours", listing.engine_hours),
        },
        EquipmentComponent {
            factor: EquipmentFactor::Value,
            score: value,
            weight: VALUE_WEIGHT,
            notes: value_notes,
        },
        EquipmentComponent {
            factor: EquipmentFactor::Distance,
            score: linear_decay(distance_miles, config.max_distance_miles),
            weight: DISTANCE_WEIGHT,
            notes: format!("{distance_miles:.1} mi away"),
        },
    ];

    let total: f64 = components
        .iter()
        .map(|component| component.score * component.weight)
        .sum();

    EquipmentScore {
        equipment_id: listing.id.clone(),
        kind: listing.kind,
        total: (total * 100.0).round() / 100.0,
        distance_miles,
        components,
        alerts: maintenance_alerts(listing, age_years, config),
    }
}

/// Equipment kinds a crew needs on site for a category of work.
pub fn required_equipment(category: ServiceCategory) -> &'static [EquipmentKind] {
    match category {
        ServiceCategory::TreeRemoval => &[
            EquipmentKind::Chipper,
            EquipmentKind::BucketTruck,
            EquipmentKind::Crane,
        ],
        ServiceCategory::StumpGrinding => &[EquipmentKind::StumpGrinder],
        ServiceCategory::LandClearing => &[EquipmentKind::Skidsteer, EquipmentKind::Chipper],
        ServiceCategory::TreeTrimming => &[EquipmentKind::ClimbingGear, EquipmentKind::Chipper],
        ServiceCategory::EmergencyStorm => &[EquipmentKind::Chipper, EquipmentKind::Crane],
        ServiceCategory::PlantHealthCare | ServiceCategory::Consultation => &[],
    }
}

/// Score listings relevant to a job category, best first.
pub fn recommend_for_job(
    category: ServiceCategory,
    listings: &[EquipmentListing],
    buyer_location: Coordinates,
    current_year: i32,
    config: &EquipmentConfig,
) -> Vec<EquipmentScore> {
    let wanted = required_equipment(category);
    let mut scores: Vec<EquipmentScore> = listings
        .iter()
        .filter(|listing| wanted.contains(&listing.kind))
        .map(|listing| score_listing(listing, buyer_location, current_year, config))
        .collect();

    scores.sort_by(|a, b| {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.equipment_id.cmp(&b.equipment_id))
    });
    scores
}
