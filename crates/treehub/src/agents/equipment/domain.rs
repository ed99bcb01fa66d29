use serde::{Deserialize, Serialize};

use crate::catalog::EquipmentId;
use crate::geo::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Chipper,
    StumpGrinder,
    BucketTruck,
    Crane,
    Skidsteer,
    ClimbingGear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCondition {
    New,
    Excellent,
    Good,
    Fair,
    Poor,
}

impl EquipmentCondition {
    pub const fn score(self) -> f64 {
        match self {
            EquipmentCondition::New => 100.0,
            EquipmentCondition::Excellent => 85.0,
            EquipmentCondition::Good => 70.0,
            EquipmentCondition::Fair => 45.0,
            EquipmentCondition::Poor => 20.0,
        }
    }
}

/// Rental or sale listing on the equipment exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentListing {
    pub id: EquipmentId,
    pub kind: EquipmentKind,
    pub condition: EquipmentCondition,
    pub year: i32,
    pub engine_hours: u32,
    pub hours_since_service: u32,
    pub asking_price_cents: u64,
    pub market_price_cents: u64,
    pub location: Coordinates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentFactor {
    Condition,
    Age,
    Value,
    Distance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentComponent {
    pub factor: EquipmentFactor,
    pub score: f64,
    pub weight: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaintenanceAlert {
    ServiceOverdue { hours_since_service: u32, interval: u32 },
    ServiceDueSoon { hours_remaining: u32 },
    AgingUnit { age_years: i32 },
    UnknownMarketPrice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentScore {
    pub equipment_id: EquipmentId,
    pub kind: EquipmentKind,
    pub total: f64,
    pub distance_miles: f64,
    pub components: Vec<EquipmentComponent>,
    pub alerts: Vec<MaintenanceAlert>,
}
