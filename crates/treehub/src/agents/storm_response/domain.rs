use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{ContractorId, LeadId, ServiceCategory, StormId};
use crate::geo::Coordinates;

/// Storm intensity on a five step scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StormSeverity {
    Minor,
    Moderate,
    Severe,
    Extreme,
    Catastrophic,
}

impl StormSeverity {
    pub const fn level(self) -> u32 {
        match self {
            StormSeverity::Minor => 1,
            StormSeverity::Moderate => 2,
            StormSeverity::Severe => 3,
            StormSeverity::Extreme => 4,
            StormSeverity::Catastrophic => 5,
        }
    }

    pub fn from_level(level: u32) -> Option<Self> {
        match level {
            1 => Some(StormSeverity::Minor),
            2 => Some(StormSeverity::Moderate),
            3 => Some(StormSeverity::Severe),
            4 => Some(StormSeverity::Extreme),
            5 => Some(StormSeverity::Catastrophic),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            StormSeverity::Minor => "minor",
            StormSeverity::Moderate => "moderate",
            StormSeverity::Severe => "severe",
            StormSeverity::Extreme => "extreme",
            StormSeverity::Catastrophic => "catastrophic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormEvent {
    pub id: StormId,
    pub name: String,
    pub severity: StormSeverity,
    pub center: Coordinates,
    pub radius_miles: f64,
    #[serde(default)]
    pub affected_zip_codes: Vec<String>,
    pub occurred_on: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadUrgency {
    Routine,
    Priority,
    Emergency,
}

impl LeadUrgency {
    pub fn for_severity(severity: StormSeverity) -> Self {
        match severity.level() {
            level if level >= 4 => LeadUrgency::Emergency,
            3 => LeadUrgency::Priority,
            _ => LeadUrgency::Routine,
        }
    }
}

/// Demonstration lead fabricated from a storm footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormLead {
    pub id: LeadId,
    pub storm_id: StormId,
    pub location: Coordinates,
    pub zip_code: String,
    pub category: ServiceCategory,
    pub estimated_value_cents: u64,
    pub urgency: LeadUrgency,
    pub generated_on: NaiveDate,
    pub synthetic: bool,
}

/// Crew alert priority; `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertPriority {
    Critical,
    High,
    Standard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewAlert {
    pub contractor_id: ContractorId,
    pub storm_id: StormId,
    pub priority: AlertPriority,
    pub distance_miles: f64,
    pub suggested_crews: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StormResponsePlan {
    pub storm_id: StormId,
    pub severity: StormSeverity,
    pub leads: Vec<StormLead>,
    pub alerts: Vec<CrewAlert>,
    pub projected_value_cents: u64,
}
