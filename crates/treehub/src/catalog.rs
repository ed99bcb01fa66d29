//! Shared marketplace vocabulary: identifiers, service categories, tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_type!(
    /// Identifier of a posted job.
    JobId
);
id_type!(
    /// Identifier of a tree-care professional or company.
    ContractorId
);
id_type!(StormId);
id_type!(LeadId);
id_type!(TerritoryId);
id_type!(EquipmentId);
id_type!(PartnershipId);

/// Lines of work offered on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    TreeRemoval,
    TreeTrimming,
    StumpGrinding,
    EmergencyStorm,
    LandClearing,
    PlantHealthCare,
    Consultation,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 7] = [
        ServiceCategory::TreeRemoval,
        ServiceCategory::TreeTrimming,
        ServiceCategory::StumpGrinding,
        ServiceCategory::EmergencyStorm,
        ServiceCategory::LandClearing,
        ServiceCategory::PlantHealthCare,
        ServiceCategory::Consultation,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ServiceCategory::TreeRemoval => "tree_removal",
            ServiceCategory::TreeTrimming => "tree_trimming",
            ServiceCategory::StumpGrinding => "stump_grinding",
            ServiceCategory::EmergencyStorm => "emergency_storm",
            ServiceCategory::LandClearing => "land_clearing",
            ServiceCategory::PlantHealthCare => "plant_health_care",
            ServiceCategory::Consultation => "consultation",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        ServiceCategory::ALL
            .into_iter()
            .find(|category| category.label() == normalized)
            .ok_or_else(|| format!("unknown service category '{raw}'"))
    }
}

/// Performance class of a professional. Ordering follows promotion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfessionalTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Elite,
}

impl ProfessionalTier {
    pub const ALL: [ProfessionalTier; 5] = [
        ProfessionalTier::Bronze,
        ProfessionalTier::Silver,
        ProfessionalTier::Gold,
        ProfessionalTier::Platinum,
        ProfessionalTier::Elite,
    ];

    pub const fn next(self) -> Option<ProfessionalTier> {
        match self {
            ProfessionalTier::Bronze => Some(ProfessionalTier::Silver),
            ProfessionalTier::Silver => Some(ProfessionalTier::Gold),
            ProfessionalTier::Gold => Some(ProfessionalTier::Platinum),
            ProfessionalTier::Platinum => Some(ProfessionalTier::Elite),
            ProfessionalTier::Elite => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ProfessionalTier::Bronze => "bronze",
            ProfessionalTier::Silver => "silver",
            ProfessionalTier::Gold => "gold",
            ProfessionalTier::Platinum => "platinum",
            ProfessionalTier::Elite => "elite",
        }
    }
}

impl FromStr for ProfessionalTier {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        ProfessionalTier::ALL
            .into_iter()
            .find(|tier| tier.label() == normalized)
            .ok_or_else(|| format!("unknown tier '{raw}'"))
    }
}
