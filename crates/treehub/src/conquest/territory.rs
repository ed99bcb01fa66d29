use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::tiers::TierBenefits;
use crate::agents::storm_response::StormLead;
use crate::catalog::{ContractorId, ProfessionalTier, TerritoryId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerritoryKind {
    Zip,
    Region,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: String,
    pub kind: TerritoryKind,
    pub zip_codes: Vec<String>,
    #[serde(default)]
    pub protected_by: Option<ContractorId>,
    #[serde(default)]
    pub protected_since: Option<NaiveDate>,
}

impl Territory {
    pub fn covers(&self, zip: &str) -> bool {
        let zip = zip.trim();
        self.zip_codes.iter().any(|candidate| candidate == zip)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TerritoryError {
    #[error("unknown territory {0}")]
    UnknownTerritory(TerritoryId),
    #[error("{tier:?} professionals cannot protect territories")]
    TierNotEligible { tier: ProfessionalTier },
    #[error("territory already protected by {holder}")]
    AlreadyProtected { holder: ContractorId },
    #[error("protected territory limit of {max} reached")]
    LimitReached { max: usize },
    #[error("territory is not protected by {0}")]
    NotHolder(ContractorId),
}

/// Where a lead goes: the protecting professional, or the open marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "routing", content = "holder", rename_all = "snake_case")]
pub enum LeadRouting {
    Exclusive(ContractorId),
    OpenMarket,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TerritoryRegistry {
    territories: BTreeMap<TerritoryId, Territory>,
}

impl TerritoryRegistry {
    pub fn new(territories: impl IntoIterator<Item = Territory>) -> Self {
        Self {
            territories: territories
                .into_iter()
                .map(|territory| (territory.id.clone(), territory))
                .collect(),
        }
    }

    pub fn get(&self, id: &TerritoryId) -> Option<&Territory> {
        self.territories.get(id)
    }

    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.values()
    }

    pub fn held_by(&self, contractor_id: &ContractorId) -> usize {
        self.territories
            .values()
            .filter(|territory| territory.protected_by.as_ref() == Some(contractor_id))
            .count()
    }

    /// Grant exclusive protection. Re-claiming a territory already held is a no-op.
    pub fn claim(
        &mut self,
        territory_id: &TerritoryId,
        contractor_id: &ContractorId,
        tier: ProfessionalTier,
        today: NaiveDate,
    ) -> Result<&Territory, TerritoryError> {
        let max = TierBenefits::for_tier(tier).max_protected_territories;
        let held = self.held_by(contractor_id);

        let territory = self
            .territories
            .get_mut(territory_id)
            .ok_or_else(|| TerritoryError::UnknownTerritory(territory_id.clone()))?;

        match &territory.protected_by {
            Some(holder) if holder == contractor_id => return Ok(territory),
            Some(holder) => {
                return Err(TerritoryError::AlreadyProtected {
                    holder: holder.clone(),
                })
            }
            None => {}
        }

        if max == 0 {
            return Err(TerritoryError::TierNotEligible { tier });
        }
        if held >= max {
            return Err(TerritoryError::LimitReached { max });
        }

        territory.protected_by = Some(contractor_id.clone());
        territory.protected_since = Some(today);
        info!(
            territory_id = %territory_id,
            contractor_id = %contractor_id,
            tier = tier.label(),
            "territory protected"
        );
        Ok(territory)
    }

    pub fn release(
        &mut self,
        territory_id: &TerritoryId,
        contractor_id: &ContractorId,
    ) -> Result<(), TerritoryError> {
        let territory = self
            .territories
            .get_mut(territory_id)
            .ok_or_else(|| TerritoryError::UnknownTerritory(territory_id.clone()))?;

        if territory.protected_by.as_ref() != Some(contractor_id) {
            return Err(TerritoryError::NotHolder(contractor_id.clone()));
        }

        territory.protected_by = None;
        territory.protected_since = None;
        Ok(())
    }

    pub fn holder_for_zip(&self, zip: &str) -> Option<&ContractorId> {
        self.territories
            .values()
            .filter(|territory| territory.covers(zip))
            .find_map(|territory| territory.protected_by.as_ref())
    }

    pub fn route_zip(&self, zip: &str) -> LeadRouting {
        match self.holder_for_zip(zip) {
            Some(holder) => LeadRouting::Exclusive(holder.clone()),
            None => LeadRouting::OpenMarket,
        }
    }

    pub fn route_lead(&self, lead: &StormLead) -> LeadRouting {
        self.route_zip(&lead.zip_code)
    }
}
