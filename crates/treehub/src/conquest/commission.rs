use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::tiers::TierBenefits;
use super::{apply_bps, BASIS_POINTS};
use crate::catalog::{ProfessionalTier, ServiceCategory};

const DEFAULT_FLOOR_BPS: u32 = 500;
const DEFAULT_PROCESSING_FEE_BPS: u32 = 290;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommissionError {
    #[error("no commission terms configured for {0:?}")]
    UnknownCategory(ServiceCategory),
    #[error("rate of {bps} bps exceeds 100%")]
    InvalidRate { bps: u32 },
}

/// Commission rate and contractor margin assumption for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTerms {
    pub commission_bps: u32,
    pub margin_bps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionSchedule {
    terms: BTreeMap<ServiceCategory, CategoryTerms>,
    floor_bps: u32,
    processing_fee_bps: u32,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        let terms = [
            (ServiceCategory::TreeRemoval, 1_000, 4_000),
            (ServiceCategory::TreeTrimming, 1_200, 4_500),
            (ServiceCategory::StumpGrinding, 1_500, 5_500),
            (ServiceCategory::EmergencyStorm, 800, 3_500),
            (ServiceCategory::LandClearing, 1_000, 3_000),
            (ServiceCategory::PlantHealthCare, 1_500, 5_000),
            (ServiceCategory::Consultation, 2_000, 7_000),
        ]
        .into_iter()
        .map(|(category, commission_bps, margin_bps)| {
            (
                category,
                CategoryTerms {
                    commission_bps,
                    margin_bps,
                },
            )
        })
        .collect();

        Self {
            terms,
            floor_bps: DEFAULT_FLOOR_BPS,
            processing_fee_bps: DEFAULT_PROCESSING_FEE_BPS,
        }
    }
}

impl CommissionSchedule {
    pub fn empty(floor_bps: u32, processing_fee_bps: u32) -> Result<Self, CommissionError> {
        validate_bps(floor_bps)?;
        validate_bps(processing_fee_bps)?;
        Ok(Self {
            terms: BTreeMap::new(),
            floor_bps,
            processing_fee_bps,
        })
    }

    pub fn with_category(
        mut self,
        category: ServiceCategory,
        terms: CategoryTerms,
    ) -> Result<Self, CommissionError> {
        validate_bps(terms.commission_bps)?;
        validate_bps(terms.margin_bps)?;
        self.terms.insert(category, terms);
        Ok(self)
    }

    pub fn terms(&self, category: ServiceCategory) -> Result<CategoryTerms, CommissionError> {
        self.terms
            .get(&category)
            .copied()
            .ok_or(CommissionError::UnknownCategory(category))
    }

    /// Category rate less the tier discount, never below the floor.
    pub fn effective_rate_bps(
        &self,
        category: ServiceCategory,
        tier: ProfessionalTier,
    ) -> Result<u32, CommissionError> {
        let base = self.terms(category)?.commission_bps;
        let discount = TierBenefits::for_tier(tier).commission_discount_bps;
        let floor = self.floor_bps.min(base);
        Ok(base.saturating_sub(discount).max(floor))
    }

    pub fn quote(
        &self,
        category: ServiceCategory,
        tier: ProfessionalTier,
        job_value_cents: u64,
    ) -> Result<CommissionQuote, CommissionError> {
        let terms = self.terms(category)?;
        // Deserialized schedules bypass the builder checks.
        validate_bps(terms.commission_bps)?;
        validate_bps(terms.margin_bps)?;
        validate_bps(self.processing_fee_bps)?;
        let rate_bps = self.effective_rate_bps(category, tier)?;

        let commission_cents = apply_bps(job_value_cents, rate_bps);
        let contractor_payout_cents = job_value_cents.saturating_sub(commission_cents);
        let projected_margin_cents = apply_bps(contractor_payout_cents, terms.margin_bps);
        let processing_cost_cents = apply_bps(job_value_cents, self.processing_fee_bps);
        let platform_net_cents = commission_cents.saturating_sub(processing_cost_cents);

        Ok(CommissionQuote {
            category,
            tier,
            job_value_cents,
            rate_bps,
            commission_cents,
            contractor_payout_cents,
            projected_margin_cents,
            processing_cost_cents,
            platform_net_cents,
        })
    }

    /// Aggregate quotes for a book of jobs, per category and overall.
    pub fn project_revenue(
        &self,
        jobs: &[(ServiceCategory, ProfessionalTier, u64)],
    ) -> Result<RevenueProjection, CommissionError> {
        let mut projection = RevenueProjection::default();
        for &(category, tier, value) in jobs {
            let quote = self.quote(category, tier, value)?;
            projection
                .by_category
                .entry(category)
                .or_default()
                .absorb(&quote);
            projection.totals.absorb(&quote);
        }
        Ok(projection)
    }
}

fn validate_bps(bps: u32) -> Result<(), CommissionError> {
    if bps > BASIS_POINTS {
        Err(CommissionError::InvalidRate { bps })
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionQuote {
    pub category: ServiceCategory,
    pub tier: ProfessionalTier,
    pub job_value_cents: u64,
    pub rate_bps: u32,
    pub commission_cents: u64,
    pub contractor_payout_cents: u64,
    pub projected_margin_cents: u64,
    pub processing_cost_cents: u64,
    pub platform_net_cents: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub jobs: u32,
    pub gross_cents: u64,
    pub commission_cents: u64,
    pub contractor_payout_cents: u64,
    pub projected_margin_cents: u64,
    pub platform_net_cents: u64,
}

impl CategoryRevenue {
    fn absorb(&mut self, quote: &CommissionQuote) {
        self.jobs = self.jobs.saturating_add(1);
        self.gross_cents = self.gross_cents.saturating_add(quote.job_value_cents);
        self.commission_cents = self.commission_cents.saturating_add(quote.commission_cents);
        self.contractor_payout_cents = self
            .contractor_payout_cents
            .saturating_add(quote.contractor_payout_cents);
        self.projected_margin_cents = self
            .projected_margin_cents
            .saturating_add(quote.projected_margin_cents);
        self.platform_net_cents = self.platform_net_cents.saturating_add(quote.platform_net_cents);
    }

    /// Blended commission rate in basis points, zero when no revenue was booked.
    pub fn blended_rate_bps(&self) -> u32 {
        if self.gross_cents == 0 {
            return 0;
        }
        let rate = u128::from(self.commission_cents) * u128::from(BASIS_POINTS)
            / u128::from(self.gross_cents);
        u32::try_from(rate).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueProjection {
    pub by_category: BTreeMap<ServiceCategory, CategoryRevenue>,
    pub totals: CategoryRevenue,
}
