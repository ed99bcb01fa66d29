//! Market conquest business rules: commissions, tiers, territories, partnerships.
//!
//! Money is carried in integer cents and rates in basis points so every
//! calculation is exact and reproducible.

pub mod commission;
pub mod partnership;
pub mod territory;
pub mod tiers;

pub use commission::{
    CategoryRevenue, CategoryTerms, CommissionError, CommissionQuote, CommissionSchedule,
    RevenueProjection,
};
pub use partnership::{Partnership, PartnershipError, PartnershipTerms, ReferralSettlement};
pub use territory::{LeadRouting, Territory, TerritoryError, TerritoryKind, TerritoryRegistry};
pub use tiers::{
    EvaluationNote, MonthlyPerformance, RollingMetrics, ThresholdGap, TierBenefits, TierCriterion,
    TierEngine, TierEvaluation, TierThresholds,
};

pub const BASIS_POINTS: u32 = 10_000;

/// `amount * bps / 10_000`, rounded half up and saturating at `u64::MAX`.
pub fn apply_bps(amount_cents: u64, bps: u32) -> u64 {
    let scaled = u128::from(amount_cents) * u128::from(bps) + u128::from(BASIS_POINTS / 2);
    let value = scaled / u128::from(BASIS_POINTS);
    u64::try_from(value).unwrap_or(u64::MAX)
}
