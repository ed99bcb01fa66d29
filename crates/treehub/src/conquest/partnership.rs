use serde::{Deserialize, Serialize};

use super::apply_bps;
use super::commission::CommissionQuote;
use super::tiers::TierBenefits;
use crate::catalog::{ContractorId, PartnershipId, ProfessionalTier};

const MAX_REFERRAL_FEE_BPS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartnershipError {
    #[error("referral fee of {bps} bps exceeds the {max} bps ceiling")]
    FeeTooHigh { bps: u32, max: u32 },
    #[error("a professional cannot partner with themselves")]
    SelfReferral,
    #[error("partnership {0} is inactive")]
    Inactive(PartnershipId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnershipTerms {
    pub referral_fee_bps: u32,
    #[serde(default)]
    pub max_referral_fee_cents: Option<u64>,
}

/// Referral agreement: the referrer hands work to the fulfiller for a fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub id: PartnershipId,
    pub referrer: ContractorId,
    pub fulfiller: ContractorId,
    pub terms: PartnershipTerms,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralSettlement {
    pub referral_fee_cents: u64,
    pub fulfiller_net_cents: u64,
}

impl Partnership {
    pub fn new(
        id: PartnershipId,
        referrer: ContractorId,
        fulfiller: ContractorId,
        terms: PartnershipTerms,
    ) -> Result<Self, PartnershipError> {
        if terms.referral_fee_bps > MAX_REFERRAL_FEE_BPS {
            return Err(PartnershipError::FeeTooHigh {
                bps: terms.referral_fee_bps,
                max: MAX_REFERRAL_FEE_BPS,
            });
        }
        if referrer == fulfiller {
            return Err(PartnershipError::SelfReferral);
        }

        Ok(Self {
            id,
            referrer,
            fulfiller,
            terms,
            active: true,
        })
    }

    /// Both sides must hold a tier that unlocks partnerships.
    pub fn eligible(referrer_tier: ProfessionalTier, fulfiller_tier: ProfessionalTier) -> bool {
        TierBenefits::for_tier(referrer_tier).partnership_eligible
            && TierBenefits::for_tier(fulfiller_tier).partnership_eligible
    }

    /// Split the fulfiller's payout on a referred job.
    pub fn settle_referral(
        &self,
        quote: &CommissionQuote,
    ) -> Result<ReferralSettlement, PartnershipError> {
        if !self.active {
            return Err(PartnershipError::Inactive(self.id.clone()));
        }
        // Terms can arrive through deserialization without passing `new`.
        if self.terms.referral_fee_bps > MAX_REFERRAL_FEE_BPS {
            return Err(PartnershipError::FeeTooHigh {
                bps: self.terms.referral_fee_bps,
                max: MAX_REFERRAL_FEE_BPS,
            });
        }

        let uncapped = apply_bps(quote.contractor_payout_cents, self.terms.referral_fee_bps);
        let referral_fee_cents = match self.terms.max_referral_fee_cents {
            Some(cap) => uncapped.min(cap),
            None => uncapped,
        };

        Ok(ReferralSettlement {
            referral_fee_cents,
            fulfiller_net_cents: quote
                .contractor_payout_cents
                .saturating_sub(referral_fee_cents),
        })
    }
}
