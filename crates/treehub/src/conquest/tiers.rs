use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ProfessionalTier;

/// One calendar month of a professional's marketplace performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    /// First day of the month being summarised.
    pub month: NaiveDate,
    pub jobs_completed: u32,
    pub average_rating: f32,
    pub revenue_cents: u64,
    pub response_rate: f32,
    pub cancellation_rate: f32,
}

/// Static monthly thresholds a professional must average to hold a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub tier: ProfessionalTier,
    pub min_jobs_completed: u32,
    pub min_average_rating: f32,
    pub min_revenue_cents: u64,
    pub min_response_rate: f32,
    pub max_cancellation_rate: f32,
}

impl TierThresholds {
    pub const fn for_tier(tier: ProfessionalTier) -> Self {
        match tier {
            ProfessionalTier::Bronze => Self {
                tier,
                min_jobs_completed: 0,
                min_average_rating: 0.0,
                min_revenue_cents: 0,
                min_response_rate: 0.0,
                max_cancellation_rate: 1.0,
            },
            ProfessionalTier::Silver => Self {
                tier,
                min_jobs_completed: 5,
                min_average_rating: 4.0,
                min_revenue_cents: 250_000,
                min_response_rate: 0.70,
                max_cancellation_rate: 0.15,
            },
            ProfessionalTier::Gold => Self {
                tier,
                min_jobs_completed: 15,
                min_average_rating: 4.3,
                min_revenue_cents: 1_000_000,
                min_response_rate: 0.80,
                max_cancellation_rate: 0.10,
            },
            ProfessionalTier::Platinum => Self {
                tier,
                min_jobs_completed: 30,
                min_average_rating: 4.6,
                min_revenue_cents: 2_500_000,
                min_response_rate: 0.90,
                max_cancellation_rate: 0.06,
            },
            ProfessionalTier::Elite => Self {
                tier,
                min_jobs_completed: 50,
                min_average_rating: 4.8,
                min_revenue_cents: 5_000_000,
                min_response_rate: 0.95,
                max_cancellation_rate: 0.03,
            },
        }
    }

    /// Criteria the averages fail to meet, empty when the tier is held.
    pub fn gaps(&self, metrics: &RollingMetrics) -> Vec<ThresholdGap> {
        let mut gaps = Vec::new();
        let mut check = |criterion, required: f64, actual: f64, met: bool| {
            if !met {
                gaps.push(ThresholdGap {
                    criterion,
                    required,
                    actual,
                });
            }
        };

        check(
            TierCriterion::JobsCompleted,
            f64::from(self.min_jobs_completed),
            metrics.jobs_completed,
            metrics.jobs_completed >= f64::from(self.min_jobs_completed),
        );
        check(
            TierCriterion::AverageRating,
            f64::from(self.min_average_rating),
            metrics.average_rating,
            metrics.average_rating >= f64::from(self.min_average_rating),
        );
        check(
            TierCriterion::Revenue,
            self.min_revenue_cents as f64,
            metrics.revenue_cents,
            metrics.revenue_cents >= self.min_revenue_cents as f64,
        );
        check(
            TierCriterion::ResponseRate,
            f64::from(self.min_response_rate),
            metrics.response_rate,
            metrics.response_rate >= f64::from(self.min_response_rate),
        );
        check(
            TierCriterion::CancellationRate,
            f64::from(self.max_cancellation_rate),
            metrics.cancellation_rate,
            metrics.cancellation_rate <= f64::from(self.max_cancellation_rate),
        );

        gaps
    }

    pub fn is_met_by(&self, metrics: &RollingMetrics) -> bool {
        self.gaps(metrics).is_empty()
    }
}

/// Platform benefits unlocked by each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBenefits {
    pub tier: ProfessionalTier,
    pub commission_discount_bps: u32,
    pub lead_priority_boost: u8,
    pub max_protected_territories: usize,
    pub partnership_eligible: bool,
}

impl TierBenefits {
    pub const fn for_tier(tier: ProfessionalTier) -> Self {
        let (commission_discount_bps, lead_priority_boost, max_protected_territories) = match tier
        {
            ProfessionalTier::Bronze => (0, 0, 0),
            ProfessionalTier::Silver => (50, 5, 0),
            ProfessionalTier::Gold => (100, 10, 1),
            ProfessionalTier::Platinum => (150, 15, 3),
            ProfessionalTier::Elite => (200, 25, 5),
        };

        Self {
            tier,
            commission_discount_bps,
            lead_priority_boost,
            max_protected_territories,
            partnership_eligible: matches!(
                tier,
                ProfessionalTier::Gold | ProfessionalTier::Platinum | ProfessionalTier::Elite
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierCriterion {
    JobsCompleted,
    AverageRating,
    Revenue,
    ResponseRate,
    CancellationRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdGap {
    pub criterion: TierCriterion,
    pub required: f64,
    pub actual: f64,
}

/// Averages over the evaluation window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RollingMetrics {
    pub months: usize,
    pub jobs_completed: f64,
    /// Job-weighted mean rating; plain mean when no jobs were completed.
    pub average_rating: f64,
    pub revenue_cents: f64,
    pub response_rate: f64,
    pub cancellation_rate: f64,
}

impl RollingMetrics {
    pub fn from_window(window: &[MonthlyPerformance]) -> Self {
        if window.is_empty() {
            return Self::default();
        }

        let months = window.len() as f64;
        let total_jobs: f64 = window.iter().map(|m| f64::from(m.jobs_completed)).sum();
        let average_rating = if total_jobs > 0.0 {
            window
                .iter()
                .map(|m| f64::from(m.average_rating) * f64::from(m.jobs_completed))
                .sum::<f64>()
                / total_jobs
        } else {
            window.iter().map(|m| f64::from(m.average_rating)).sum::<f64>() / months
        };

        Self {
            months: window.len(),
            jobs_completed: total_jobs / months,
            average_rating,
            revenue_cents: window.iter().map(|m| m.revenue_cents as f64).sum::<f64>() / months,
            response_rate: window.iter().map(|m| f64::from(m.response_rate)).sum::<f64>() / months,
            cancellation_rate: window
                .iter()
                .map(|m| f64::from(m.cancellation_rate))
                .sum::<f64>()
                / months,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EvaluationNote {
    InsufficientHistory { months: usize, required: usize },
    BelowCurrentTier { tier: ProfessionalTier },
    TopTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierEvaluation {
    pub current: ProfessionalTier,
    /// Highest tier whose thresholds the rolling averages meet.
    pub qualified: ProfessionalTier,
    pub promotion_eligible: bool,
    /// Next tier when promotion is eligible; promotion moves one step at a time.
    pub recommended: Option<ProfessionalTier>,
    pub at_risk: bool,
    pub metrics: RollingMetrics,
    /// Unmet criteria for the tier above `current`.
    pub gaps: Vec<ThresholdGap>,
    pub notes: Vec<EvaluationNote>,
}

/// Compares rolling monthly performance against the static tier thresholds.
#[derive(Debug, Clone)]
pub struct TierEngine {
    window_months: usize,
}

impl Default for TierEngine {
    fn default() -> Self {
        Self { window_months: 3 }
    }
}

impl TierEngine {
    pub fn new(window_months: usize) -> Self {
        Self {
            window_months: window_months.max(1),
        }
    }

    pub fn window_months(&self) -> usize {
        self.window_months
    }

    pub fn evaluate(
        &self,
        current: ProfessionalTier,
        history: &[MonthlyPerformance],
    ) -> TierEvaluation {
        let mut ordered: Vec<MonthlyPerformance> = history
            .iter()
            .cloned()
            .map(|mut record| {
                record.month = record.month.with_day(1).unwrap_or(record.month);
                record
            })
            .collect();
        // Stable sort: among reports for one month, input order is kept.
        ordered.sort_by_key(|record| record.month);
        ordered.dedup_by(|later, earlier| {
            // Keep the last record reported for a month.
            if later.month == earlier.month {
                *earlier = later.clone();
                true
            } else {
                false
            }
        });

        let start = ordered.len().saturating_sub(self.window_months);
        let window = &ordered[start..];
        let metrics = RollingMetrics::from_window(window);
        let mut notes = Vec::new();

        let qualified = if window.is_empty() {
            ProfessionalTier::Bronze
        } else {
            ProfessionalTier::ALL
                .into_iter()
                .rev()
                .find(|tier| TierThresholds::for_tier(*tier).is_met_by(&metrics))
                .unwrap_or(ProfessionalTier::Bronze)
        };

        let window_full = window.len() >= self.window_months;
        if !window_full {
            notes.push(EvaluationNote::InsufficientHistory {
                months: window.len(),
                required: self.window_months,
            });
        }

        let at_risk = !window.is_empty() && qualified < current;
        if at_risk {
            notes.push(EvaluationNote::BelowCurrentTier { tier: current });
        }

        let next = current.next();
        if next.is_none() {
            notes.push(EvaluationNote::TopTier);
        }

        let promotion_eligible = window_full && next.is_some_and(|next| qualified >= next);
        let gaps = next
            .map(|next| TierThresholds::for_tier(next).gaps(&metrics))
            .unwrap_or_default();

        debug!(
            current = current.label(),
            qualified = qualified.label(),
            months = window.len(),
            promotion_eligible,
            at_risk,
            "tier evaluation"
        );

        TierEvaluation {
            current,
            qualified,
            promotion_eligible,
            recommended: if promotion_eligible { next } else { None },
            at_risk,
            metrics,
            gaps,
            notes,
        }
    }
}
