use chrono::NaiveDate;

use super::super::domain::{ContractorProfile, JobPosting};

/// Factor value (0..=100) with the audit note shown to operators.
pub(crate) struct FactorOutcome {
    pub score: f64,
    pub notes: String,
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Linear decay from 100 at the job site to 0 at the effective radius.
///
/// Returns `None` when the contractor is outside the radius.
pub(crate) fn location_score(distance_miles: f64, radius_miles: f64) -> Option<FactorOutcome> {
    if distance_miles > radius_miles {
        return None;
    }

    let score = if radius_miles <= 0.0 {
        100.0
    } else {
        100.0 * (1.0 - distance_miles / radius_miles)
    };

    Some(FactorOutcome {
        score: clamp_score(score),
        notes: format!("{distance_miles:.1} mi from job site within {radius_miles:.0} mi radius"),
    })
}

fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

pub(crate) fn skill_score(job: &JobPosting, contractor: &ContractorProfile) -> FactorOutcome {
    let required: Vec<String> = job
        .required_skills
        .iter()
        .map(|skill| normalize_skill(skill))
        .filter(|skill| !skill.is_empty())
        .collect();

    if required.is_empty() {
        return FactorOutcome {
            score: 100.0,
            notes: "job lists no required skills".to_string(),
        };
    }

    let offered: Vec<String> = contractor
        .skills
        .iter()
        .chain(contractor.certifications.iter())
        .map(|skill| normalize_skill(skill))
        .collect();

    let matched = required
        .iter()
        .filter(|skill| offered.contains(skill))
        .count();

    FactorOutcome {
        score: clamp_score(100.0 * matched as f64 / required.len() as f64),
        notes: format!("{matched} of {} required skill(s) covered", required.len()),
    }
}

fn recency_factor(contractor: &ContractorProfile, today: NaiveDate) -> (f64, String) {
    let (factor, note) = match contractor.last_active_on {
        Some(last_active) => {
            let days = (today - last_active).num_days().max(0);
            let factor = if days <= 1 {
                1.0
            } else if days <= 7 {
                0.85
            } else if days <= 30 {
                0.6
            } else {
                0.3
            };
            (factor, format!("active {days} day(s) ago"))
        }
        None => (0.3, "no recorded activity".to_string()),
    };

    if contractor.jobs_completed_last_30_days >= 1 && factor < 0.6 {
        return (
            0.6,
            format!(
                "{note}, {} job(s) completed in the last 30 days",
                contractor.jobs_completed_last_30_days
            ),
        );
    }

    (factor, note)
}

pub(crate) fn availability_score(
    contractor: &ContractorProfile,
    today: NaiveDate,
) -> FactorOutcome {
    let capacity = if contractor.max_concurrent_jobs == 0
        || contractor.active_jobs >= contractor.max_concurrent_jobs
    {
        0.0
    } else {
        1.0 - contractor.active_jobs as f64 / contractor.max_concurrent_jobs as f64
    };

    let (recency, recency_note) = recency_factor(contractor, today);

    FactorOutcome {
        score: clamp_score(100.0 * capacity * recency),
        notes: format!(
            "{}/{} crews booked, {recency_note}",
            contractor.active_jobs, contractor.max_concurrent_jobs
        ),
    }
}

pub(crate) fn price_score(job: &JobPosting, contractor: &ContractorProfile) -> FactorOutcome {
    let Some(budget) = job.budget else {
        return FactorOutcome {
            score: 50.0,
            notes: "no budget posted; neutral price score".to_string(),
        };
    };

    let cost = contractor.hourly_rate_cents as f64 * job.estimated_hours.max(0.0);
    if budget == 0 {
        let score = if cost > 0.0 { 0.0 } else { 100.0 };
        return FactorOutcome {
            score,
            notes: "job budget is zero".to_string(),
        };
    }

    let ratio = cost / budget as f64;
    let score = if ratio <= 0.8 {
        100.0
    } else if ratio <= 1.0 {
        100.0 - (ratio - 0.8) / 0.2 * 30.0
    } else if ratio <= 1.25 {
        70.0 - (ratio - 1.0) / 0.25 * 50.0
    } else {
        0.0
    };

    FactorOutcome {
        score: clamp_score(score),
        notes: format!(
            "estimated ${:.2} against ${:.2} budget ({:.0}%)",
            cost / 100.0,
            budget as f64 / 100.0,
            ratio * 100.0
        ),
    }
}
