use super::common::*;
use crate::agents::job_matching::{
    MatchFactor, MatchRecommendation, MatchScorer, MatchWeights, MatchingConfig, MatchingError,
};
use chrono::Duration;

fn factor_score(result: &crate::agents::job_matching::MatchResult, factor: MatchFactor) -> f64 {
    result.component(factor).expect("factor recorded").score
}

#[test]
fn strong_nearby_crew_scores_excellent() {
    let result = scorer()
        .score(&job(), &contractor("c-1", 5.0), today())
        .expect("within radius");

    assert!((result.distance_miles - 5.0).abs() < 0.1);
    assert!((factor_score(&result, MatchFactor::Location) - 87.5).abs() < 0.5);
    assert_eq!(factor_score(&result, MatchFactor::Skill), 100.0);
    assert_eq!(factor_score(&result, MatchFactor::Availability), 75.0);
    assert_eq!(factor_score(&result, MatchFactor::Price), 100.0);
    assert!((result.total_score - 90.6).abs() < 0.2, "{}", result.total_score);
    assert_eq!(result.recommendation, MatchRecommendation::Excellent);
    assert_eq!(result.components.len(), 4);
}

#[test]
fn contractors_outside_their_radius_are_ineligible() {
    let mut far = contractor("c-far", 30.0);
    far.service_radius_miles = 20.0;

    assert!(scorer().score(&job(), &far, today()).is_none());
}

#[test]
fn global_distance_cap_overrides_wide_service_radius() {
    let mut wide = contractor("c-wide", 60.0);
    wide.service_radius_miles = 200.0;

    assert!(scorer().score(&job(), &wide, today()).is_none());
}

#[test]
fn skill_overlap_is_case_insensitive_and_counts_certifications() {
    let mut posting = job();
    posting.required_skills = vec![
        "  CLIMBING ".to_string(),
        "isa certified arborist".to_string(),
        "bucket truck".to_string(),
        "crane rigging".to_string(),
    ];

    let result = scorer()
        .score(&posting, &contractor("c-1", 1.0), today())
        .expect("within radius");

    assert_eq!(factor_score(&result, MatchFactor::Skill), 75.0);
}

#[test]
fn booked_out_contractors_have_no_availability() {
    let mut busy = contractor("c-busy", 2.0);
    busy.active_jobs = 4;

    let result = scorer().score(&job(), &busy, today()).expect("within radius");

    assert_eq!(factor_score(&result, MatchFactor::Availability), 0.0);
}

#[test]
fn recent_completions_soften_stale_activity() {
    let mut stale = contractor("c-stale", 2.0);
    stale.active_jobs = 0;
    stale.last_active_on = Some(today() - Duration::days(90));
    stale.jobs_completed_last_30_days = 0;

    let idle = scorer().score(&job(), &stale, today()).expect("within radius");
    assert!((factor_score(&idle, MatchFactor::Availability) - 30.0).abs() < 1e-9);

    stale.jobs_completed_last_30_days = 2;
    let working = scorer().score(&job(), &stale, today()).expect("within radius");
    assert!((factor_score(&working, MatchFactor::Availability) - 60.0).abs() < 1e-9);
}

#[test]
fn price_score_follows_budget_ratio_bands() {
    let mut pricey = contractor("c-price", 2.0);
    let mut posting = job();

    // 16h at $125 = $2,000, exactly on budget.
    pricey.hourly_rate_cents = 12_500;
    let on_budget = scorer().score(&posting, &pricey, today()).expect("in range");
    assert!((factor_score(&on_budget, MatchFactor::Price) - 70.0).abs() < 1e-9);

    // $3,000 against $2,000 is far over budget.
    pricey.hourly_rate_cents = 18_750;
    let over = scorer().score(&posting, &pricey, today()).expect("in range");
    assert_eq!(factor_score(&over, MatchFactor::Price), 0.0);

    posting.budget = None;
    let neutral = scorer().score(&posting, &pricey, today()).expect("in range");
    assert_eq!(factor_score(&neutral, MatchFactor::Price), 50.0);
}

#[test]
fn urgent_jobs_double_the_availability_weight() {
    let weights = MatchWeights::default().for_urgent_job();

    assert!((weights.sum() - 1.0).abs() < 1e-9);
    assert!((weights.availability - 0.4 / 1.2).abs() < 1e-9);

    let mut posting = job();
    posting.urgent = true;
    let result = scorer()
        .score(&posting, &contractor("c-1", 3.0), today())
        .expect("in range");
    let availability = result
        .component(MatchFactor::Availability)
        .expect("availability recorded");
    assert!((availability.weight - 0.4 / 1.2).abs() < 1e-9);
}

#[test]
fn rank_orders_by_score_then_distance_then_id() {
    let candidates = vec![
        contractor("c-b", 10.0),
        contractor("c-near", 2.0),
        contractor("c-a", 10.0),
        contractor("c-out", 80.0),
    ];

    let ranked = scorer().rank(&job(), &candidates, today());
    let ids: Vec<&str> = ranked.iter().map(|result| result.contractor_id.as_str()).collect();

    assert_eq!(ids, vec!["c-near", "c-a", "c-b"]);
}

#[test]
fn rank_drops_weak_matches_and_truncates() {
    let mut weak = contractor("c-weak", 35.0);
    weak.skills.clear();
    weak.certifications.clear();
    weak.active_jobs = 4;
    weak.hourly_rate_cents = 50_000;

    let mut config = MatchingConfig {
        max_candidates: 2,
        ..MatchingConfig::default()
    };
    let mut candidates = vec![weak];
    candidates.extend((0..4).map(|n| contractor(&format!("c-{n}"), 1.0 + n as f64)));

    let ranked = MatchScorer::new(config.clone())
        .expect("valid config")
        .rank(&job(), &candidates, today());
    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|result| result.contractor_id.as_str() != "c-weak"));

    config.max_candidates = 10;
    config.minimum_match_score = 0.0;
    let everyone = MatchScorer::new(config)
        .expect("valid config")
        .rank(&job(), &candidates, today());
    assert_eq!(everyone.len(), 5);
    assert_eq!(
        everyone.last().map(|result| result.recommendation),
        Some(MatchRecommendation::Weak)
    );
}

#[test]
fn rejects_weights_that_do_not_sum_to_one() {
    let config = MatchingConfig {
        weights: MatchWeights {
            location: 0.5,
            skill: 0.5,
            availability: 0.5,
            price: 0.0,
        },
        ..MatchingConfig::default()
    };

    match MatchScorer::new(config) {
        Err(MatchingError::InvalidWeights { sum }) => assert!((sum - 1.5).abs() < 1e-9),
        other => panic!("expected invalid weights, got {other:?}"),
    }
}

#[test]
fn rejects_jobs_with_nonsense_hours() {
    let mut posting = job();
    posting.estimated_hours = f64::NAN;

    assert!(matches!(
        MatchScorer::validate_job(&posting),
        Err(MatchingError::InvalidJob(_))
    ));
}

#[test]
fn recommendation_thresholds() {
    assert_eq!(MatchRecommendation::from_score(85.0), MatchRecommendation::Excellent);
    assert_eq!(MatchRecommendation::from_score(84.99), MatchRecommendation::Strong);
    assert_eq!(MatchRecommendation::from_score(50.0), MatchRecommendation::Fair);
    assert_eq!(MatchRecommendation::from_score(49.9), MatchRecommendation::Weak);
}
