use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::*;
use crate::catalog::{ContractorId, ProfessionalTier, ServiceCategory, StormId};
use crate::geo::{haversine_miles, Coordinates};

fn storm(severity: StormSeverity) -> StormEvent {
    StormEvent {
        id: StormId::new("storm-derecho"),
        name: "August Derecho".to_string(),
        severity,
        center: Coordinates::new(41.9779, -91.6656).expect("valid"),
        radius_miles: 25.0,
        affected_zip_codes: vec!["52401".to_string(), "52402".to_string(), "52403".to_string()],
        occurred_on: NaiveDate::from_ymd_opt(2025, 8, 10).expect("valid"),
    }
}

fn crew(id: &str, latitude_offset: f64, radius: f64) -> ContractorProfile {
    ContractorProfile {
        id: ContractorId::new(id),
        display_name: id.to_string(),
        tier: ProfessionalTier::Silver,
        base_location: Coordinates::new(41.9779 + latitude_offset, -91.6656).expect("valid"),
        service_radius_miles: radius,
        skills: Vec::new(),
        certifications: Vec::new(),
        hourly_rate_cents: 8_000,
        active_jobs: 0,
        max_concurrent_jobs: 3,
        last_active_on: None,
        jobs_completed_last_30_days: 0,
        average_rating: 4.2,
    }
}

fn seeded_agent(seed: u64) -> StormResponseAgent {
    StormResponseAgent::new(LeadGenerationConfig {
        seed: Some(seed),
        ..LeadGenerationConfig::default()
    })
}

#[test]
fn lead_count_scales_with_severity_and_caps() {
    let config = LeadGenerationConfig::default();
    assert_eq!(config.lead_count(StormSeverity::Minor), 6);
    assert_eq!(config.lead_count(StormSeverity::Severe), 18);
    assert_eq!(config.lead_count(StormSeverity::Catastrophic), 30);

    let capped = LeadGenerationConfig {
        leads_per_severity_level: 20,
        max_leads: 50,
        seed: None,
    };
    assert_eq!(capped.lead_count(StormSeverity::Catastrophic), 50);

    let mut rng = StdRng::seed_from_u64(7);
    let leads = generate_leads(&storm(StormSeverity::Extreme), &config, &mut rng);
    assert_eq!(leads.len(), 24);
}

#[test]
fn seeded_generation_is_reproducible() {
    let first = seeded_agent(42)
        .respond(&storm(StormSeverity::Severe), &[])
        .expect("plan builds");
    let second = seeded_agent(42)
        .respond(&storm(StormSeverity::Severe), &[])
        .expect("plan builds");

    assert_eq!(first, second);
}

#[test]
fn leads_stay_inside_footprint_with_expected_shape() {
    let event = storm(StormSeverity::Severe);
    let mut rng = StdRng::seed_from_u64(11);
    let leads = generate_leads(&event, &LeadGenerationConfig::default(), &mut rng);
    let (min_dollars, max_dollars) = value_range_dollars(StormSeverity::Severe);

    assert_eq!(leads[0].id.as_str(), "storm-derecho-lead-001");
    assert_eq!(leads[0].zip_code, "52401");
    assert_eq!(leads[1].zip_code, "52402");
    assert_eq!(leads[3].zip_code, "52401");

    for lead in &leads {
        assert!(lead.synthetic);
        assert_eq!(lead.urgency, LeadUrgency::Priority);
        assert_eq!(lead.storm_id, event.id);
        assert!(haversine_miles(event.center, lead.location) <= event.radius_miles + 0.5);
        assert!(lead.estimated_value_cents >= min_dollars * 100);
        assert!(lead.estimated_value_cents <= max_dollars * 100);
        assert!(matches!(
            lead.category,
            ServiceCategory::EmergencyStorm | ServiceCategory::TreeRemoval | ServiceCategory::TreeTrimming
        ));
    }
}

#[test]
fn minor_storms_produce_routine_leads() {
    let mut rng = StdRng::seed_from_u64(3);
    let leads = generate_leads(
        &storm(StormSeverity::Minor),
        &LeadGenerationConfig::default(),
        &mut rng,
    );

    assert!(leads.iter().all(|lead| lead.urgency == LeadUrgency::Routine));
    assert!(leads
        .iter()
        .all(|lead| lead.category != ServiceCategory::EmergencyStorm));
}

#[test]
fn zero_radius_storm_without_zips_generates_at_center() {
    let mut event = storm(StormSeverity::Moderate);
    event.radius_miles = 0.0;
    event.affected_zip_codes.clear();
    let mut rng = StdRng::seed_from_u64(5);

    let leads = generate_leads(&event, &LeadGenerationConfig::default(), &mut rng);

    assert_eq!(leads.len(), 12);
    for lead in leads {
        assert_eq!(lead.location, event.center);
        assert_eq!(lead.zip_code, "unknown");
    }
}

#[test]
fn crew_alerts_rank_by_priority_then_distance() {
    let event = storm(StormSeverity::Extreme);
    // 0.1 deg ~ 6.9 mi, 0.5 deg ~ 34.5 mi, 2.0 deg ~ 138 mi.
    let contractors = vec![
        crew("c-edge", 0.5, 15.0),
        crew("c-inside-far", 0.3, 10.0),
        crew("c-inside-near", 0.1, 10.0),
        crew("c-distant", 2.0, 30.0),
    ];

    let alerts = crew_alerts(&event, &contractors);
    let ids: Vec<&str> = alerts.iter().map(|alert| alert.contractor_id.as_str()).collect();

    assert_eq!(ids, vec!["c-inside-near", "c-inside-far", "c-edge"]);
    assert_eq!(alerts[0].priority, AlertPriority::Critical);
    assert_eq!(alerts[2].priority, AlertPriority::Standard);
    assert!(alerts.iter().all(|alert| alert.suggested_crews >= 1));
    assert!(alerts[0].suggested_crews >= alerts[1].suggested_crews);
    assert!(alerts[0].message.contains("August Derecho"));
}

#[test]
fn moderate_storms_raise_high_not_critical_alerts() {
    let alerts = crew_alerts(&storm(StormSeverity::Moderate), &[crew("c-1", 0.1, 5.0)]);

    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].priority, AlertPriority::High);
}

#[test]
fn respond_totals_projected_value() {
    let plan = seeded_agent(99)
        .respond(&storm(StormSeverity::Catastrophic), &[crew("c-1", 0.0, 10.0)])
        .expect("plan builds");

    let total: u64 = plan.leads.iter().map(|lead| lead.estimated_value_cents).sum();
    assert_eq!(plan.projected_value_cents, total);
    assert_eq!(plan.alerts.len(), 1);
    assert!(plan
        .leads
        .iter()
        .all(|lead| lead.urgency == LeadUrgency::Emergency));
}

#[test]
fn respond_rejects_invalid_footprints() {
    let mut event = storm(StormSeverity::Severe);
    event.radius_miles = f64::INFINITY;

    match StormResponseAgent::default().respond(&event, &[]) {
        Err(StormError::InvalidStorm { storm_id, .. }) => assert_eq!(storm_id, "storm-derecho"),
        other => panic!("expected invalid storm, got {other:?}"),
    }
}
