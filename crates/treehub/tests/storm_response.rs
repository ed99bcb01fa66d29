use chrono::NaiveDate;
use treehub::agents::job_matching::ContractorProfile;
use treehub::agents::storm_response::{
    AlertPriority, LeadGenerationConfig, LeadUrgency, StormEvent, StormResponseAgent,
    StormSeverity,
};
use treehub::catalog::{ContractorId, ProfessionalTier, StormId, TerritoryId};
use treehub::conquest::{LeadRouting, Territory, TerritoryKind, TerritoryRegistry};
use treehub::geo::Coordinates;

fn storm(severity: StormSeverity) -> StormEvent {
    StormEvent {
        id: StormId::new("storm-ia-0614"),
        name: "June Derecho".to_string(),
        severity,
        center: Coordinates::new(41.5868, -93.6250).expect("valid"),
        radius_miles: 20.0,
        affected_zip_codes: vec!["50309".to_string(), "50310".to_string(), "50265".to_string()],
        occurred_on: NaiveDate::from_ymd_opt(2025, 6, 14).expect("valid date"),
    }
}

fn crew(id: &str, north_miles: f64, radius: f64) -> ContractorProfile {
    ContractorProfile {
        id: ContractorId::new(id),
        display_name: id.to_string(),
        tier: ProfessionalTier::Gold,
        base_location: Coordinates::new(41.5868 + north_miles / 69.0, -93.6250).expect("valid"),
        service_radius_miles: radius,
        skills: vec!["storm cleanup".to_string()],
        certifications: Vec::new(),
        hourly_rate_cents: 9_000,
        active_jobs: 0,
        max_concurrent_jobs: 3,
        last_active_on: None,
        jobs_completed_last_30_days: 0,
        average_rating: 4.5,
    }
}

fn seeded(seed: u64) -> StormResponseAgent {
    StormResponseAgent::new(LeadGenerationConfig {
        seed: Some(seed),
        ..LeadGenerationConfig::default()
    })
}

#[test]
fn extreme_storm_plan_is_reproducible_and_bounded() {
    let storm = storm(StormSeverity::Extreme);
    let contractors = vec![crew("c-inside", 5.0, 25.0), crew("c-edge", 35.0, 20.0)];

    let first = seeded(2025).respond(&storm, &contractors).expect("valid storm");
    let second = seeded(2025).respond(&storm, &contractors).expect("valid storm");

    assert_eq!(first, second);
    assert_eq!(first.leads.len(), 24);
    assert_eq!(
        first.projected_value_cents,
        first.leads.iter().map(|lead| lead.estimated_value_cents).sum::<u64>()
    );

    for lead in &first.leads {
        assert!(lead.synthetic);
        assert_eq!(lead.urgency, LeadUrgency::Emergency);
        assert!((160_000..=600_000).contains(&lead.estimated_value_cents));
        assert!(storm.center.distance_miles(&lead.location) <= storm.radius_miles * 1.01);
        assert!(storm.affected_zip_codes.contains(&lead.zip_code));
    }

    assert_eq!(first.alerts.len(), 2);
    assert_eq!(first.alerts[0].contractor_id.as_str(), "c-inside");
    assert_eq!(first.alerts[0].priority, AlertPriority::Critical);
    assert_eq!(first.alerts[1].priority, AlertPriority::Standard);
}

#[test]
fn protected_territories_capture_their_share_of_storm_leads() {
    let storm = storm(StormSeverity::Severe);
    let plan = seeded(11).respond(&storm, &[]).expect("valid storm");

    let mut registry = TerritoryRegistry::new(vec![Territory {
        id: TerritoryId::new("t-downtown"),
        name: "Downtown".to_string(),
        kind: TerritoryKind::Zip,
        zip_codes: vec!["50309".to_string()],
        protected_by: None,
        protected_since: None,
    }]);
    let holder = ContractorId::new("c-gold");
    registry
        .claim(
            &TerritoryId::new("t-downtown"),
            &holder,
            ProfessionalTier::Gold,
            storm.occurred_on,
        )
        .expect("gold may protect one territory");

    let exclusive: Vec<_> = plan
        .leads
        .iter()
        .filter(|lead| registry.route_lead(lead) == LeadRouting::Exclusive(holder.clone()))
        .collect();

    // Zips are assigned round-robin across the three affected codes.
    assert_eq!(plan.leads.len(), 18);
    assert_eq!(exclusive.len(), 6);
    assert!(exclusive.iter().all(|lead| lead.zip_code == "50309"));
}
