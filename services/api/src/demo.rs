use crate::commands::{
    load_roster, render_match_report, render_storm_plan, render_tier_evaluation,
};
use crate::infra::{
    des_moines, parse_date, sample_equipment, sample_territories, InMemoryContractorDirectory,
    InMemoryMatchPublisher,
};
use chrono::{Datelike, Local, Months, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use treehub::agents::equipment::{recommend_for_job, EquipmentConfig};
use treehub::agents::job_matching::{JobMatchingService, JobPosting, MatchingConfig};
use treehub::agents::storm_response::{
    LeadGenerationConfig, StormEvent, StormResponseAgent, StormSeverity,
};
use treehub::catalog::{
    ContractorId, JobId, PartnershipId, ProfessionalTier, ServiceCategory, StormId, TerritoryId,
};
use treehub::conquest::{
    CommissionSchedule, LeadRouting, MonthlyPerformance, Partnership, PartnershipTerms,
    TerritoryRegistry, TierEngine,
};
use treehub::error::AppError;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Demo date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for the synthetic storm leads.
    #[arg(long, default_value_t = 7)]
    pub(crate) seed: u64,
    /// Optional roster CSV replacing the sample roster.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        seed,
        roster,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let profiles = load_roster(roster, today)?;

    println!("TreeHub engine demo ({today})");

    println!("\n== Job matching ==");
    let directory = Arc::new(InMemoryContractorDirectory::from_profiles(profiles.clone()));
    let publisher = Arc::new(InMemoryMatchPublisher::default());
    let service =
        JobMatchingService::new(directory, publisher.clone(), MatchingConfig::default())?;
    let job = JobPosting {
        id: JobId::new("demo-removal"),
        category: ServiceCategory::TreeRemoval,
        location: des_moines(),
        zip_code: "50309".to_string(),
        required_skills: vec!["tree removal".to_string(), "crane work".to_string()],
        budget: Some(180_000),
        estimated_hours: 16.0,
        posted_on: today,
        urgent: false,
    };
    let report = service.match_job(&job, today)?;
    render_match_report(&report);
    for notification in publisher.events() {
        println!(
            "  notified {} ({})",
            notification.contractor_id,
            notification.recommendation.label()
        );
    }

    println!("\n== Storm response ==");
    let storm = StormEvent {
        id: StormId::new("demo-derecho"),
        name: "Derecho".to_string(),
        severity: StormSeverity::Extreme,
        center: des_moines(),
        radius_miles: 18.0,
        affected_zip_codes: vec![
            "50309".to_string(),
            "50265".to_string(),
            "50310".to_string(),
        ],
        occurred_on: today,
    };
    let agent = StormResponseAgent::new(LeadGenerationConfig {
        seed: Some(seed),
        ..LeadGenerationConfig::default()
    });
    let plan = agent.respond(&storm, &profiles)?;
    render_storm_plan(&storm, &plan, false);

    println!("\n== Territory protection ==");
    let mut territories = TerritoryRegistry::new(sample_territories());
    for profile in &profiles {
        let target = match profile.tier {
            ProfessionalTier::Gold => "t-downtown-dsm",
            ProfessionalTier::Platinum => "t-west-metro",
            ProfessionalTier::Elite => "t-ames",
            ProfessionalTier::Bronze | ProfessionalTier::Silver => "t-downtown-dsm",
        };
        match territories.claim(&TerritoryId::new(target), &profile.id, profile.tier, today) {
            Ok(territory) => println!("  {} protects {}", profile.id, territory.name),
            Err(err) => println!("  {} could not claim {target}: {err}", profile.id),
        }
    }
    let exclusive = plan
        .leads
        .iter()
        .filter(|lead| matches!(territories.route_lead(lead), LeadRouting::Exclusive(_)))
        .count();
    println!(
        "  {exclusive} of {} storm lead(s) route to a protected holder",
        plan.leads.len()
    );

    println!("\n== Commission ==");
    let schedule = CommissionSchedule::default();
    let book: Vec<(ServiceCategory, ProfessionalTier, u64)> = plan
        .leads
        .iter()
        .map(|lead| (lead.category, ProfessionalTier::Gold, lead.estimated_value_cents))
        .collect();
    let projection = schedule.project_revenue(&book)?;
    for (category, revenue) in &projection.by_category {
        println!(
            "  {:<17} {:>3} job(s) ${:>10.2} gross, ${:>9.2} commission ({} bps blended)",
            category.label(),
            revenue.jobs,
            revenue.gross_cents as f64 / 100.0,
            revenue.commission_cents as f64 / 100.0,
            revenue.blended_rate_bps()
        );
    }
    println!(
        "  platform net ${:.2} on ${:.2} commission after processing",
        projection.totals.platform_net_cents as f64 / 100.0,
        projection.totals.commission_cents as f64 / 100.0
    );

    println!("\n== Partnership referral ==");
    let referrer = ContractorId::new("c-cedar-crew");
    let fulfiller = ContractorId::new("c-oak-ash");
    if Partnership::eligible(ProfessionalTier::Platinum, ProfessionalTier::Gold) {
        let partnership = Partnership::new(
            PartnershipId::new("demo-referral"),
            referrer,
            fulfiller,
            PartnershipTerms {
                referral_fee_bps: 800,
                max_referral_fee_cents: Some(50_000),
            },
        )?;
        let quote =
            schedule.quote(ServiceCategory::TreeRemoval, ProfessionalTier::Gold, 640_000)?;
        let settlement = partnership.settle_referral(&quote)?;
        println!(
            "  {} refers a ${:.2} removal to {}: fee ${:.2}, fulfiller nets ${:.2}",
            partnership.referrer,
            quote.job_value_cents as f64 / 100.0,
            partnership.fulfiller,
            settlement.referral_fee_cents as f64 / 100.0,
            settlement.fulfiller_net_cents as f64 / 100.0
        );
    }

    println!("\n== Tier evaluation ==");
    let history = sample_history(today);
    let evaluation = TierEngine::default().evaluate(ProfessionalTier::Silver, &history);
    render_tier_evaluation(&evaluation);

    println!("\n== Equipment for the removal job ==");
    let recommendations = recommend_for_job(
        ServiceCategory::TreeRemoval,
        &sample_equipment(),
        des_moines(),
        today.year(),
        &EquipmentConfig::default(),
    );
    for score in recommendations {
        println!(
            "  {:<14} {:?} {:>6.2} ({} alert(s))",
            score.equipment_id.as_str(),
            score.kind,
            score.total,
            score.alerts.len()
        );
    }

    Ok(())
}

/// Three strong months for a silver professional.
fn sample_history(today: NaiveDate) -> Vec<MonthlyPerformance> {
    let this_month = today.with_day(1).unwrap_or(today);
    (1..=3u32)
        .filter_map(|back| this_month.checked_sub_months(Months::new(back)))
        .zip([(16, 4.6, 1_150_000), (18, 4.5, 1_240_000), (15, 4.4, 1_020_000)])
        .map(|(month, (jobs, rating, revenue))| MonthlyPerformance {
            month,
            jobs_completed: jobs,
            average_rating: rating,
            revenue_cents: revenue,
            response_rate: 0.88,
            cancellation_rate: 0.04,
        })
        .collect()
}
