use crate::infra::{
    dollars_to_cents, parse_category, parse_date, parse_tier, sample_roster,
    InMemoryContractorDirectory, InMemoryMatchPublisher,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use treehub::agents::job_matching::{
    ContractorProfile, JobMatchingService, JobPosting, MatchReport,
};
use treehub::agents::storm_response::{
    LeadGenerationConfig, StormEvent, StormResponseAgent, StormResponsePlan, StormSeverity,
};
use treehub::catalog::{JobId, ProfessionalTier, ServiceCategory, StormId};
use treehub::config::AppConfig;
use treehub::conquest::{TierEngine, TierEvaluation};
use treehub::error::AppError;
use treehub::geo::Coordinates;
use treehub::import::{PerformanceImporter, RosterImporter};

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Roster CSV export (defaults to the bundled sample roster)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Job site latitude
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lat: f64,
    /// Job site longitude
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lon: f64,
    /// Job site zip code
    #[arg(long, default_value = "unknown")]
    pub(crate) zip: String,
    /// Service category, e.g. tree-removal
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: ServiceCategory,
    /// Required skills, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) skills: Vec<String>,
    /// Owner budget in dollars
    #[arg(long)]
    pub(crate) budget: Option<f64>,
    /// Estimated crew hours
    #[arg(long, default_value_t = 4.0)]
    pub(crate) hours: f64,
    /// Treat the job as urgent
    #[arg(long)]
    pub(crate) urgent: bool,
    /// Evaluation date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct StormArgs {
    /// Storm name used in alert messages
    #[arg(long)]
    pub(crate) name: String,
    /// Severity level from 1 (minor) to 5 (catastrophic)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=5))]
    pub(crate) severity: u32,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) lon: f64,
    /// Storm footprint radius in miles
    #[arg(long)]
    pub(crate) radius: f64,
    /// Affected zip codes, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) zips: Vec<String>,
    /// Seed for reproducible lead generation (overrides TREEHUB_LEAD_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Roster CSV used for crew alerts (defaults to the bundled sample roster)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Print every generated lead
    #[arg(long)]
    pub(crate) list_leads: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TiersArgs {
    /// Tier currently held
    #[arg(long, value_parser = parse_tier)]
    pub(crate) current: ProfessionalTier,
    /// Monthly performance CSV
    #[arg(long)]
    pub(crate) history: PathBuf,
    /// Rolling window in months
    #[arg(long, default_value_t = 3)]
    pub(crate) window: usize,
}

pub(crate) fn load_roster(
    path: Option<PathBuf>,
    today: NaiveDate,
) -> Result<Vec<ContractorProfile>, AppError> {
    match path {
        Some(path) => Ok(RosterImporter::from_path(path)?),
        None => Ok(sample_roster(today)),
    }
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let profiles = load_roster(args.roster, today)?;

    let directory = Arc::new(InMemoryContractorDirectory::from_profiles(profiles));
    let publisher = Arc::new(InMemoryMatchPublisher::default());
    let service =
        JobMatchingService::new(directory, publisher.clone(), config.engine.matching())?;

    let job = JobPosting {
        id: JobId::new(format!("cli-{}", today.format("%Y%m%d"))),
        category: args.category,
        location: Coordinates {
            latitude: args.lat,
            longitude: args.lon,
        },
        zip_code: args.zip,
        required_skills: args.skills,
        budget: args.budget.map(dollars_to_cents),
        estimated_hours: args.hours,
        posted_on: today,
        urgent: args.urgent,
    };

    let report = service.match_job(&job, today)?;
    render_match_report(&report);
    println!("{} notification(s) queued", publisher.events().len());
    Ok(())
}

pub(crate) fn render_match_report(report: &MatchReport) {
    println!(
        "Job {}: {} candidate(s) evaluated, {} match(es)",
        report.job_id,
        report.evaluated,
        report.matches.len()
    );
    for (rank, result) in report.matches.iter().enumerate() {
        println!(
            "{:>2}. {:<16} {:>6.2} {:<9} {:>5.1} mi",
            rank + 1,
            result.contractor_id.as_str(),
            result.total_score,
            result.recommendation.label(),
            result.distance_miles
        );
        for component in &result.components {
            println!(
                "      {:<12} {:>6.1} x {:.2}  {}",
                format!("{:?}", component.factor).to_lowercase(),
                component.score,
                component.weight,
                component.notes
            );
        }
    }
}

pub(crate) fn run_storm(args: StormArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = Local::now().date_naive();
    let contractors = load_roster(args.roster, today)?;

    // Range is enforced by the clap value parser.
    let severity = StormSeverity::from_level(args.severity).unwrap_or(StormSeverity::Minor);
    let storm = StormEvent {
        id: StormId::new(format!("storm-{}", today.format("%Y%m%d"))),
        name: args.name,
        severity,
        center: Coordinates {
            latitude: args.lat,
            longitude: args.lon,
        },
        radius_miles: args.radius,
        affected_zip_codes: args.zips,
        occurred_on: today,
    };

    let agent = StormResponseAgent::new(LeadGenerationConfig {
        seed: args.seed.or(config.engine.lead_seed),
        ..LeadGenerationConfig::default()
    });
    let plan = agent.respond(&storm, &contractors)?;
    render_storm_plan(&storm, &plan, args.list_leads);
    Ok(())
}

pub(crate) fn render_storm_plan(storm: &StormEvent, plan: &StormResponsePlan, list_leads: bool) {
    println!(
        "{} ({}): {} synthetic lead(s), projected ${:.2}",
        storm.name,
        plan.severity.label(),
        plan.leads.len(),
        plan.projected_value_cents as f64 / 100.0
    );
    if list_leads {
        for lead in &plan.leads {
            println!(
                "  - {} {:<17} zip {:<7} ${:>9.2} {:?}",
                lead.id,
                lead.category.label(),
                lead.zip_code,
                lead.estimated_value_cents as f64 / 100.0,
                lead.urgency
            );
        }
    }
    println!("Crew alerts:");
    for alert in &plan.alerts {
        println!(
            "  - [{:?}] {} {:.1} mi, {} crew(s): {}",
            alert.priority,
            alert.contractor_id,
            alert.distance_miles,
            alert.suggested_crews,
            alert.message
        );
    }
}

pub(crate) fn run_tiers(args: TiersArgs) -> Result<(), AppError> {
    let history = PerformanceImporter::from_path(&args.history)?;
    let evaluation = TierEngine::new(args.window).evaluate(args.current, &history);
    render_tier_evaluation(&evaluation);
    Ok(())
}

pub(crate) fn render_tier_evaluation(evaluation: &TierEvaluation) {
    println!(
        "Current {} | qualified {} | promotion eligible: {}{}",
        evaluation.current.label(),
        evaluation.qualified.label(),
        evaluation.promotion_eligible,
        if evaluation.at_risk { " | AT RISK" } else { "" }
    );
    if let Some(next) = evaluation.recommended {
        println!("Recommended tier: {}", next.label());
    }
    println!(
        "Rolling averages: {:.1} jobs, {:.2} rating, ${:.2} revenue, {:.0}% response, {:.0}% cancellations",
        evaluation.metrics.jobs_completed,
        evaluation.metrics.average_rating,
        evaluation.metrics.revenue_cents / 100.0,
        evaluation.metrics.response_rate * 100.0,
        evaluation.metrics.cancellation_rate * 100.0
    );
    for gap in &evaluation.gaps {
        println!(
            "  gap {:?}: need {} have {}",
            gap.criterion, gap.required, gap.actual
        );
    }
    for note in &evaluation.notes {
        println!("  note: {:?}", note);
    }
}
