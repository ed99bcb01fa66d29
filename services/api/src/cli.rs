use crate::commands::{run_match, run_storm, run_tiers, MatchArgs, StormArgs, TiersArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use treehub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "TreeHub",
    about = "Run the TreeHub scoring service or drive its engines from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank contractors from a roster against a single job
    Match(MatchArgs),
    /// Generate synthetic leads and crew alerts for a storm
    Storm(StormArgs),
    /// Evaluate tier eligibility from a monthly performance CSV
    Tiers(TiersArgs),
    /// Walk through matching, storm response and the market rule engines
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Roster CSV to load into the contractor directory (defaults to a sample roster)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Match(args) => run_match(args),
        Command::Storm(args) => run_storm(args),
        Command::Tiers(args) => run_tiers(args),
        Command::Demo(args) => run_demo(args),
    }
}
