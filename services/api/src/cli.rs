use crate::estimate::{run_estimate, run_rules, EstimateArgs, RulesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use customs_risk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Customs Risk Estimator",
    about = "Estimate customs control risk and indicative tax for imported phones",
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
    /// Estimate risk and tax for phones described on the command line
    Estimate(EstimateArgs),
    /// Print the public part of the active rule table
    Rules(RulesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Alternate rule table (JSON) instead of the built-in one
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Estimate(args) => run_estimate(args),
        Command::Rules(args) => run_rules(args),
    }
}
