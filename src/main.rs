use clap::Parser;
use log::{error, info};

use time_attack_analytics::errors::Error;
use time_attack_analytics::modules::config::{Config, DEFAULT_SECTORS_AMOUNT};
use time_attack_analytics::modules::helpers::logging::setup_logging;
use time_attack_analytics::modules::reports::events::EventsReport;
use time_attack_analytics::modules::reports::general::ReportGenerator;
use time_attack_analytics::modules::reports::laps::LapsReport;

#[derive(Parser, Debug)]
#[command(name = "time_attack_analytics")]
#[command(about = "Generate the per-driver reports of a time attack event")]
struct Args {
    /// number of the event in the series
    #[arg(long)]
    event_id: i32,

    /// amount of timed sectors on the track
    #[arg(long, default_value_t = DEFAULT_SECTORS_AMOUNT)]
    sectors_amount: usize,

    /// url to fetch the raw event result from when it is not on disk yet
    #[arg(long)]
    result_url: Option<String>,
}

fn main() {
    let args = Args::parse();
    setup_logging().expect("failed to setup logging");

    info!(target: "main", "Report generation started");

    if let Err(error) = generate_reports(&args) {
        error!(target: "main", "report generation failed for event ta-{}: {}", args.event_id, error);
        std::process::exit(1);
    }

    info!(target: "main", "Report generation finished successfully");
}

fn generate_reports(args: &Args) -> Result<(), Error> {
    let config = Config::from_env()?;

    EventsReport::new(config.clone(), args.event_id, args.result_url.clone()).generate()?;
    LapsReport::new(
        config,
        args.event_id,
        args.sectors_amount,
        args.result_url.clone(),
    )
    .generate()?;

    Ok(())
}
