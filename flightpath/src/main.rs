pub(crate) mod clock;
pub(crate) mod config;
pub(crate) mod decision;
pub(crate) mod error;
pub(crate) mod forecast;
pub(crate) mod notify;
pub(crate) mod pipeline;
pub(crate) mod runway;
pub(crate) mod schedule;
pub(crate) mod transport;

use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use config::FlightPathConfig;
use error::ApplicationResult;
use jiff::{Zoned, civil::DateTime};
use pipeline::{run_once, setup_failed};
use tracing::info;
use tracing_subscriber::EnvFilter;
use transport::ReqwestTransport;

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[clap(long, short)]
    /// Resets the user config file to the bundled defaults
    clean_config: bool,
    #[clap(long)]
    /// Read this config file instead of the one in the user config folder
    config: Option<PathBuf>,
    #[clap(long)]
    /// Pretend the airport local time is this, e.g. 2025-08-12T05:30
    at: Option<DateTime>,
    #[clap(long)]
    /// Write the message to stdout instead of pushing it
    dry_run: bool,
}

/// Everything a run needs before it can fetch the forecast.
fn prepare(cli: &Cli) -> ApplicationResult<(FlightPathConfig, Zoned, ReqwestTransport)> {
    let mut config = FlightPathConfig::load(cli.config.as_deref(), cli.clean_config)?;
    if cli.dry_run {
        config.notify.enabled = false;
    }
    let now = match cli.at {
        Some(at) => at.to_zoned(config.airport_tz.clone())?,
        None => Zoned::now(),
    };
    let transport = ReqwestTransport::new(&config.forecast.user_agent)?;
    Ok((config, now, transport))
}

async fn run() -> ApplicationResult<ExitCode> {
    let cli = Cli::parse();
    let mut stdout = io::stdout();
    let outcome = match prepare(&cli) {
        Ok((config, now, transport)) => run_once(&now, &config, &transport, &mut stdout).await,
        Err(e) => setup_failed(&e, &mut stdout),
    };
    println!("{}", serde_json::to_string(&outcome)?);

    if outcome.is_failure() {
        Ok(ExitCode::FAILURE)
    } else {
        info!("Run complete");
        Ok(ExitCode::SUCCESS)
    }
}

fn main() -> ApplicationResult<ExitCode> {
    // stdout carries the message and the result record
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run())
}
