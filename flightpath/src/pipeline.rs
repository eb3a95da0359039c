use std::io::Write;

use jiff::Zoned;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    clock::ResolvedTime,
    config::FlightPathConfig,
    decision::{Decision, DecisionEngine},
    error::{ApplicationError, ApplicationResult},
    forecast::ForecastClient,
    notify::Notifier,
    transport::HttpTransport,
};

pub const NO_FORECAST_NOTICE: &str = "❓ Could not retrieve 6 AM wind forecast.";
pub const NO_FORECAST_DATA: &str = "No forecast data";

/// The single record a run hands back to whatever scheduled it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum RunOutcome {
    Decided(Decision),
    NoForecast { message: String },
    Failed { error: String },
}

impl RunOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

fn error_message(error: &impl std::fmt::Display) -> String {
    format!("⚠️ Error in plane forecast: {error}")
}

/// A run that could not get as far as the forecast, e.g. because the config
/// file is invalid. There is no endpoint to push to, so the message stays local.
pub(crate) fn setup_failed<W: Write>(error: &ApplicationError, local: &mut W) -> RunOutcome {
    error!(error = %error, "Could not start runway forecast");
    let message = error_message(error);
    if let Err(local_error) = writeln!(local, "{message}").and_then(|()| local.flush()) {
        error!(error = %local_error, "Failed to write error message locally");
    }
    RunOutcome::Failed { error: message }
}

/// One full run. Never fails: errors end up in the returned record and, best
/// effort, in a notification.
pub(crate) async fn run_once<T: HttpTransport, W: Write>(
    now: &Zoned,
    config: &FlightPathConfig,
    transport: &T,
    local: &mut W,
) -> RunOutcome {
    let mut notifier = Notifier::new(&config.notify, transport, local);
    match predict(now, config, transport, &mut notifier).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(error = %e, "Runway forecast failed");
            let message = error_message(&e);
            if let Err(notify_error) = notifier.notify(&message).await {
                error!(error = %notify_error, "Failed to deliver error notification");
                if let Err(local_error) = notifier.write_local(&message) {
                    error!(error = %local_error, "Failed to write error message locally");
                }
            }
            RunOutcome::Failed { error: message }
        }
    }
}

async fn predict<T: HttpTransport, W: Write>(
    now: &Zoned,
    config: &FlightPathConfig,
    transport: &T,
    notifier: &mut Notifier<'_, T, W>,
) -> ApplicationResult<RunOutcome> {
    let time = ResolvedTime::resolve(now, &config.airport_tz)?;
    info!(
        now = %time.now,
        target = %time.target_hour(),
        night = time.is_night(),
        "Resolved airport time"
    );

    let forecast = ForecastClient::new(&config.forecast, &config.airport, transport)
        .fetch_forecast()
        .await?;

    let Some(sample) = forecast.sample_at(time.target_hour()) else {
        warn!(target = %time.target_hour(), "No forecast for the changeover hour");
        notifier.notify(NO_FORECAST_NOTICE).await?;
        return Ok(RunOutcome::NoForecast {
            message: NO_FORECAST_DATA.to_string(),
        });
    };

    let decision = DecisionEngine::new(&config.schedules, &config.runways).decide(&time, sample);
    info!(
        runway = %decision.runway_in_use,
        westerly = decision.is_westerly,
        speed = decision.wind_speed_knots,
        direction = decision.wind_direction_degrees,
        "Decided runway in use"
    );
    notifier.notify(&decision.message).await?;
    Ok(RunOutcome::Decided(decision))
}
