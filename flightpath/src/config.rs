use std::{
    fs, io,
    path::{Path, PathBuf},
};

use config::{Config, ConfigError, Environment, FileFormat};
use directories::ProjectDirs;
use jiff::tz::TimeZone;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::{
    error::ApplicationResult,
    runway::RunwaySides,
    schedule::{RunwaySchedules, ScheduleConfig},
};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");
const ENV_PREFIX: &str = "FLIGHTPATH";

pub(crate) fn flightpath_project_dir() -> Option<ProjectDirs> {
    ProjectDirs::from("", "flightpath", "flightpath")
}

#[derive(Debug)]
pub(crate) struct FlightPathConfig {
    pub airport: AirportConfig,
    pub airport_tz: TimeZone,
    pub forecast: ForecastConfig,
    pub notify: NotifyConfig,
    pub runways: RunwaySides,
    pub schedules: RunwaySchedules,
    #[allow(dead_code)] // used in tests
    config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct Configurable {
    airport: AirportConfig,
    forecast: ForecastConfig,
    notify: NotifyConfig,
    runways: RunwaySides,
    schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AirportConfig {
    pub name: String,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ForecastConfig {
    pub url: String,
    pub forecast_days: u8,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NotifyConfig {
    pub enabled: bool,
    #[serde(default)]
    pub server: String,
    #[serde(default)]
    pub topic: String,
}

impl NotifyConfig {
    /// Where to push, or `None` when messages should stay local.
    pub fn endpoint(&self) -> Option<String> {
        let server = self.server.trim().trim_end_matches('/');
        if !self.enabled || server.is_empty() || self.topic.is_empty() {
            return None;
        }
        Some(format!("{server}/{}", self.topic))
    }
}

impl FlightPathConfig {
    /// Bundled defaults, then the user config file, then `FLIGHTPATH__*`
    /// environment variables.
    pub fn load(config_file: Option<&Path>, clean_config: bool) -> ApplicationResult<Self> {
        let config_file = match config_file {
            Some(path) => Some(path.to_path_buf()),
            None => setup_configuration(clean_config)?,
        };
        let configurable = read_configurable(config_file.as_deref(), environment())?;
        Self::from_configurable(configurable, config_file)
    }

    fn from_configurable(
        configurable: Configurable,
        config_file_path: Option<PathBuf>,
    ) -> ApplicationResult<Self> {
        let airport_tz = TimeZone::get(&configurable.airport.timezone)?;
        for runway in configurable.runways.overlapping() {
            warn!(%runway, "Runway is listed as both north and south, treating it as south");
        }
        let schedules = RunwaySchedules::try_from(configurable.schedule)?;
        debug!(
            airport = %configurable.airport.name,
            timezone = %configurable.airport.timezone,
            ?config_file_path,
            "Loaded configuration"
        );
        Ok(Self {
            airport: configurable.airport,
            airport_tz,
            forecast: configurable.forecast,
            notify: configurable.notify,
            runways: configurable.runways,
            schedules,
            config_file_path,
        })
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn read_configurable(
    config_file: Option<&Path>,
    environment: Environment,
) -> Result<Configurable, ConfigError> {
    let mut builder =
        Config::builder().add_source(config::File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
    if let Some(path) = config_file {
        builder = builder.add_source(config::File::from(path).required(true));
    }
    builder
        .add_source(environment)
        .build()?
        .try_deserialize::<Configurable>()
}

/// Makes sure the user config file exists, rewriting it from the bundled
/// defaults when `clean_config` is set.
fn setup_configuration(clean_config: bool) -> ApplicationResult<Option<PathBuf>> {
    let Some(project_dir) = flightpath_project_dir() else {
        warn!("No home directory found, using the bundled configuration");
        return Ok(None);
    };
    Ok(Some(write_default_config(project_dir.config_dir(), clean_config)?))
}

fn write_default_config(config_dir: &Path, clean_config: bool) -> io::Result<PathBuf> {
    let config_file = config_dir.join("config.toml");
    if clean_config || !config_file.exists() {
        fs::create_dir_all(config_dir)?;
        fs::write(&config_file, DEFAULT_CONFIG)?;
        info!(path = %config_file.display(), "Wrote default configuration");
    }
    Ok(config_file)
}
