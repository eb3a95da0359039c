use std::str::FromStr;

use tracing::{debug, info, warn};
use tracing_unwrap::ResultExt;
use wind_forecast::{forecast::OpenMeteoForecast, sample::Forecast};

use crate::{
    config::{AirportConfig, ForecastConfig},
    error::ApplicationResult,
    transport::HttpTransport,
};

const HOURLY_FIELDS: &str = "wind_speed_10m,wind_direction_10m";

pub(crate) struct ForecastClient<'a, T> {
    config: &'a ForecastConfig,
    airport: &'a AirportConfig,
    transport: &'a T,
}

impl<'a, T: HttpTransport> ForecastClient<'a, T> {
    pub fn new(config: &'a ForecastConfig, airport: &'a AirportConfig, transport: &'a T) -> Self {
        Self {
            config,
            airport,
            transport,
        }
    }

    /// Hourly wind in knots, in airport local time.
    pub fn request_url(&self) -> String {
        format!(
            "{}?latitude={}&longitude={}&hourly={HOURLY_FIELDS}&timezone={}&forecast_days={}&wind_speed_unit=kn",
            self.config.url,
            self.airport.latitude,
            self.airport.longitude,
            self.airport.timezone,
            self.config.forecast_days,
        )
    }

    /// Single attempt, a failed request or undecodable body is returned as is.
    pub async fn fetch_forecast(&self) -> ApplicationResult<Forecast> {
        let url = self.request_url();
        debug!(%url, "Fetching wind forecast");
        let body = self.transport.get_text(&url).await?;
        let decoded = OpenMeteoForecast::from_str(&body)?;
        let forecast = decoded
            .samples()
            .filter_map(Result::ok_or_log)
            .collect::<Forecast>();
        if forecast.is_empty() {
            warn!(airport = %self.airport.name, "Wind forecast has no usable hours");
        }
        info!(
            hours = forecast.len(),
            airport = %self.airport.name,
            latitude = decoded.latitude,
            longitude = decoded.longitude,
            "Fetched wind forecast"
        );
        Ok(forecast)
    }
}
