use tracing::{Instrument, info_span, warn};

use crate::{
    Config, LocationQuery, OracleError, OracleReport, OracleResult,
    provider::{
        LocationResolver, WeatherFetcher,
        open_meteo::{OpenMeteoGeocoder, OpenMeteoWeather},
    },
};

/// Resolves a place, then fetches its current weather.
///
/// Holds no per-request state, so one instance can serve any number of
/// concurrent lookups.
#[derive(Debug)]
pub struct Oracle {
    resolver: Box<dyn LocationResolver>,
    fetcher: Box<dyn WeatherFetcher>,
}

impl Oracle {
    pub fn new(resolver: Box<dyn LocationResolver>, fetcher: Box<dyn WeatherFetcher>) -> Self {
        Self { resolver, fetcher }
    }

    /// Open-Meteo for both lookups, at the configured endpoints.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(OpenMeteoGeocoder::new(&config.endpoints.geocoding_url)),
            Box::new(OpenMeteoWeather::new(&config.endpoints.weather_url)),
        )
    }

    /// Never fails: every error is folded into [`OracleResult::Failure`].
    pub async fn get_time_and_weather(&self, city: &str, country: &str) -> OracleResult {
        let query = LocationQuery::new(city, country);
        let span = info_span!("lookup", location = %query);

        match self.lookup(&query).instrument(span).await {
            Ok(report) => OracleResult::Success(report),
            Err(err) => {
                warn!(location = %query, error = %err, "Lookup failed");
                OracleResult::Failure { error: err.to_string() }
            }
        }
    }

    /// Weather is only requested once the location resolved.
    pub async fn lookup(&self, query: &LocationQuery) -> Result<OracleReport, OracleError> {
        let geo = self.resolver.resolve(query).await?;
        let reading = self.fetcher.fetch(geo.latitude, geo.longitude).await?;

        // Timezone and local time lookup is disabled; `geo.timezone` is dropped here.
        Ok(OracleReport::new(query, reading))
    }
}
