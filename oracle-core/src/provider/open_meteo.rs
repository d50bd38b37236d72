use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Number;
use tracing::{debug, info};

use crate::{GeoResult, LocationQuery, OracleError, Reading, WeatherReading};

use super::{LocationResolver, WeatherFetcher};

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    url: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoWeather {
    url: String,
    http: Client,
}

impl OpenMeteoWeather {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), http: Client::new() }
    }
}

// The API drops `results` entirely when nothing matches.
#[derive(Debug, Deserialize)]
struct OmGeocodingResponse {
    #[serde(default)]
    results: Vec<OmCandidate>,
}

#[derive(Debug, Deserialize)]
struct OmCandidate {
    latitude: f64,
    longitude: f64,
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    #[serde(default)]
    current: OmCurrent,
}

// Numbers are passed through as sent, integer or float.
#[derive(Debug, Default, Deserialize)]
struct OmCurrent {
    temperature_2m: Option<Number>,
    weathercode: Option<Number>,
}

#[async_trait]
impl LocationResolver for OpenMeteoGeocoder {
    async fn resolve(&self, query: &LocationQuery) -> Result<GeoResult, OracleError> {
        debug!(city = %query.city, "Geocoding location name");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("name", query.city.as_str()),
                ("count", "1"),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(OracleError::GeocodingUnavailable { status: status.as_u16() });
        }

        let parsed: OmGeocodingResponse = serde_json::from_str(&body)?;

        let first = parsed.results.into_iter().next().ok_or_else(|| {
            OracleError::LocationNotFound {
                city: query.city.clone(),
                country: query.country.clone(),
            }
        })?;

        info!(
            location = %query,
            latitude = first.latitude,
            longitude = first.longitude,
            timezone = %first.timezone,
            "Resolved location"
        );

        Ok(GeoResult {
            latitude: first.latitude,
            longitude: first.longitude,
            timezone: first.timezone,
        })
    }
}

#[async_trait]
impl WeatherFetcher for OpenMeteoWeather {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReading, OracleError> {
        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current", "temperature_2m,weathercode".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(OracleError::WeatherUnavailable { status: status.as_u16() });
        }

        let parsed: OmForecastResponse = serde_json::from_str(&body)?;
        debug!(current = ?parsed.current, "Fetched current weather");

        Ok(WeatherReading {
            temperature_celsius: Reading::from(parsed.current.temperature_2m),
            weather_code: Reading::from(parsed.current.weathercode),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geocoding_without_results_key_is_empty() {
        let parsed: OmGeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn candidate_ignores_extra_fields() {
        let parsed: OmGeocodingResponse = serde_json::from_str(
            r#"{"results":[{"id":2950159,"name":"Berlin","latitude":52.52,"longitude":13.405,"timezone":"Europe/Berlin","country":"Germany"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].timezone, "Europe/Berlin");
    }

    #[test]
    fn forecast_without_current_block_has_no_fields() {
        let parsed: OmForecastResponse = serde_json::from_str(r#"{"latitude":1.0}"#).unwrap();
        assert!(parsed.current.temperature_2m.is_none());
        assert!(parsed.current.weathercode.is_none());
    }

    #[test]
    fn current_numbers_keep_their_form() {
        let parsed: OmForecastResponse =
            serde_json::from_str(r#"{"current":{"temperature_2m":18,"weathercode":3.0}}"#).unwrap();

        assert_eq!(parsed.current.temperature_2m.unwrap().to_string(), "18");
        assert_eq!(parsed.current.weathercode.unwrap().to_string(), "3.0");
    }
}
