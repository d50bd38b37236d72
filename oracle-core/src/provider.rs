use crate::{GeoResult, LocationQuery, OracleError, WeatherReading};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// Turns a place name into coordinates.
#[async_trait]
pub trait LocationResolver: Send + Sync + Debug {
    /// Only the city constrains the lookup; the country is carried for error reporting.
    async fn resolve(&self, query: &LocationQuery) -> Result<GeoResult, OracleError>;
}

/// Current conditions for a pair of coordinates.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReading, OracleError>;
}
