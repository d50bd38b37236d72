//! Core library for the weather & time oracle.
//!
//! This crate defines:
//! - Shared domain models (queries, readings, the final result)
//! - The error taxonomy folded into that result
//! - Location and weather provider seams, with Open-Meteo implementations
//! - Request orchestration and on-disk configuration
//!
//! It is used by `oracle-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod oracle;
pub mod provider;

pub use config::{Config, Endpoints, ServerConfig};
pub use error::OracleError;
pub use model::{
    GeoResult, LocationQuery, OracleReport, OracleResult, Reading, WeatherReading,
};
pub use oracle::Oracle;
pub use provider::{LocationResolver, WeatherFetcher};
