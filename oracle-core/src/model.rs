use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Number;

/// Placeholder for a weather field the upstream response left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Value reported for the timezone and local time fields. Lookup is disabled.
pub const TIME_DISABLED: &str = "n/a";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub country: String,
}

impl LocationQuery {
    pub fn new(city: impl Into<String>, country: impl Into<String>) -> Self {
        Self { city: city.into(), country: country.into() }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

/// First geocoding match for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// A single upstream field that may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading<T> {
    Value(T),
    NotAvailable,
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Reading::NotAvailable, Reading::Value)
    }
}

impl<T: Serialize> Serialize for Reading<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) => v.serialize(serializer),
            Reading::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Upstream numbers, kept exactly as received.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature_celsius: Reading<Number>,
    pub weather_code: Reading<Number>,
}

/// Success half of [`OracleResult`]. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OracleReport {
    pub location: String,
    pub timezone: String,
    pub local_time: String,
    #[serde(rename = "temperature (°C)")]
    pub temperature: Reading<Number>,
    pub weather_code: Reading<Number>,
}

impl OracleReport {
    pub fn new(query: &LocationQuery, reading: WeatherReading) -> Self {
        Self {
            location: query.to_string(),
            timezone: TIME_DISABLED.to_string(),
            local_time: TIME_DISABLED.to_string(),
            temperature: reading.temperature_celsius,
            weather_code: reading.weather_code,
        }
    }
}

/// What a lookup hands back to the presentation layer: a report or an error message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OracleResult {
    Success(OracleReport),
    Failure { error: String },
}

impl OracleResult {
    pub fn is_error(&self) -> bool {
        matches!(self, OracleResult::Failure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_displays_as_city_comma_country() {
        let q = LocationQuery::new("Berlin", "Germany");
        assert_eq!(q.to_string(), "Berlin, Germany");
    }

    #[test]
    fn missing_reading_serializes_as_sentinel() {
        let r: Reading<Number> = None.into();
        assert_eq!(serde_json::to_value(r).unwrap(), json!("N/A"));

        let r: Reading<Number> = Some(Number::from(61)).into();
        assert_eq!(serde_json::to_value(r).unwrap(), json!(61));
    }

    #[test]
    fn report_keys_come_out_in_order() {
        let report = OracleReport::new(
            &LocationQuery::new("Oslo", "Norway"),
            WeatherReading {
                temperature_celsius: Reading::Value(Number::from_f64(-4.5).unwrap()),
                weather_code: Reading::NotAvailable,
            },
        );

        let s = serde_json::to_string(&OracleResult::Success(report)).unwrap();
        assert_eq!(
            s,
            r#"{"location":"Oslo, Norway","timezone":"n/a","local_time":"n/a","temperature (°C)":-4.5,"weather_code":"N/A"}"#
        );
    }

    #[test]
    fn failure_serializes_as_single_error_field() {
        let res = OracleResult::Failure { error: "boom".into() };
        assert!(res.is_error());
        assert_eq!(serde_json::to_value(&res).unwrap(), json!({ "error": "boom" }));
    }
}
