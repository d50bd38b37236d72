use thiserror::Error;

/// Everything that can go wrong while answering a single lookup.
///
/// Display strings are what ends up in the `error` field handed to the user.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Geolocation failed. Status: {status}")]
    GeocodingUnavailable { status: u16 },

    #[error("Could not find location: {city}, {country}")]
    LocationNotFound { city: String, country: String },

    #[error("Weather API failed. Status: {status}")]
    WeatherUnavailable { status: u16 },

    /// Catch-all for transport errors, malformed bodies and the like.
    #[error("{kind}: {message}")]
    UnexpectedFault { kind: &'static str, message: String },
}

impl OracleError {
    pub fn unexpected(kind: &'static str, message: impl Into<String>) -> Self {
        Self::UnexpectedFault { kind, message: message.into() }
    }
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        Self::unexpected("RequestError", err.to_string())
    }
}

impl From<serde_json::Error> for OracleError {
    fn from(err: serde_json::Error) -> Self {
        Self::unexpected("DecodeError", err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_user_facing_text() {
        let err = OracleError::GeocodingUnavailable { status: 500 };
        assert_eq!(err.to_string(), "Geolocation failed. Status: 500");

        let err = OracleError::LocationNotFound {
            city: "Nowhereville".into(),
            country: "Atlantis".into(),
        };
        assert_eq!(err.to_string(), "Could not find location: Nowhereville, Atlantis");

        let err = OracleError::WeatherUnavailable { status: 503 };
        assert_eq!(err.to_string(), "Weather API failed. Status: 503");
    }

    #[test]
    fn decode_failures_become_unexpected_faults() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = OracleError::from(json_err);

        assert!(matches!(err, OracleError::UnexpectedFault { kind: "DecodeError", .. }));
        assert!(err.to_string().starts_with("DecodeError: "));
    }
}
