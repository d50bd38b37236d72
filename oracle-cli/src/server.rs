use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use maud::{DOCTYPE, Markup, html};
use oracle_core::{Oracle, OracleResult, ServerConfig};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const DEFAULT_CITY: &str = "Berlin";
pub const DEFAULT_COUNTRY: &str = "Germany";

const TITLE: &str = "Weather & Time Oracle";
const DESCRIPTION: &str = "Enter a city and country to get the local time and current weather.";

/// Process-level settings for the web form. The lookup pipeline never sees these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub host: IpAddr,
    pub port: u16,
    pub debug: bool,
}

impl LaunchConfig {
    /// Command-line values win over the stored server settings.
    pub fn new(server: &ServerConfig, port: Option<u16>, share: bool, debug: bool) -> Self {
        let host = if share || server.share { Ipv4Addr::UNSPECIFIED } else { Ipv4Addr::LOCALHOST };

        Self {
            host: host.into(),
            port: port.unwrap_or(server.port),
            debug: debug || server.debug,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Deserialize)]
struct FormInput {
    city: Option<String>,
    country: Option<String>,
}

pub fn router(oracle: Arc<Oracle>) -> Router {
    Router::new()
        .route("/", get(form))
        .route("/api/oracle", get(api))
        .layer(TraceLayer::new_for_http())
        .with_state(oracle)
}

pub async fn run(oracle: Oracle, launch: LaunchConfig) -> anyhow::Result<()> {
    let addr = launch.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web form running at http://{}", addr);
    axum::serve(listener, router(Arc::new(oracle)))
        .await
        .context("Web server stopped unexpectedly")
}

async fn form(State(oracle): State<Arc<Oracle>>, Query(input): Query<FormInput>) -> Markup {
    let result = match (&input.city, &input.country) {
        (Some(city), Some(country)) => Some(oracle.get_time_and_weather(city, country).await),
        _ => None,
    };

    let city = input.city.as_deref().unwrap_or(DEFAULT_CITY);
    let country = input.country.as_deref().unwrap_or(DEFAULT_COUNTRY);

    render_page(city, country, result.as_ref())
}

async fn api(
    State(oracle): State<Arc<Oracle>>,
    Query(input): Query<FormInput>,
) -> Json<OracleResult> {
    let city = input.city.as_deref().unwrap_or(DEFAULT_CITY);
    let country = input.country.as_deref().unwrap_or(DEFAULT_COUNTRY);

    Json(oracle.get_time_and_weather(city, country).await)
}

fn render_page(city: &str, country: &str, result: Option<&OracleResult>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { (TITLE) }
            }
            body {
                h1 { "🌍 " (TITLE) }
                p { (DESCRIPTION) }
                form method="get" action="/" {
                    label { "City " input type="text" name="city" value=(city); }
                    label { "Country " input type="text" name="country" value=(country); }
                    button type="submit" { "Submit" }
                }
                @if let Some(result) = result {
                    pre id="result" { (pretty_json(result)) }
                }
            }
        }
    }
}

fn pretty_json(result: &OracleResult) -> String {
    serde_json::to_string_pretty(result)
        .unwrap_or_else(|err| format!("{{\"error\": \"{err}\"}}"))
}
