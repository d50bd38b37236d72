use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use oracle_core::{Config, Oracle};

use crate::{
    logging,
    server::{self, DEFAULT_CITY, DEFAULT_COUNTRY, LaunchConfig},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "oracle", version, about = "Weather & Time Oracle")]
pub struct Cli {
    /// Verbose logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit endpoints and server settings.
    Configure,

    /// Look up a single location and print the result as JSON.
    Show {
        #[arg(long, default_value = DEFAULT_CITY)]
        city: String,

        #[arg(long, default_value = DEFAULT_COUNTRY)]
        country: String,
    },

    /// Serve the web form.
    Serve {
        /// Port to listen on; overrides the configured one.
        #[arg(long)]
        port: Option<u16>,

        /// Listen on all interfaces so other machines can reach the form.
        #[arg(long)]
        share: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => {
                logging::init(debug_enabled(self.debug, &config));
                configure(config)?;
            }
            Command::Show { city, country } => {
                logging::init(debug_enabled(self.debug, &config));

                let oracle = Oracle::from_config(&config);
                let result = oracle.get_time_and_weather(&city, &country).await;

                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to format result as JSON")?;
                println!("{json}");
            }
            Command::Serve { port, share } => {
                let launch = LaunchConfig::new(&config.server, port, share, self.debug);
                logging::init(launch.debug);

                server::run(Oracle::from_config(&config), launch).await?;
            }
        }

        Ok(())
    }
}

/// `--debug` or the stored `server.debug` setting.
fn debug_enabled(flag: bool, config: &Config) -> bool {
    flag || config.server.debug
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&config.endpoints.geocoding_url)
        .prompt()?;
    config.endpoints.geocoding_url = geocoding_url;

    let weather_url = Text::new("Weather endpoint:")
        .with_default(&config.endpoints.weather_url)
        .prompt()?;
    config.endpoints.weather_url = weather_url;

    config.server.port = CustomType::<u16>::new("Web form port:")
        .with_default(config.server.port)
        .with_error_message("Please enter a port between 0 and 65535")
        .prompt()?;

    config.server.share = Confirm::new("Listen on all interfaces?")
        .with_default(config.server.share)
        .prompt()?;

    config.server.debug = Confirm::new("Enable debug logging?")
        .with_default(config.server.debug)
        .prompt()?;

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_defaults_to_berlin() {
        let cli = Cli::try_parse_from(["oracle", "show"]).unwrap();

        match cli.command {
            Command::Show { city, country } => {
                assert_eq!(city, "Berlin");
                assert_eq!(country, "Germany");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn debug_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["oracle", "serve", "--port", "8080", "--share", "--debug"])
            .unwrap();

        assert!(cli.debug);
        match cli.command {
            Command::Serve { port, share } => {
                assert_eq!(port, Some(8080));
                assert!(share);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn stored_debug_setting_enables_debug_logging() {
        let mut config = Config::default();
        assert!(!debug_enabled(false, &config));
        assert!(debug_enabled(true, &config));

        config.server.debug = true;
        assert!(debug_enabled(false, &config));
    }

    #[test]
    fn rejects_out_of_range_port() {
        assert!(Cli::try_parse_from(["oracle", "serve", "--port", "70000"]).is_err());
    }
}
