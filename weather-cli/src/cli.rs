use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use weather_core::{Config, Location, WeatherRequest, parse_date, provider_from_config};

use crate::table::{self, TableStyle};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weathercli",
    version,
    about = "Show a week of historical daily weather as a table",
    long_about = "Fetches seven days of daily observations from the Visual Crossing \
                  Weather API, starting at the given date, and prints them as a table.\n\
                  Requires WEATHER_API_KEY in the environment (a .env file is honored).\n\
                  Example: weathercli 2024-03-15"
)]
pub struct Cli {
    /// First day of the 7-day window, in YYYY-MM-DD format.
    pub start_date: String,

    /// Place name or "lat,lon" pair; defaults to Nashville, TN coordinates.
    #[arg(long)]
    pub location: Option<String>,

    /// Print plain tab-separated values instead of an aligned table.
    #[arg(long)]
    pub raw: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        self.run_with(|name| std::env::var(name).ok(), io::stdout()).await
    }

    /// Input is validated before configuration is read, and configuration
    /// before any request is sent.
    async fn run_with<F, W>(self, env: F, mut out: W) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
        W: Write,
    {
        let start = parse_date(&self.start_date)?;
        let location = match self.location.as_deref() {
            Some(loc) => loc.parse::<Location>()?,
            None => Location::default(),
        };
        let request = WeatherRequest::new(location, start)?;

        let config = Config::from_lookup(env)?;
        let provider = provider_from_config(&config)?;

        let records = provider.fetch(&request).await?;
        info!(count = records.len(), "Fetched weather records");

        let style = if self.raw { TableStyle::Raw } else { TableStyle::Aligned };
        table::render(&records, &mut out, style).context("Failed to write weather table")?;

        Ok(())
    }
}
