use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use forecast_core::{
    Config, DEFAULT_ENDPOINT, FileSource, ForecastResponse, ForecastSource, build_forecast,
    list_names, source_from_config,
};
use inquire::{Password, Select, Text};
use std::path::PathBuf;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "36-hour county weather forecast")]
pub struct Cli {
    /// Open-data API key; overrides the configured one.
    #[arg(long, env = "CWA_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Dataset endpoint; overrides the configured one.
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Read a saved JSON payload instead of calling the endpoint.
    #[arg(long, value_name = "PATH", global = true)]
    pub from_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key (and optionally a custom endpoint).
    Configure,

    /// List location names in feed order.
    Locations,

    /// Show the forecast table and charts for one location.
    Show {
        /// Exact location name; prompts with a list when absent.
        location: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Print only the table in `table` format.
        #[arg(long)]
        no_charts: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    LongJson,
    LongCsv,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match &self.command {
            Command::Configure => configure(),
            Command::Locations => {
                let resp = self.fetch().await?;
                for name in list_names(&resp) {
                    println!("{name}");
                }
                Ok(())
            }
            Command::Show { location, format, no_charts } => {
                let resp = self.fetch().await?;

                let name = match location {
                    Some(name) => name.clone(),
                    None => select_location(&resp)?,
                };

                let forecast = build_forecast(&resp, &name)?;

                let output = match format {
                    OutputFormat::Table => {
                        let mut out = String::new();
                        if let Some(desc) = &resp.records.dataset_description {
                            out.push_str(&format!("{desc}\n"));
                        }
                        out.push_str(&format!("{}\n\n", forecast.location));
                        out.push_str(&render::render_table(&forecast));
                        if !no_charts {
                            out.push_str("\nTemperature (min .. max)\n");
                            out.push_str(&render::render_temperature_chart(&forecast.rows));
                            out.push_str("\nRain probability\n");
                            out.push_str(&render::render_rain_chart(&forecast.rows));
                        }
                        out
                    }
                    OutputFormat::Json => render::to_json(&forecast)?,
                    OutputFormat::Csv => render::to_csv(&forecast.rows)?,
                    OutputFormat::LongJson => render::to_json(&forecast.long_form())?,
                    OutputFormat::LongCsv => render::to_csv(&forecast.long_form())?,
                };

                print!("{output}");
                if !output.ends_with('\n') {
                    println!();
                }
                Ok(())
            }
        }
    }

    fn source(&self) -> anyhow::Result<Box<dyn ForecastSource>> {
        if let Some(path) = &self.from_file {
            return Ok(Box::new(FileSource::new(path)));
        }

        let config = Config::load()?.with_overrides(self.api_key.clone(), self.endpoint.clone());
        source_from_config(&config)
    }

    async fn fetch(&self) -> anyhow::Result<ForecastResponse> {
        let source = self.source()?;
        let resp = source.fetch().await.context("Could not load the forecast")?;
        log::info!("Forecast contains {} locations", resp.records.locations.len());
        Ok(resp)
    }
}

fn select_location(resp: &ForecastResponse) -> anyhow::Result<String> {
    let names: Vec<String> = list_names(resp).into_iter().map(str::to_owned).collect();
    if names.is_empty() {
        anyhow::bail!("Forecast contains no locations");
    }

    Select::new("Location:", names).prompt().context("Location selection cancelled")
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("API key:")
        .without_confirmation()
        .with_help_message("Issued by the open-data platform, e.g. CWA-XXXXXXXX-...")
        .prompt()
        .context("Configuration cancelled")?;

    let endpoint = Text::new("Endpoint:")
        .with_default(config.endpoint())
        .prompt()
        .context("Configuration cancelled")?;

    config.api_key = Some(api_key.trim().to_string());
    config.endpoint = if endpoint.trim() == DEFAULT_ENDPOINT {
        None
    } else {
        Some(endpoint.trim().to_string())
    };

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}
