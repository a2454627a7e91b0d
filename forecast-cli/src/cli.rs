use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{Config, ForecastProvider, ForecastRequest, LoadState, provider_from_config};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing::info;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Terminal weather dashboard")]
pub struct Cli {
    /// Log requests and grouping decisions to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and a default location.
    Configure,

    /// Show today's slots and the 7-day outlook for a location.
    Show {
        /// Location name, e.g. "Gaza" or "London,GB". Defaults to the configured one.
        location: Option<String>,

        /// Print the dashboard as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Print the path of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => show(location.as_deref(), json).await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // Read the file directly so an env override never gets persisted.
    let path = Config::config_file_path()?;
    let mut cfg = Config::load_from(&path)?;

    let key_prompt = if cfg.api_key().is_some() {
        "OpenWeather API key (leave empty to keep the current one):"
    } else {
        "OpenWeather API key:"
    };
    let api_key = Password::new(key_prompt)
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if !api_key.trim().is_empty() {
        cfg.set_api_key(api_key);
    } else if cfg.api_key().is_none() {
        bail!("An API key is required. Get one at https://openweathermap.org/api");
    }

    let mut location_prompt = Text::new("Default location:");
    if let Some(current) = cfg.default_location.as_deref() {
        location_prompt = location_prompt.with_default(current);
    }
    let location = location_prompt.prompt().context("Failed to read default location")?;
    let location = location.trim();
    cfg.default_location = (!location.is_empty()).then(|| location.to_string());

    cfg.save_to(&path)?;
    info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}

async fn show(location: Option<&str>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let location = config.resolve_location(location)?;
    let provider = provider_from_config(&config)?;

    if let Some(msg) = LoadState::Loading.status_message().filter(|_| !json) {
        eprintln!("{msg}");
    }

    let request = ForecastRequest { location, sample_count: config.endpoint.sample_count };
    let state = LoadState::from_result(provider.fetch_forecast(&request).await);

    match state {
        LoadState::Ready(dashboard) if json => {
            println!("{}", serde_json::to_string_pretty(&dashboard)?);
        }
        LoadState::Ready(dashboard) => print!("{}", render::render(&dashboard)),
        // anyhow prints this as "Error: {msg}" on the way out.
        LoadState::Failed(msg) => bail!(msg),
        LoadState::Loading => {}
    }

    Ok(())
}
