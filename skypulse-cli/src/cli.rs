use std::{fmt, process::ExitCode};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Select, Text};
use skypulse_core::{
    Config, Dashboard, FetchTicket, LocationQuery, PRESET_CITIES, View, WeatherProvider,
    provider_from_config,
};

use crate::render::{render_record, render_view};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skypulse", version, about = "Weather and air quality for Vietnamese cities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the Gemini API key (and optionally a default city).
    Configure {
        /// City loaded on start and by `show` without arguments.
        #[arg(long)]
        default_city: Option<String>,
    },

    /// Show weather and air quality once.
    Show {
        /// City name; takes precedence over coordinates.
        city: Option<String>,

        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List the preset cities.
    Cities,

    /// Interactive dashboard: pick, search and refresh.
    Dashboard,
}

impl Cli {
    /// Fetch failures are reported to the user here and turned into a failing exit code;
    /// only setup and I/O problems come back as `Err`.
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure { default_city } => {
                configure(default_city).map(|()| ExitCode::SUCCESS)
            }
            Command::Show { city, lat, lon, json } => {
                let config = Config::load_with_env()?;
                let city = city.or_else(|| {
                    (lat.is_none() && lon.is_none()).then(|| config.default_city.clone())
                });
                show(&config, LocationQuery::from_parts(city, lat, lon), json).await
            }
            Command::Cities => {
                for city in PRESET_CITIES {
                    println!("{city}");
                }
                Ok(ExitCode::SUCCESS)
            }
            Command::Dashboard => {
                let config = Config::load_with_env()?;
                dashboard(&config).await.map(|()| ExitCode::SUCCESS)
            }
        }
    }
}

fn configure(default_city: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Password::new("Gemini API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;

    if !key.trim().is_empty() {
        config.set_api_key(key);
    }
    if let Some(city) = default_city {
        config.default_city = city;
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(config: &Config, query: LocationQuery, json: bool) -> anyhow::Result<ExitCode> {
    let provider = provider_from_config(config);
    eprintln!("Loading weather for {query}...");

    match provider.fetch(&query).await {
        Ok(report) if json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Ok(report) => {
            print!("{}", render_record(&report.record, &report.sources));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(error = %err, "show failed");
            let view = View::Error { message: err.user_message(), needs_setup: err.needs_setup() };
            eprint!("{}", render_view(&view));
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Menu entries of the interactive dashboard.
#[derive(Debug, Clone)]
enum Action {
    Search,
    Refresh,
    Retry,
    City(&'static str),
    Quit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Search => f.write_str("Search for a city..."),
            Action::Refresh => f.write_str("Refresh"),
            Action::Retry => f.write_str("Try again"),
            Action::City(city) => f.write_str(city),
            Action::Quit => f.write_str("Quit"),
        }
    }
}

fn actions(view: &View<'_>) -> Vec<Action> {
    let mut actions = vec![Action::Search];
    match view {
        View::Error { .. } => actions.push(Action::Retry),
        _ => actions.push(Action::Refresh),
    }
    actions.extend(PRESET_CITIES.iter().copied().map(Action::City));
    actions.push(Action::Quit);
    actions
}

async fn dashboard(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(config);
    let mut dash = Dashboard::new(config.default_city.clone());

    let ticket = dash.activate();
    run_fetch(&mut dash, provider.as_ref(), ticket).await;

    loop {
        println!("\n{}", render_view(&dash.view()));

        let choice = Select::new("What next?", actions(&dash.view())).with_page_size(8).prompt();
        let action = match choice {
            Ok(action) => action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read selection"),
        };

        tracing::debug!(?action, "dashboard action");
        let ticket = match action {
            Action::Quit => break,
            Action::Refresh => dash.refresh(),
            Action::Retry => dash.retry(),
            Action::City(city) => dash.select_city(city),
            Action::Search => {
                let text = match Text::new("City:").prompt() {
                    Ok(text) => text,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(e) => return Err(e).context("Failed to read search text"),
                };
                dash.set_search_text(text);
                match dash.submit_search() {
                    Some(ticket) => ticket,
                    None => continue,
                }
            }
        };

        run_fetch(&mut dash, provider.as_ref(), ticket).await;
    }

    Ok(())
}

async fn run_fetch(dash: &mut Dashboard, provider: &dyn WeatherProvider, ticket: FetchTicket) {
    print!("{}", render_view(&dash.view()));
    dash.load(provider, &ticket).await;
}
