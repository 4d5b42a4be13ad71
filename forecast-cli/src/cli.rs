use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use forecast_core::{App, Config, Event, HttpWeatherApi, NodeId, View};
use inquire::{InquireError, Select, Text};
use std::fmt;

use crate::output::format_view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather lookup client")]
pub struct Cli {
    /// Backend origin for this run, e.g. "http://localhost:3001".
    #[arg(long, global = true)]
    pub server: Option<String>,

    /// Print the page as HTML instead of text.
    #[arg(long, global = true)]
    pub html: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the backend and icon host interactively.
    Configure,

    /// Show current weather and the forecast for a city.
    Search {
        /// City name.
        city: String,
    },

    /// List previously searched cities, newest first.
    History,

    /// Remove a city from the search history.
    Delete {
        /// History entry id or city name.
        entry: String,
    },

    /// Browse interactively: search, revisit and delete cities.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Cli { server, html, command } = self;

        match command {
            Command::Configure => configure(),
            Command::Search { city } => {
                let mut app = connect(server.as_deref())?;
                app.view_mut().set_search_input(city);
                app.dispatch(Event::Submit).await;
                print(&app, html);
                Ok(())
            }
            Command::History => {
                let mut app = connect(server.as_deref())?;
                app.init().await;
                print(&app, html);
                Ok(())
            }
            Command::Delete { entry } => {
                let mut app = connect(server.as_deref())?;
                app.init().await;
                let delete = match app.view().find_history_row(&entry) {
                    Some(row) => row.delete,
                    None => bail!("No search history entry matches '{entry}'."),
                };
                app.dispatch(Event::Click(delete)).await;
                print(&app, html);
                Ok(())
            }
            Command::Interactive => {
                let mut app = connect(server.as_deref())?;
                interactive(&mut app, html).await
            }
        }
    }
}

/// Build the app from the saved config, with an optional backend override.
fn connect(server: Option<&str>) -> anyhow::Result<App<HttpWeatherApi>> {
    let mut config = Config::load()?;
    if let Some(server) = server {
        config.set_base_url(server)?;
    }

    Ok(App::new(
        HttpWeatherApi::from_config(&config)?,
        View::new(&config),
        |message: &str| eprintln!("{message}"),
    ))
}

fn print(app: &App<HttpWeatherApi>, html: bool) {
    println!("{}", format_view(app.view(), html));
}

async fn interactive(app: &mut App<HttpWeatherApi>, html: bool) -> anyhow::Result<()> {
    app.init().await;

    loop {
        print(app, html);
        println!();

        let mut choices = vec![Choice::Search];
        for row in app.view().history_rows() {
            choices.push(Choice::Show(row.entry.name.clone(), row.show));
            choices.push(Choice::Delete(row.entry.name.clone(), row.delete));
        }
        choices.push(Choice::Quit);

        let choice = match Select::new("What next?", choices).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read selection"),
        };

        match choice {
            Choice::Search => {
                let city = match Text::new("City:").prompt() {
                    Ok(city) => city,
                    Err(InquireError::OperationCanceled) => continue,
                    Err(InquireError::OperationInterrupted) => break,
                    Err(err) => return Err(err).context("Failed to read city name"),
                };
                app.view_mut().set_search_input(city);
                app.dispatch(Event::Submit).await;
            }
            Choice::Show(_, node) | Choice::Delete(_, node) => {
                app.dispatch(Event::Click(node)).await;
            }
            Choice::Quit => break,
        }
    }

    Ok(())
}

enum Choice {
    Search,
    Show(String, NodeId),
    Delete(String, NodeId),
    Quit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Search => f.write_str("Search for a city"),
            Choice::Show(city, _) => write!(f, "Show {city}"),
            Choice::Delete(city, _) => write!(f, "Delete {city}"),
            Choice::Quit => f.write_str("Quit"),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let base_url = Text::new("Backend URL:")
        .with_default(&config.base_url)
        .prompt()
        .context("Failed to read backend URL")?;
    config.set_base_url(&base_url)?;

    let icon_base_url = Text::new("Icon host:")
        .with_default(&config.icon_base_url)
        .prompt()
        .context("Failed to read icon host")?;
    config.set_icon_base_url(&icon_base_url)?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
