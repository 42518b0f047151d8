//! `weigh` — personal weight tracker.
//!
//! # Usage
//!
//! ```
//! weigh                              # interactive form
//! weigh --config ~/.config/weigh.toml
//! weigh height "Person 1" 180
//! weigh add "Person 1" 81.4 --date 2024-01-31
//! weigh list "Person 1"
//! ```

mod app;
mod commands;
mod form;
mod logging;
mod settings;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use app::App;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use logging::LogTarget;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::Settings;
use tracing::level_filters::LevelFilter;
use weigh_core::{roster::Roster, store::WeightStore};
use weigh_store_sqlite::SqliteStore;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "weigh", version, about = "Personal weight tracker")]
struct Cli {
  /// Path to a TOML config file (store_path, people, show_chart, log_file).
  #[arg(short, long, value_name = "FILE", env = "WEIGH_CONFIG", default_value = "weigh.toml")]
  config: PathBuf,

  /// SQLite file to use instead of the configured `store_path`.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  /// Run one operation and exit instead of opening the form.
  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Record or replace a person's height.
  Height {
    person:    String,
    /// Height in centimetres (100.0–250.0).
    #[arg(value_parser = form::parse_height)]
    height_cm: f64,
  },
  /// Log a weight; the target is computed from the stored height.
  Add {
    person:    String,
    /// Weight in kilograms.
    #[arg(value_parser = form::parse_weight)]
    weight_kg: f64,
    /// Observation date (YYYY-MM-DD); defaults to today.
    #[arg(long, value_parser = form::parse_date)]
    date:      Option<NaiveDate>,
  },
  /// Print a person's records, oldest first.
  List { person: String },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let cli = Cli::parse();
  let settings = Settings::load(&cli.config)?;

  // The form owns the terminal, so keep it quiet unless asked.
  let interactive = cli.command.is_none();
  let default_level = if interactive {
    LevelFilter::WARN
  } else {
    LevelFilter::INFO
  };
  logging::init(
    default_level,
    LogTarget::choose(interactive, settings.log_file.as_deref()),
  )?;

  let roster = settings.roster()?;
  let store_path = cli
    .store
    .as_deref()
    .map(settings::expand_tilde)
    .unwrap_or_else(|| settings.store_path.clone());

  let store = SqliteStore::open(&store_path)
    .with_context(|| format!("failed to open store at {}", store_path.display()))?;

  match cli.command {
    Some(command) => run_command(command, &store, &roster),
    None => run_form(store, roster, settings.show_chart),
  }
}

fn run_command<S: WeightStore>(command: Command, store: &S, roster: &Roster) -> Result<()> {
  let mut out = io::stdout().lock();
  match command {
    Command::Height { person, height_cm } => {
      commands::set_height(store, roster, &person, height_cm, &mut out)
    }
    Command::Add { person, weight_kg, date } => {
      let date = date.unwrap_or_else(|| Local::now().date_naive());
      commands::add_weight(store, roster, &person, date, weight_kg, &mut out)
    }
    Command::List { person } => commands::list(store, roster, &person, &mut out),
  }
}

fn run_form<S: WeightStore>(store: S, roster: Roster, show_chart: bool) -> Result<()> {
  let mut app = App::new(store, roster, show_chart, Local::now().date_naive());

  // Load initial data before touching the terminal.
  app.reload().context("loading records")?;

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app);

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop<S: WeightStore>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling terminal events")? {
      continue;
    }

    match event::read().context("reading terminal event")? {
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      // Terminal will redraw on next iteration.
      _ => {}
    }
  }

  Ok(())
}
