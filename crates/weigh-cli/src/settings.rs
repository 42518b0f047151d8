//! Layered configuration: defaults, an optional TOML file, then `WEIGH_*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;
use weigh_core::roster::{DEFAULT_PEOPLE, Roster};

/// Runtime settings, deserialised from `weigh.toml` and the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// SQLite file holding heights and weights.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  /// Persons offered by the selector, in display order.
  #[serde(default = "default_people")]
  pub people: Vec<String>,

  /// Show the weight chart when the form opens.
  #[serde(default)]
  pub show_chart: bool,

  /// Write logs here. Without it subcommands log to stderr and the form
  /// discards log output.
  #[serde(default)]
  pub log_file: Option<PathBuf>,
}

fn default_store_path() -> PathBuf { PathBuf::from("weight_tracker.db") }

fn default_people() -> Vec<String> {
  DEFAULT_PEOPLE.iter().map(|p| (*p).to_owned()).collect()
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      store_path: default_store_path(),
      people:     default_people(),
      show_chart: false,
      log_file:   None,
    }
  }
}

impl Settings {
  /// Read `path` if it exists, then overlay `WEIGH_*` variables.
  /// `WEIGH_PEOPLE` is a comma-separated list.
  pub fn load(path: &Path) -> anyhow::Result<Self> { Self::load_with(path, environment()) }

  /// As [`Settings::load`], with the environment layer supplied by the caller.
  fn load_with(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(env)
      .build()
      .with_context(|| format!("failed to read config file {}", path.display()))?;

    let mut settings: Settings = settings
      .try_deserialize()
      .context("failed to deserialise settings")?;

    settings.store_path = expand_tilde(&settings.store_path);
    settings.log_file = settings.log_file.as_deref().map(expand_tilde);
    Ok(settings)
  }

  pub fn roster(&self) -> anyhow::Result<Roster> {
    Roster::new(&self.people).context("invalid `people` setting")
  }
}

fn environment() -> config::Environment {
  config::Environment::with_prefix("WEIGH")
    .try_parsing(true)
    .list_separator(",")
    .with_list_parse_key("people")
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
