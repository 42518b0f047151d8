//! Tracing subscriber setup.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Where formatted log lines are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
  /// Appended to a file, without colour.
  File(&'a Path),
  Stderr,
  /// Dropped. The form owns the terminal and stray lines would corrupt it.
  Discard,
}

impl<'a> LogTarget<'a> {
  /// A configured file always wins; otherwise the form discards and
  /// one-shot commands use stderr.
  pub fn choose(interactive: bool, log_file: Option<&'a Path>) -> Self {
    match log_file {
      Some(path) => Self::File(path),
      None if interactive => Self::Discard,
      None => Self::Stderr,
    }
  }
}

/// Install the global subscriber. `RUST_LOG` overrides `default_level`.
pub fn init(default_level: LevelFilter, target: LogTarget<'_>) -> anyhow::Result<()> {
  let filter = EnvFilter::builder()
    .with_default_directive(default_level.into())
    .from_env_lossy();
  let builder = tracing_subscriber::fmt().with_env_filter(filter);

  match target {
    LogTarget::File(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
      builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }
    LogTarget::Stderr => builder.with_writer(std::io::stderr).init(),
    LogTarget::Discard => builder.with_writer(std::io::sink).init(),
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn form_without_log_file_discards() {
    assert_eq!(LogTarget::choose(true, None), LogTarget::Discard);
  }

  #[test]
  fn commands_log_to_stderr() {
    assert_eq!(LogTarget::choose(false, None), LogTarget::Stderr);
  }

  #[test]
  fn log_file_wins_in_both_modes() {
    let path = Path::new("/tmp/weigh.log");
    assert_eq!(LogTarget::choose(true, Some(path)), LogTarget::File(path));
    assert_eq!(LogTarget::choose(false, Some(path)), LogTarget::File(path));
  }
}
