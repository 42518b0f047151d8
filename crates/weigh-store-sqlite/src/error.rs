//! Error type for `weigh-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  /// A weight observation referenced a person with no stored height.
  #[error("unknown person: {0:?}")]
  UnknownPerson(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
