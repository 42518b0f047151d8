//! Error types for `weigh-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("roster must name at least one person")]
  EmptyRoster,

  #[error("roster contains a blank person name")]
  BlankPerson,

  #[error("person {0:?} appears more than once in the roster")]
  DuplicatePerson(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
