//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings so that lexical order in SQL
//! matches chronological order.

use chrono::NaiveDate;
use weigh_core::entry::WeightEntry;

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Constraint errors ───────────────────────────────────────────────────────

/// Whether `err` is SQLite rejecting a row for a missing parent key.
pub fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _)
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
  )
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `weights` row as read from SQLite, before date decoding.
pub struct RawWeightEntry {
  pub id:             i64,
  pub person:         String,
  pub date:           String,
  pub current_weight: f64,
  pub target_weight:  f64,
}

impl RawWeightEntry {
  pub const COLUMNS: &'static str = "id, person, date, current_weight, target_weight";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      person:         row.get(1)?,
      date:           row.get(2)?,
      current_weight: row.get(3)?,
      target_weight:  row.get(4)?,
    })
  }

  pub fn into_entry(self) -> Result<WeightEntry> {
    Ok(WeightEntry {
      id:                self.id,
      person_id:         self.person,
      date:              decode_date(&self.date)?,
      current_weight_kg: self.current_weight,
      target_weight_kg:  self.target_weight,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn date_text_is_iso() {
    let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    assert_eq!(encode_date(d), "2024-03-09");
    assert_eq!(decode_date("2024-03-09").unwrap(), d);
  }

  #[test]
  fn malformed_date_is_an_error() {
    let err = decode_date("09/03/2024").unwrap_err();
    assert!(matches!(err, Error::DateParse(_)));
  }
}
