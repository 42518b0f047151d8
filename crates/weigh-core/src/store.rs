//! The `WeightStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `weigh-store-sqlite`).
//! The CLI depends on this abstraction, not on any concrete backend.

use chrono::NaiveDate;

use crate::{
  entry::{NewWeightEntry, Person, WeightEntry},
  target::compute_target,
};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a weigh store backend.
///
/// Person records are upserted; weight observations are append-only. All
/// calls are synchronous and each one is its own transaction.
pub trait WeightStore {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Ensure both relations exist. Safe to call any number of times.
  fn initialize_schema(&self) -> Result<(), Self::Error>;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Insert a person record or replace the stored height. Bounds are the
  /// caller's concern.
  fn upsert_height(&self, person_id: &str, height_cm: f64) -> Result<(), Self::Error>;

  /// The stored height, or `None` if the person has never been set up.
  fn get_height(&self, person_id: &str) -> Result<Option<f64>, Self::Error>;

  /// The full person record, or `None` if absent.
  fn get_person(&self, person_id: &str) -> Result<Option<Person>, Self::Error>;

  // ── Weight observations ───────────────────────────────────────────────

  /// Append one observation and return it with its assigned id.
  fn append_weight(&self, input: NewWeightEntry) -> Result<WeightEntry, Self::Error>;

  /// All observations for `person_id`, ascending by date. Unknown persons
  /// yield an empty list.
  fn list_weights(&self, person_id: &str) -> Result<Vec<WeightEntry>, Self::Error>;

  /// Look up the person's height, compute the target from it and append an
  /// observation. Returns `None` without writing if no height is recorded.
  fn record_weight(
    &self,
    person_id: &str,
    date: NaiveDate,
    current_weight_kg: f64,
  ) -> Result<Option<WeightEntry>, Self::Error> {
    let Some(height_cm) = self.get_height(person_id)? else {
      return Ok(None);
    };
    let target = compute_target(height_cm);
    self
      .append_weight(NewWeightEntry::new(person_id, date, current_weight_kg, target))
      .map(Some)
  }
}
