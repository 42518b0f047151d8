//! Person records and weight observations.
//!
//! A person record holds the height used to derive target weights. Weight
//! observations are append-only: once written, no field is ever updated, and
//! the target weight is frozen at the value computed when the row was
//! inserted.

use chrono::NaiveDate;

/// The stored height profile for one tracked individual.
#[derive(Debug, Clone, PartialEq)]
pub struct Person {
  pub person_id: String,
  pub height_cm: f64,
}

/// One immutable dated measurement plus its frozen target.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntry {
  /// Store-assigned, unique and ascending in insertion order.
  pub id:                i64,
  pub person_id:         String,
  pub date:              NaiveDate,
  pub current_weight_kg: f64,
  /// Snapshot taken at insert time; not recomputed if height changes.
  pub target_weight_kg:  f64,
}

impl WeightEntry {
  /// Signed distance to target; positive means above it.
  pub fn delta_kg(&self) -> f64 { self.current_weight_kg - self.target_weight_kg }
}

/// Input to [`crate::store::WeightStore::append_weight`].
/// `id` is always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWeightEntry {
  pub person_id:         String,
  pub date:              NaiveDate,
  pub current_weight_kg: f64,
  pub target_weight_kg:  f64,
}

impl NewWeightEntry {
  pub fn new(
    person_id: impl Into<String>,
    date: NaiveDate,
    current_weight_kg: f64,
    target_weight_kg: f64,
  ) -> Self {
    Self {
      person_id: person_id.into(),
      date,
      current_weight_kg,
      target_weight_kg,
    }
  }
}
