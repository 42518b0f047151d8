//! Input limits and parsing shared by the terminal form and the subcommands.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use thiserror::Error;

/// Accepted heights, in centimetres.
pub const HEIGHT_RANGE_CM: RangeInclusive<f64> = 100.0..=250.0;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
  #[error("{field} must be a number, got {input:?}")]
  NotANumber { field: &'static str, input: String },

  #[error("height must be between 100.0 and 250.0 cm, got {0:.1}")]
  HeightOutOfRange(f64),

  #[error("weight must not be negative, got {0:.1}")]
  NegativeWeight(f64),

  #[error("date must be YYYY-MM-DD, got {0:?}")]
  BadDate(String),
}

/// Round to the one-decimal precision the form works in.
pub fn round_to_tenth(value: f64) -> f64 { (value * 10.0).round() / 10.0 }

fn parse_number(field: &'static str, input: &str) -> Result<f64, InputError> {
  let trimmed = input.trim();
  match trimmed.parse::<f64>() {
    // `+ 0.0` folds a rounded `-0.0` into `0.0`.
    Ok(v) if v.is_finite() => Ok(round_to_tenth(v) + 0.0),
    _ => Err(InputError::NotANumber { field, input: trimmed.to_owned() }),
  }
}

pub fn parse_height(input: &str) -> Result<f64, InputError> {
  let height = parse_number("height", input)?;
  if !HEIGHT_RANGE_CM.contains(&height) {
    return Err(InputError::HeightOutOfRange(height));
  }
  Ok(height)
}

pub fn parse_weight(input: &str) -> Result<f64, InputError> {
  let weight = parse_number("weight", input)?;
  if weight < 0.0 {
    return Err(InputError::NegativeWeight(weight));
  }
  Ok(weight)
}

pub fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
  let trimmed = input.trim();
  NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
    .map_err(|_| InputError::BadDate(trimmed.to_owned()))
}

// ─── Messages ─────────────────────────────────────────────────────────────────

pub fn height_saved(person: &str, height_cm: f64) -> String {
  format!("Height of {height_cm:.1} cm saved for {person}.")
}

pub fn record_added(person: &str, target_weight_kg: f64) -> String {
  format!("Record added for {person}. Target weight is {target_weight_kg:.2} kg.")
}

pub fn no_records(person: &str) -> String { format!("No records found for {person}.") }
