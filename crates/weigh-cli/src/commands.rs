//! One-shot subcommands: the same operations as the form, without a
//! terminal UI. Output is written to `out` so it can be captured.

use std::io::Write;

use anyhow::{Context as _, bail};
use chrono::NaiveDate;
use tracing::info;
use weigh_core::{roster::Roster, store::WeightStore};

use crate::form;

fn ensure_on_roster(roster: &Roster, person: &str) -> anyhow::Result<()> {
  if !roster.contains(person) {
    bail!(
      "unknown person {person:?}; expected one of: {}",
      roster.people().join(", ")
    );
  }
  Ok(())
}

/// `weigh height <person> <cm>`
pub fn set_height<S: WeightStore>(
  store: &S,
  roster: &Roster,
  person: &str,
  height_cm: f64,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  ensure_on_roster(roster, person)?;
  store
    .upsert_height(person, height_cm)
    .with_context(|| format!("saving height for {person}"))?;
  info!(person, height_cm, "height saved");
  writeln!(out, "{}", form::height_saved(person, height_cm))?;
  Ok(())
}

/// `weigh add <person> <kg> [--date YYYY-MM-DD]`
pub fn add_weight<S: WeightStore>(
  store: &S,
  roster: &Roster,
  person: &str,
  date: NaiveDate,
  weight_kg: f64,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  ensure_on_roster(roster, person)?;
  let entry = store
    .record_weight(person, date, weight_kg)
    .with_context(|| format!("recording weight for {person}"))?;

  let Some(entry) = entry else {
    bail!("no height recorded for {person}; run `weigh height {person:?} <cm>` first");
  };

  info!(person, id = entry.id, %date, weight_kg, "weight recorded");
  writeln!(out, "{}", form::record_added(person, entry.target_weight_kg))?;
  Ok(())
}

/// `weigh list <person>`
pub fn list<S: WeightStore>(
  store: &S,
  roster: &Roster,
  person: &str,
  out: &mut impl Write,
) -> anyhow::Result<()> {
  ensure_on_roster(roster, person)?;
  let entries = store
    .list_weights(person)
    .with_context(|| format!("listing weights for {person}"))?;

  if entries.is_empty() {
    writeln!(out, "{}", form::no_records(person))?;
    return Ok(());
  }

  writeln!(out, "{:<10}  {:>11}  {:>11}", "Date", "Weight (kg)", "Target (kg)")?;
  for e in &entries {
    writeln!(
      out,
      "{:<10}  {:>11.1}  {:>11.2}",
      e.date.format(form::DATE_FORMAT).to_string(),
      e.current_weight_kg,
      e.target_weight_kg,
    )?;
  }
  Ok(())
}
