//! [`SqliteStore`] — the SQLite implementation of [`WeightStore`].

use std::path::Path;

use rusqlite::{Connection, OptionalExtension as _, Transaction, TransactionBehavior};
use tracing::debug;

use weigh_core::{
  entry::{NewWeightEntry, Person, WeightEntry},
  store::WeightStore,
};

use crate::{
  encode::{RawWeightEntry, encode_date, is_foreign_key_violation},
  schema::{PRAGMAS, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A weigh store backed by a single SQLite file.
///
/// The connection is held for the store's lifetime and closed on drop.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening sqlite store");
    Self::from_connection(Connection::open(path)?)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    Self::from_connection(Connection::open_in_memory()?)
  }

  fn from_connection(conn: Connection) -> Result<Self> {
    conn.execute_batch(PRAGMAS)?;
    let store = Self { conn };
    store.initialize_schema()?;
    Ok(store)
  }

  /// Begin a write transaction. Dropping it without `commit` rolls back.
  fn write_tx(&self) -> Result<Transaction<'_>> {
    Ok(Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?)
  }
}

// ─── WeightStore impl ────────────────────────────────────────────────────────

impl WeightStore for SqliteStore {
  type Error = Error;

  fn initialize_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  // ── Persons ───────────────────────────────────────────────────────────────

  fn upsert_height(&self, person_id: &str, height_cm: f64) -> Result<()> {
    debug!(person_id, height_cm, "upserting height");

    // ON CONFLICT DO UPDATE keeps the parent row in place; INSERT OR REPLACE
    // would delete it first and trip the foreign key on existing weights.
    let tx = self.write_tx()?;
    tx.execute(
      "INSERT INTO users (person, height) VALUES (?1, ?2)
       ON CONFLICT(person) DO UPDATE SET height = excluded.height",
      rusqlite::params![person_id, height_cm],
    )?;
    tx.commit()?;
    Ok(())
  }

  fn get_height(&self, person_id: &str) -> Result<Option<f64>> {
    let height: Option<Option<f64>> = self
      .conn
      .query_row(
        "SELECT height FROM users WHERE person = ?1",
        rusqlite::params![person_id],
        |row| row.get(0),
      )
      .optional()?;

    Ok(height.flatten())
  }

  fn get_person(&self, person_id: &str) -> Result<Option<Person>> {
    Ok(self.get_height(person_id)?.map(|height_cm| Person {
      person_id: person_id.to_owned(),
      height_cm,
    }))
  }

  // ── Weight observations ───────────────────────────────────────────────────

  fn append_weight(&self, input: NewWeightEntry) -> Result<WeightEntry> {
    debug!(
      person_id = %input.person_id,
      date = %input.date,
      current_weight_kg = input.current_weight_kg,
      target_weight_kg = input.target_weight_kg,
      "appending weight"
    );

    let tx = self.write_tx()?;
    let inserted = tx.execute(
      "INSERT INTO weights (person, date, current_weight, target_weight)
       VALUES (?1, ?2, ?3, ?4)",
      rusqlite::params![
        input.person_id,
        encode_date(input.date),
        input.current_weight_kg,
        input.target_weight_kg,
      ],
    );

    match inserted {
      Ok(_) => {}
      Err(e) if is_foreign_key_violation(&e) => {
        return Err(Error::UnknownPerson(input.person_id));
      }
      Err(e) => return Err(e.into()),
    }

    let id = tx.last_insert_rowid();
    tx.commit()?;

    Ok(WeightEntry {
      id,
      person_id: input.person_id,
      date: input.date,
      current_weight_kg: input.current_weight_kg,
      target_weight_kg: input.target_weight_kg,
    })
  }

  fn list_weights(&self, person_id: &str) -> Result<Vec<WeightEntry>> {
    let mut stmt = self.conn.prepare(&format!(
      "SELECT {} FROM weights WHERE person = ?1 ORDER BY date, id",
      RawWeightEntry::COLUMNS,
    ))?;

    let raws = stmt
      .query_map(rusqlite::params![person_id], RawWeightEntry::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(person_id, count = raws.len(), "listed weights");

    raws.into_iter().map(RawWeightEntry::into_entry).collect()
  }
}
