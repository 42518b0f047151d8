//! Application state machine and event dispatcher.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{error, info};
use weigh_core::{
  entry::{Person, WeightEntry},
  roster::Roster,
  store::WeightStore,
};

use crate::form;

/// Longest text accepted by any input field.
const MAX_INPUT_LEN: usize = 10;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// The selected person has no height yet.
  Setup,
  /// Height is known; weights can be logged.
  Log,
}

/// Which input on the log screen receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Date,
  Weight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
  Success,
  Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
  pub kind: StatusKind,
  pub text: String,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S: WeightStore> {
  pub store: S,

  pub roster: Roster,

  /// Index of the selected person within the roster.
  pub person_cursor: usize,

  /// Stored record for the selected person, if set up.
  pub person: Option<Person>,

  /// Observations for the selected person, ascending by date.
  pub entries: Vec<WeightEntry>,

  pub screen: Screen,

  pub focus: Field,

  pub height_input: String,

  pub date_input: String,

  pub weight_input: String,

  /// Whether the chart is drawn next to the records table.
  pub show_chart: bool,

  /// First visible row of the records table.
  pub history_scroll: usize,

  /// Outcome of the last submission, shown in the status bar.
  pub status: Option<Status>,
}

impl<S: WeightStore> App<S> {
  /// Create an [`App`] for the first person on the roster. Call
  /// [`App::reload`] before drawing.
  pub fn new(store: S, roster: Roster, show_chart: bool, today: NaiveDate) -> Self {
    Self {
      store,
      roster,
      person_cursor: 0,
      person: None,
      entries: Vec::new(),
      screen: Screen::Setup,
      focus: Field::Weight,
      height_input: String::new(),
      date_input: today.format(form::DATE_FORMAT).to_string(),
      weight_input: String::new(),
      show_chart,
      history_scroll: 0,
      status: None,
    }
  }

  pub fn selected_person(&self) -> &str { self.roster.get_wrapped(self.person_cursor) }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the selected person's record and observations. On error the
  /// previously loaded state is left untouched.
  pub fn reload(&mut self) -> Result<(), S::Error> {
    let name = self.selected_person().to_owned();
    let person = self.store.get_person(&name)?;
    let entries = self.store.list_weights(&name)?;

    self.screen = if person.is_some() {
      Screen::Log
    } else {
      Screen::Setup
    };
    self.person = person;
    self.entries = entries;
    self.history_scroll = 0;
    Ok(())
  }

  fn succeed(&mut self, text: String) {
    self.status = Some(Status { kind: StatusKind::Success, text });
  }

  fn fail(&mut self, text: String) {
    self.status = Some(Status { kind: StatusKind::Failure, text });
  }

  /// Surface a storage error and abandon the current interaction.
  fn fail_storage(&mut self, action: &str, err: S::Error) {
    error!(person = self.selected_person(), action, error = %err, "storage error");
    self.fail(format!("Failed to {action}: {err}"));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match key.code {
      KeyCode::Esc | KeyCode::Char('q') => return false,

      // Person selector
      KeyCode::Left | KeyCode::Char('[') => self.select_person(-1),
      KeyCode::Right | KeyCode::Char(']') => self.select_person(1),

      KeyCode::Tab | KeyCode::BackTab => {
        self.focus = match self.focus {
          Field::Date => Field::Weight,
          Field::Weight => Field::Date,
        };
      }

      // Records table
      KeyCode::Down => {
        if self.history_scroll + 1 < self.entries.len() {
          self.history_scroll += 1;
        }
      }
      KeyCode::Up => {
        self.history_scroll = self.history_scroll.saturating_sub(1);
      }

      KeyCode::Char('c') => self.show_chart = !self.show_chart,

      KeyCode::Backspace => {
        self.focused_input_mut().pop();
      }
      KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
        let input = self.focused_input_mut();
        if input.len() < MAX_INPUT_LEN {
          input.push(c);
        }
      }

      KeyCode::Enter => match self.screen {
        Screen::Setup => self.submit_height(),
        Screen::Log => self.submit_weight(),
      },

      _ => {}
    }
    true
  }

  fn focused_input_mut(&mut self) -> &mut String {
    match (self.screen, self.focus) {
      (Screen::Setup, _) => &mut self.height_input,
      (Screen::Log, Field::Date) => &mut self.date_input,
      (Screen::Log, Field::Weight) => &mut self.weight_input,
    }
  }

  /// Move the selector by `step`, wrapping, and load that person.
  fn select_person(&mut self, step: isize) {
    let len = self.roster.len() as isize;
    let previous = self.person_cursor;
    self.person_cursor = (previous as isize + step).rem_euclid(len) as usize;
    self.status = None;
    if let Err(e) = self.reload() {
      self.fail_storage("load records", e);
      // Stay on the person whose data is still loaded.
      self.person_cursor = previous;
      return;
    }
    self.height_input.clear();
    self.weight_input.clear();
  }

  // ── Submissions ───────────────────────────────────────────────────────────

  fn submit_height(&mut self) {
    let height_cm = match form::parse_height(&self.height_input) {
      Ok(h) => h,
      Err(e) => return self.fail(e.to_string()),
    };

    let name = self.selected_person().to_owned();
    if let Err(e) = self.store.upsert_height(&name, height_cm) {
      return self.fail_storage("save height", e);
    }
    info!(person = %name, height_cm, "height saved");

    self.height_input.clear();
    if let Err(e) = self.reload() {
      return self.fail_storage("load records", e);
    }
    self.succeed(form::height_saved(&name, height_cm));
  }

  fn submit_weight(&mut self) {
    let date = match form::parse_date(&self.date_input) {
      Ok(d) => d,
      Err(e) => return self.fail(e.to_string()),
    };
    let weight_kg = match form::parse_weight(&self.weight_input) {
      Ok(w) => w,
      Err(e) => return self.fail(e.to_string()),
    };

    let name = self.selected_person().to_owned();
    let entry = match self.store.record_weight(&name, date, weight_kg) {
      Ok(Some(entry)) => entry,
      Ok(None) => {
        // Height disappeared underneath us; fall back to setup.
        if let Err(e) = self.reload() {
          return self.fail_storage("load records", e);
        }
        return self.fail(format!("No height recorded for {name}."));
      }
      Err(e) => return self.fail_storage("add record", e),
    };
    info!(person = %name, id = entry.id, %date, weight_kg, "weight recorded");

    self.weight_input.clear();
    if let Err(e) = self.reload() {
      return self.fail_storage("load records", e);
    }
    self.succeed(form::record_added(&name, entry.target_weight_kg));
  }
}

#[cfg(test)]
mod tests {
  use weigh_core::target::compute_target;
  use weigh_store_sqlite::SqliteStore;

  use super::*;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() }

  fn app() -> App<SqliteStore> {
    let store = SqliteStore::open_in_memory().unwrap();
    let roster = Roster::new(["Karthi", "Vinoth"]).unwrap();
    let mut app = App::new(store, roster, false, today());
    app.reload().unwrap();
    app
  }

  fn press(app: &mut App<SqliteStore>, code: KeyCode) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
  }

  fn type_text(app: &mut App<SqliteStore>, text: &str) {
    for c in text.chars() {
      press(app, KeyCode::Char(c));
    }
  }

  fn status_text(app: &App<SqliteStore>) -> &str {
    app.status.as_ref().map(|s| s.text.as_str()).unwrap_or_default()
  }

  #[test]
  fn starts_in_setup_for_new_person() {
    let app = app();
    assert_eq!(app.screen, Screen::Setup);
    assert_eq!(app.selected_person(), "Karthi");
    assert_eq!(app.date_input, "2024-03-01");
  }

  #[test]
  fn saving_height_moves_to_log() {
    let mut app = app();
    type_text(&mut app, "180");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::Log);
    assert_eq!(app.person.as_ref().unwrap().height_cm, 180.0);
    assert_eq!(status_text(&app), "Height of 180.0 cm saved for Karthi.");
    assert!(app.height_input.is_empty());
  }

  #[test]
  fn out_of_range_height_is_rejected() {
    let mut app = app();
    type_text(&mut app, "99");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.screen, Screen::Setup);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Failure);
    assert_eq!(app.store.get_height("Karthi").unwrap(), None);
  }

  #[test]
  fn logging_weight_appends_with_target() {
    let mut app = app();
    type_text(&mut app, "180");
    press(&mut app, KeyCode::Enter);

    type_text(&mut app, "80.5");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.entries.len(), 1);
    let entry = &app.entries[0];
    assert_eq!(entry.current_weight_kg, 80.5);
    assert!((entry.target_weight_kg - compute_target(180.0)).abs() < 1e-9);
    assert_eq!(status_text(&app), "Record added for Karthi. Target weight is 74.52 kg.");
    assert!(app.weight_input.is_empty());
  }

  #[test]
  fn date_field_is_editable() {
    let mut app = app();
    type_text(&mut app, "170");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Field::Date);
    for _ in 0..10 {
      press(&mut app, KeyCode::Backspace);
    }
    type_text(&mut app, "2024-01-15");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "70");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.entries[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
  }

  #[test]
  fn bad_date_is_rejected() {
    let mut app = app();
    type_text(&mut app, "170");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Backspace);
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "70");
    press(&mut app, KeyCode::Enter);

    assert!(app.entries.is_empty());
    assert!(status_text(&app).starts_with("date must be YYYY-MM-DD"));
  }

  #[test]
  fn switching_person_loads_their_state() {
    let mut app = app();
    type_text(&mut app, "180");
    press(&mut app, KeyCode::Enter);

    press(&mut app, KeyCode::Right);
    assert_eq!(app.selected_person(), "Vinoth");
    assert_eq!(app.screen, Screen::Setup);
    assert!(app.status.is_none());

    press(&mut app, KeyCode::Right);
    assert_eq!(app.selected_person(), "Karthi");
    assert_eq!(app.screen, Screen::Log);

    press(&mut app, KeyCode::Left);
    assert_eq!(app.selected_person(), "Vinoth");
  }

  #[test]
  fn letters_are_not_typed_into_inputs() {
    let mut app = app();
    type_text(&mut app, "1x8y0");
    assert_eq!(app.height_input, "180");
  }

  #[test]
  fn chart_toggles_and_quit_keys() {
    let mut app = app();
    assert!(press(&mut app, KeyCode::Char('c')));
    assert!(app.show_chart);
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert!(!press(&mut app, KeyCode::Esc));
    assert!(!app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
  }

  // ─── Storage failures ──────────────────────────────────────────────────────

  /// Delegates to an in-memory store but can be told to fail listings.
  struct FlakyStore {
    inner:      SqliteStore,
    fail_lists: std::cell::Cell<bool>,
  }

  impl WeightStore for FlakyStore {
    type Error = weigh_store_sqlite::Error;

    fn initialize_schema(&self) -> Result<(), Self::Error> { self.inner.initialize_schema() }

    fn upsert_height(&self, person_id: &str, height_cm: f64) -> Result<(), Self::Error> {
      self.inner.upsert_height(person_id, height_cm)
    }

    fn get_height(&self, person_id: &str) -> Result<Option<f64>, Self::Error> {
      self.inner.get_height(person_id)
    }

    fn get_person(&self, person_id: &str) -> Result<Option<Person>, Self::Error> {
      self.inner.get_person(person_id)
    }

    fn append_weight(
      &self,
      input: weigh_core::entry::NewWeightEntry,
    ) -> Result<WeightEntry, Self::Error> {
      self.inner.append_weight(input)
    }

    fn list_weights(&self, person_id: &str) -> Result<Vec<WeightEntry>, Self::Error> {
      if self.fail_lists.get() {
        return Err(weigh_store_sqlite::Error::DateParse("disk on fire".into()));
      }
      self.inner.list_weights(person_id)
    }
  }

  #[test]
  fn failed_switch_keeps_previous_person_loaded() {
    let store = FlakyStore {
      inner:      SqliteStore::open_in_memory().unwrap(),
      fail_lists: std::cell::Cell::new(false),
    };
    store.upsert_height("Karthi", 180.0).unwrap();
    store.record_weight("Karthi", today(), 80.0).unwrap();
    store.upsert_height("Vinoth", 165.0).unwrap();

    let roster = Roster::new(["Karthi", "Vinoth"]).unwrap();
    let mut app = App::new(store, roster, false, today());
    app.reload().unwrap();
    assert_eq!(app.screen, Screen::Log);

    app.store.fail_lists.set(true);
    assert!(app.handle_key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));

    assert_eq!(app.selected_person(), "Karthi");
    assert_eq!(app.person.as_ref().unwrap().person_id, "Karthi");
    assert_eq!(app.screen, Screen::Log);
    assert_eq!(app.entries.len(), 1);
    assert!(app.entries.iter().all(|e| e.person_id == "Karthi"));

    let status = app.status.as_ref().unwrap();
    assert_eq!(status.kind, StatusKind::Failure);
    assert!(status.text.starts_with("Failed to load records"));
  }

  #[test]
  fn failed_reload_leaves_state_untouched() {
    let store = FlakyStore {
      inner:      SqliteStore::open_in_memory().unwrap(),
      fail_lists: std::cell::Cell::new(false),
    };
    let roster = Roster::new(["Karthi", "Vinoth"]).unwrap();
    let mut app = App::new(store, roster, false, today());
    app.reload().unwrap();

    app.store.upsert_height("Karthi", 180.0).unwrap();
    app.store.fail_lists.set(true);
    assert!(app.reload().is_err());

    // The height lookup succeeded but must not be applied on its own.
    assert!(app.person.is_none());
    assert_eq!(app.screen, Screen::Setup);
  }
}
