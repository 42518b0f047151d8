//! The configured set of person identifiers a form offers for selection.

use crate::{Error, Result};

/// Names used when no roster is configured.
pub const DEFAULT_PEOPLE: [&str; 2] = ["Person 1", "Person 2"];

/// A non-empty, duplicate-free list of tracked persons, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
  people: Vec<String>,
}

impl Roster {
  /// Validate and build a roster. Names are trimmed.
  pub fn new<I, S>(names: I) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut people: Vec<String> = Vec::new();
    for name in names {
      let name = name.as_ref().trim();
      if name.is_empty() {
        return Err(Error::BlankPerson);
      }
      if people.iter().any(|p| p == name) {
        return Err(Error::DuplicatePerson(name.to_owned()));
      }
      people.push(name.to_owned());
    }
    if people.is_empty() {
      return Err(Error::EmptyRoster);
    }
    Ok(Self { people })
  }

  pub fn people(&self) -> &[String] { &self.people }

  pub fn len(&self) -> usize { self.people.len() }

  /// Always `false`; a roster is non-empty by construction.
  pub fn is_empty(&self) -> bool { self.people.is_empty() }

  /// The person at `index`, wrapping around the roster.
  pub fn get_wrapped(&self, index: usize) -> &str {
    &self.people[index % self.people.len()]
  }

  pub fn position(&self, person_id: &str) -> Option<usize> {
    self.people.iter().position(|p| p == person_id)
  }

  pub fn contains(&self, person_id: &str) -> bool {
    self.position(person_id).is_some()
  }
}

impl Default for Roster {
  fn default() -> Self {
    Self {
      people: DEFAULT_PEOPLE.iter().map(|p| (*p).to_owned()).collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_roster_has_two_people() {
    let roster = Roster::default();
    assert_eq!(roster.people(), &["Person 1", "Person 2"]);
  }

  #[test]
  fn names_are_trimmed() {
    let roster = Roster::new(["  Karthi ", "Vinoth"]).unwrap();
    assert_eq!(roster.people(), &["Karthi", "Vinoth"]);
    assert!(roster.contains("Karthi"));
  }

  #[test]
  fn empty_roster_rejected() {
    let err = Roster::new(Vec::<String>::new()).unwrap_err();
    assert!(matches!(err, Error::EmptyRoster));
  }

  #[test]
  fn blank_name_rejected() {
    let err = Roster::new(["A", "  "]).unwrap_err();
    assert!(matches!(err, Error::BlankPerson));
  }

  #[test]
  fn duplicate_rejected() {
    let err = Roster::new(["A", "B", "A"]).unwrap_err();
    assert!(matches!(err, Error::DuplicatePerson(ref p) if p == "A"));
  }

  #[test]
  fn get_wrapped_cycles() {
    let roster = Roster::new(["A", "B"]).unwrap();
    assert_eq!(roster.get_wrapped(0), "A");
    assert_eq!(roster.get_wrapped(3), "B");
    assert_eq!(roster.position("B"), Some(1));
    assert_eq!(roster.position("C"), None);
  }
}
