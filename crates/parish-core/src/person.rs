//! Person — a parishioner record.
//!
//! A person holds only identity metadata. Sacramental history lives in the
//! assignment and certificate tables and is always queried, never embedded.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Opaque numeric identifier for a parishioner. Assigned by the store;
/// always positive.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
  pub fn get(self) -> i64 { self.0 }
}

impl std::fmt::Display for PersonId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// A parishioner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:  PersonId,
  pub full_name:  String,
  pub birth_date: Option<NaiveDate>,
  /// Server-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::ParishStore::add_person`].
/// `person_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPerson {
  pub full_name:  String,
  pub birth_date: Option<NaiveDate>,
}
