//! Error type for `parish-store-sqlite`.

use parish_core::person::PersonId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] parish_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("person not found: {0}")]
  PersonNotFound(PersonId),

  #[error("sacrament assignment not found: {0}")]
  AssignmentNotFound(i64),

  #[error("sacrament assignment {0} is already inactive")]
  AlreadyInactive(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
