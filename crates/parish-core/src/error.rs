//! Error types for `parish-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown sacrament kind: {0:?}")]
  UnknownSacramentKind(String),

  #[error("unknown ledger entry kind: {0:?}")]
  UnknownEntryKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
