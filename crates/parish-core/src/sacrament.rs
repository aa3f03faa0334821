//! Sacrament records — internal assignments and external certificates.
//!
//! The two record types are semantically equivalent as proof that a person
//! received a sacrament. Internal assignments carry an `active` flag because
//! they are administered here and may be corrected; external certificates are
//! attestations entered manually, and their presence alone is proof.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, person::PersonId};

/// The closed set of sacraments the system tracks. Only baptism,
/// confirmation, and marriage participate in eligibility rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SacramentKind {
  Baptism,
  FirstCommunion,
  Confirmation,
  Marriage,
}

impl SacramentKind {
  /// The discriminant string stored in the `kind` database columns.
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Baptism => "baptism",
      Self::FirstCommunion => "first_communion",
      Self::Confirmation => "confirmation",
      Self::Marriage => "marriage",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "baptism" => Ok(Self::Baptism),
      "first_communion" => Ok(Self::FirstCommunion),
      "confirmation" => Ok(Self::Confirmation),
      "marriage" => Ok(Self::Marriage),
      other => Err(Error::UnknownSacramentKind(other.to_string())),
    }
  }
}

/// A sacrament administered and recorded inside this parish.
///
/// Rows are never deleted. A correction flips `active` to false and a
/// replacement row is inserted, so several rows may exist per person and
/// kind; only active rows count as proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SacramentAssignment {
  pub assignment_id: i64,
  pub person_id:     PersonId,
  pub kind:          SacramentKind,
  pub celebrated_on: Option<NaiveDate>,
  pub officiant:     Option<String>,
  pub active:        bool,
  pub recorded_at:   DateTime<Utc>,
}

/// Input to [`crate::store::ParishStore::record_assignment`].
/// New assignments are always active; `recorded_at` is set by the store.
#[derive(Debug, Clone)]
pub struct NewSacramentAssignment {
  pub person_id:     PersonId,
  pub kind:          SacramentKind,
  pub celebrated_on: Option<NaiveDate>,
  pub officiant:     Option<String>,
}

/// Documentary evidence that a sacrament was received outside this system
/// (a certificate from another parish or registry), entered manually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalCertificate {
  pub certificate_id: i64,
  pub person_id:      PersonId,
  pub kind:           SacramentKind,
  /// Issuing parish or registry, free text.
  pub issued_by:      Option<String>,
  pub issued_on:      Option<NaiveDate>,
  pub recorded_at:    DateTime<Utc>,
}

/// Input to [`crate::store::ParishStore::record_certificate`].
#[derive(Debug, Clone)]
pub struct NewExternalCertificate {
  pub person_id: PersonId,
  pub kind:      SacramentKind,
  pub issued_by: Option<String>,
  pub issued_on: Option<NaiveDate>,
}
