//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! and enum discriminants as the same snake_case strings the serde tags use.

use chrono::{DateTime, NaiveDate, Utc};
use parish_core::{
  ledger::{EntryKind, LedgerEntry},
  person::{Person, PersonId},
  sacrament::{ExternalCertificate, SacramentAssignment, SacramentKind},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enum discriminants ──────────────────────────────────────────────────────

pub fn decode_sacrament_kind(s: &str) -> Result<SacramentKind> {
  Ok(SacramentKind::parse(s)?)
}

pub fn decode_entry_kind(s: &str) -> Result<EntryKind> {
  Ok(EntryKind::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:  i64,
  pub full_name:  String,
  pub birth_date: Option<String>,
  pub created_at: String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:  PersonId(self.person_id),
      full_name:  self.full_name,
      birth_date: self.birth_date.as_deref().map(decode_date).transpose()?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `sacrament_assignments` row.
pub struct RawAssignment {
  pub assignment_id: i64,
  pub person_id:     i64,
  pub kind:          String,
  pub celebrated_on: Option<String>,
  pub officiant:     Option<String>,
  pub active:        bool,
  pub recorded_at:   String,
}

impl RawAssignment {
  pub fn into_assignment(self) -> Result<SacramentAssignment> {
    Ok(SacramentAssignment {
      assignment_id: self.assignment_id,
      person_id:     PersonId(self.person_id),
      kind:          decode_sacrament_kind(&self.kind)?,
      celebrated_on: self
        .celebrated_on
        .as_deref()
        .map(decode_date)
        .transpose()?,
      officiant:     self.officiant,
      active:        self.active,
      recorded_at:   decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from an `external_certificates` row.
pub struct RawCertificate {
  pub certificate_id: i64,
  pub person_id:      i64,
  pub kind:           String,
  pub issued_by:      Option<String>,
  pub issued_on:      Option<String>,
  pub recorded_at:    String,
}

impl RawCertificate {
  pub fn into_certificate(self) -> Result<ExternalCertificate> {
    Ok(ExternalCertificate {
      certificate_id: self.certificate_id,
      person_id:      PersonId(self.person_id),
      kind:           decode_sacrament_kind(&self.kind)?,
      issued_by:      self.issued_by,
      issued_on:      self.issued_on.as_deref().map(decode_date).transpose()?,
      recorded_at:    decode_dt(&self.recorded_at)?,
    })
  }
}

/// Raw values read directly from a `ledger_entries` row.
pub struct RawLedgerEntry {
  pub entry_id:     i64,
  pub kind:         String,
  pub amount_cents: i64,
  pub description:  String,
  pub entered_on:   String,
  pub recorded_at:  String,
}

impl RawLedgerEntry {
  pub fn into_entry(self) -> Result<LedgerEntry> {
    Ok(LedgerEntry {
      entry_id:     self.entry_id,
      kind:         decode_entry_kind(&self.kind)?,
      amount_cents: self.amount_cents,
      description:  self.description,
      entered_on:   decode_date(&self.entered_on)?,
      recorded_at:  decode_dt(&self.recorded_at)?,
    })
  }
}
