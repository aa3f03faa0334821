//! The `SacramentLookup` and `ParishStore` traits.
//!
//! Implemented by storage backends (e.g. `parish-store-sqlite`). The
//! eligibility engine depends only on [`SacramentLookup`]; the API layer
//! depends on the full [`ParishStore`]. Higher layers never depend on a
//! concrete backend.

use std::future::Future;

use crate::{
  ledger::{LedgerEntry, LedgerSummary, NewLedgerEntry},
  person::{NewPerson, Person, PersonId},
  sacrament::{
    ExternalCertificate, NewExternalCertificate, NewSacramentAssignment,
    SacramentAssignment, SacramentKind,
  },
};

// ─── Lookup trait ────────────────────────────────────────────────────────────

/// The two read queries the eligibility engine consumes.
///
/// Implementations must surface I/O failures as `Err`, never as `Ok(None)`,
/// so callers can distinguish "no record" from "could not check". Both
/// queries must be read-consistent within a single evaluation; no cross-call
/// isolation is required since the engine never writes.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SacramentLookup: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Find an active internal assignment for `(person_id, kind)`, if any.
  /// Inactive rows never match. Which of several active rows is returned is
  /// unspecified; callers only rely on existence.
  fn find_active_assignment(
    &self,
    person_id: PersonId,
    kind: SacramentKind,
  ) -> impl Future<Output = Result<Option<SacramentAssignment>, Self::Error>> + Send + '_;

  /// Find an externally-issued certificate for `(person_id, kind)`, if any.
  fn find_external_certificate(
    &self,
    person_id: PersonId,
    kind: SacramentKind,
  ) -> impl Future<Output = Result<Option<ExternalCertificate>, Self::Error>> + Send + '_;
}

// ─── Full store trait ────────────────────────────────────────────────────────

/// Full storage abstraction for the parish back office.
pub trait ParishStore: SacramentLookup {
  // ── Persons ───────────────────────────────────────────────────────────

  /// Create and persist a new parishioner. The store assigns the id and
  /// `created_at`.
  fn add_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn list_persons(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  // ── Sacrament assignments ─────────────────────────────────────────────

  /// Record a new, active assignment. Fails if the person does not exist.
  fn record_assignment(
    &self,
    input: NewSacramentAssignment,
  ) -> impl Future<Output = Result<SacramentAssignment, Self::Error>> + Send + '_;

  /// Retrieve an assignment by id. Returns `None` if not found.
  fn get_assignment(
    &self,
    assignment_id: i64,
  ) -> impl Future<Output = Result<Option<SacramentAssignment>, Self::Error>> + Send + '_;

  /// Correct an assignment by flipping `active` to false. Rows are never
  /// deleted. Fails if the assignment does not exist or is already inactive.
  fn deactivate_assignment(
    &self,
    assignment_id: i64,
  ) -> impl Future<Output = Result<SacramentAssignment, Self::Error>> + Send + '_;

  /// All assignments for a person, active and inactive.
  fn list_assignments(
    &self,
    person_id: PersonId,
  ) -> impl Future<Output = Result<Vec<SacramentAssignment>, Self::Error>> + Send + '_;

  // ── External certificates ─────────────────────────────────────────────

  /// Record an externally-issued certificate. Fails if the person does not
  /// exist.
  fn record_certificate(
    &self,
    input: NewExternalCertificate,
  ) -> impl Future<Output = Result<ExternalCertificate, Self::Error>> + Send + '_;

  fn list_certificates(
    &self,
    person_id: PersonId,
  ) -> impl Future<Output = Result<Vec<ExternalCertificate>, Self::Error>> + Send + '_;

  // ── Cash-box ledger ───────────────────────────────────────────────────

  fn add_ledger_entry(
    &self,
    input: NewLedgerEntry,
  ) -> impl Future<Output = Result<LedgerEntry, Self::Error>> + Send + '_;

  fn list_ledger_entries(
    &self,
  ) -> impl Future<Output = Result<Vec<LedgerEntry>, Self::Error>> + Send + '_;

  /// Aggregate income/expense totals over the whole ledger.
  fn ledger_summary(
    &self,
  ) -> impl Future<Output = Result<LedgerSummary, Self::Error>> + Send + '_;
}
