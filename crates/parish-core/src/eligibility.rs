//! The eligibility engine — prerequisite checks for sacrament registration.
//!
//! Confirmation requires a prior baptism; marriage requires baptism and
//! confirmation for both parties. Proof comes from two sources of equal
//! standing: active internal assignments and externally-issued certificates.
//! The internal table is queried first purely to short-circuit; the order
//! never changes a verdict.
//!
//! A failed prerequisite is not an error. It is the primary documented
//! outcome of a check, reported as a verdict with `can_register: false` and
//! a human-readable reason. Errors mean the check itself could not be
//! completed, and callers must reject the write rather than default to
//! allowing it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{person::PersonId, sacrament::SacramentKind, store::SacramentLookup};

/// Reason attached to a confirmation verdict when baptism is missing.
pub const REASON_CONFIRMATION_REQUIRES_BAPTISM: &str =
  "baptism must be on record before confirmation can be registered";

/// Reason attached to a marriage verdict when either party is incomplete.
/// Deliberately coarse: callers needing detail inspect the per-party flags.
pub const REASON_MARRIAGE_REQUIRES_BOTH: &str =
  "both parties must have valid baptism and confirmation";

// ─── Verdicts ────────────────────────────────────────────────────────────────

/// Which record source proved a sacrament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofSource {
  Internal,
  External,
}

/// Result of a single-sacrament check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SacramentProof {
  pub valid:  bool,
  /// `None` exactly when `valid` is false.
  pub source: Option<ProofSource>,
}

impl SacramentProof {
  fn internal() -> Self {
    Self { valid: true, source: Some(ProofSource::Internal) }
  }

  fn external() -> Self {
    Self { valid: true, source: Some(ProofSource::External) }
  }

  fn missing() -> Self { Self { valid: false, source: None } }
}

/// Verdict for registering a confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationVerdict {
  pub has_baptism:      bool,
  /// Always false when `has_baptism` is false — the confirmation lookup is
  /// skipped entirely in that case.
  pub has_confirmation: bool,
  pub can_register:     bool,
  /// `None` whenever `can_register` is true.
  pub reason:           Option<String>,
}

/// Verdict for registering a marriage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarriageVerdict {
  pub party_a_valid: bool,
  pub party_b_valid: bool,
  pub can_register:  bool,
  /// A single fixed message on failure, regardless of which party or which
  /// sacrament was missing.
  pub reason:        Option<String>,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Failure modes of an eligibility check.
#[derive(Debug, Error)]
pub enum EligibilityError<E> {
  /// The person identifier is malformed. Never reaches the store.
  #[error("invalid person id: {0}")]
  InvalidPerson(PersonId),

  /// The underlying store query failed (connectivity, timeout). Propagated
  /// as-is; the engine never maps this to a valid or invalid verdict.
  #[error("sacrament store unavailable: {0}")]
  StoreUnavailable(#[source] E),
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The eligibility engine. Borrows a store; stateless and read-only — every
/// check is an idempotent function of current store state.
///
/// The engine provides no atomicity between a check and a subsequent write.
/// Serialising the two (e.g. a transaction or row lock spanning both) is the
/// write path's responsibility.
pub struct EligibilityEngine<'a, S> {
  store: &'a S,
}

impl<'a, S: SacramentLookup> EligibilityEngine<'a, S> {
  pub fn new(store: &'a S) -> Self { Self { store } }

  /// Check whether `person_id` has valid proof of `kind`.
  ///
  /// Active internal assignments are consulted first; on a hit the external
  /// certificate table is never queried. An error from the internal query
  /// propagates without falling through to the external query.
  pub async fn has_valid_sacrament(
    &self,
    person_id: PersonId,
    kind: SacramentKind,
  ) -> Result<SacramentProof, EligibilityError<S::Error>> {
    if person_id.get() <= 0 {
      return Err(EligibilityError::InvalidPerson(person_id));
    }

    if self
      .store
      .find_active_assignment(person_id, kind)
      .await
      .map_err(EligibilityError::StoreUnavailable)?
      .is_some()
    {
      return Ok(SacramentProof::internal());
    }

    if self
      .store
      .find_external_certificate(person_id, kind)
      .await
      .map_err(EligibilityError::StoreUnavailable)?
      .is_some()
    {
      return Ok(SacramentProof::external());
    }

    Ok(SacramentProof::missing())
  }

  /// Check whether a confirmation may be registered for `person_id`.
  ///
  /// Baptism is evaluated first; when it is missing the confirmation lookup
  /// is skipped entirely. An existing confirmation does not block
  /// re-registration — corrections are recorded as new assignments.
  pub async fn can_register_confirmation(
    &self,
    person_id: PersonId,
  ) -> Result<ConfirmationVerdict, EligibilityError<S::Error>> {
    let baptism = self
      .has_valid_sacrament(person_id, SacramentKind::Baptism)
      .await?;

    if !baptism.valid {
      return Ok(ConfirmationVerdict {
        has_baptism:      false,
        has_confirmation: false,
        can_register:     false,
        reason:           Some(REASON_CONFIRMATION_REQUIRES_BAPTISM.to_string()),
      });
    }

    let confirmation = self
      .has_valid_sacrament(person_id, SacramentKind::Confirmation)
      .await?;

    Ok(ConfirmationVerdict {
      has_baptism:      true,
      has_confirmation: confirmation.valid,
      can_register:     true,
      reason:           None,
    })
  }

  /// Check whether a marriage may be registered between two parties.
  ///
  /// Each party needs both baptism and confirmation. Unlike the confirmation
  /// rule, the two lookups per party are independent — confirmation is
  /// queried even when baptism already failed, so the per-party flags always
  /// reflect a full evaluation. Callers counting queries depend on this.
  pub async fn can_register_marriage(
    &self,
    party_a: PersonId,
    party_b: PersonId,
  ) -> Result<MarriageVerdict, EligibilityError<S::Error>> {
    let party_a_valid = self.party_complete(party_a).await?;
    let party_b_valid = self.party_complete(party_b).await?;
    let can_register = party_a_valid && party_b_valid;

    Ok(MarriageVerdict {
      party_a_valid,
      party_b_valid,
      can_register,
      reason: (!can_register).then(|| REASON_MARRIAGE_REQUIRES_BOTH.to_string()),
    })
  }

  /// Baptism AND confirmation, both always evaluated.
  async fn party_complete(
    &self,
    person_id: PersonId,
  ) -> Result<bool, EligibilityError<S::Error>> {
    let baptism = self
      .has_valid_sacrament(person_id, SacramentKind::Baptism)
      .await?;
    let confirmation = self
      .has_valid_sacrament(person_id, SacramentKind::Confirmation)
      .await?;
    Ok(baptism.valid && confirmation.valid)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
