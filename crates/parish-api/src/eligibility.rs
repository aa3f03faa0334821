//! Handlers for `/eligibility` endpoints — read-only verdicts.
//!
//! These expose the same checks the write path runs, so the frontend can
//! surface eligibility before a clerk attempts a registration.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/eligibility/:person_id/:kind` | Raw proof for one sacrament |
//! | `GET`  | `/eligibility/confirmation/:person_id` | Confirmation verdict |
//! | `GET`  | `/eligibility/marriage?party_a=&party_b=` | Marriage verdict |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use parish_core::{
  eligibility::{
    ConfirmationVerdict, EligibilityEngine, MarriageVerdict, SacramentProof,
  },
  person::PersonId,
  sacrament::SacramentKind,
  store::ParishStore,
};
use serde::Deserialize;

use crate::error::ApiError;

/// `GET /eligibility/:person_id/:kind`
pub async fn sacrament<S>(
  State(store): State<Arc<S>>,
  Path((person_id, kind)): Path<(PersonId, SacramentKind)>,
) -> Result<Json<SacramentProof>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let proof = EligibilityEngine::new(store.as_ref())
    .has_valid_sacrament(person_id, kind)
    .await
    .map_err(ApiError::from_eligibility)?;
  Ok(Json(proof))
}

/// `GET /eligibility/confirmation/:person_id`
pub async fn confirmation<S>(
  State(store): State<Arc<S>>,
  Path(person_id): Path<PersonId>,
) -> Result<Json<ConfirmationVerdict>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let verdict = EligibilityEngine::new(store.as_ref())
    .can_register_confirmation(person_id)
    .await
    .map_err(ApiError::from_eligibility)?;
  Ok(Json(verdict))
}

#[derive(Debug, Deserialize)]
pub struct MarriageParams {
  pub party_a: PersonId,
  pub party_b: PersonId,
}

/// `GET /eligibility/marriage?party_a=<id>&party_b=<id>`
pub async fn marriage<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<MarriageParams>,
) -> Result<Json<MarriageVerdict>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let verdict = EligibilityEngine::new(store.as_ref())
    .can_register_marriage(params.party_a, params.party_b)
    .await
    .map_err(ApiError::from_eligibility)?;
  Ok(Json(verdict))
}
