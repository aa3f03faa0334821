//! Handlers for `/sacraments` endpoints — the gated write path.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sacraments` | `?person_id` required |
//! | `GET`  | `/sacraments/:id` | Single assignment |
//! | `POST` | `/sacraments` | Eligibility-gated; see [`create`] |
//! | `POST` | `/sacraments/:id/deactivate` | Correction: flips `active` off |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use parish_core::{
  eligibility::EligibilityEngine,
  person::PersonId,
  sacrament::{NewSacramentAssignment, SacramentAssignment, SacramentKind},
  store::ParishStore,
};
use serde::Deserialize;

use crate::{error::ApiError, persons::ensure_person};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Required: the person whose assignments to return (active and inactive).
  pub person_id: PersonId,
}

/// `GET /sacraments?person_id=<id>`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<SacramentAssignment>>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let assignments = store
    .list_assignments(params.person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(assignments))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /sacraments/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<SacramentAssignment>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let assignment = store
    .get_assignment(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("assignment {id} not found")))?;
  Ok(Json(assignment))
}

// ─── Create (gated) ───────────────────────────────────────────────────────────

/// JSON body accepted by `POST /sacraments`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub person_id:     PersonId,
  pub kind:          SacramentKind,
  /// Required when `kind` is `marriage`: the other party of the union, used
  /// for the eligibility check.
  pub spouse_id:     Option<PersonId>,
  pub celebrated_on: Option<NaiveDate>,
  pub officiant:     Option<String>,
}

/// `POST /sacraments` — consult the eligibility engine, then insert.
///
/// Confirmation and marriage are gated; baptism and first communion are not.
/// A failed prerequisite returns `422` with the engine's reason verbatim; an
/// engine error aborts the write (fail-closed). The check and the insert are
/// not atomic — a concurrent correction can land between them.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  ensure_person(store.as_ref(), body.person_id).await?;

  let engine = EligibilityEngine::new(store.as_ref());

  match body.kind {
    SacramentKind::Confirmation => {
      let verdict = engine
        .can_register_confirmation(body.person_id)
        .await
        .map_err(ApiError::from_eligibility)?;
      if !verdict.can_register {
        let reason = verdict.reason.unwrap_or_default();
        tracing::debug!(
          person_id = %body.person_id,
          %reason,
          "confirmation registration rejected"
        );
        return Err(ApiError::Ineligible(reason));
      }
    }
    SacramentKind::Marriage => {
      let spouse = body.spouse_id.ok_or_else(|| {
        ApiError::BadRequest("spouse_id is required for marriage".into())
      })?;
      ensure_person(store.as_ref(), spouse).await?;

      let verdict = engine
        .can_register_marriage(body.person_id, spouse)
        .await
        .map_err(ApiError::from_eligibility)?;
      if !verdict.can_register {
        let reason = verdict.reason.unwrap_or_default();
        tracing::debug!(
          party_a = %body.person_id,
          party_b = %spouse,
          %reason,
          "marriage registration rejected"
        );
        return Err(ApiError::Ineligible(reason));
      }
    }
    SacramentKind::Baptism | SacramentKind::FirstCommunion => {}
  }

  let assignment = store
    .record_assignment(NewSacramentAssignment {
      person_id:     body.person_id,
      kind:          body.kind,
      celebrated_on: body.celebrated_on,
      officiant:     body.officiant,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok((StatusCode::CREATED, Json(assignment)))
}

// ─── Deactivate ───────────────────────────────────────────────────────────────

/// `POST /sacraments/:id/deactivate` — record a correction.
pub async fn deactivate<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<i64>,
) -> Result<Json<SacramentAssignment>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let existing = store
    .get_assignment(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("assignment {id} not found")))?;
  if !existing.active {
    return Err(ApiError::BadRequest(format!(
      "assignment {id} is already inactive"
    )));
  }

  let corrected = store
    .deactivate_assignment(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(corrected))
}
