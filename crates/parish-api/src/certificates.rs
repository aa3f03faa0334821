//! Handlers for `/certificates` endpoints — externally-attested sacraments.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/certificates` | `?person_id` required |
//! | `POST` | `/certificates` | Body: [`CreateBody`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use parish_core::{
  person::PersonId,
  sacrament::{ExternalCertificate, NewExternalCertificate, SacramentKind},
  store::ParishStore,
};
use serde::Deserialize;

use crate::{error::ApiError, persons::ensure_person};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub person_id: PersonId,
}

/// `GET /certificates?person_id=<id>`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<ExternalCertificate>>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let certificates = store
    .list_certificates(params.person_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(certificates))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub person_id: PersonId,
  pub kind:      SacramentKind,
  pub issued_by: Option<String>,
  pub issued_on: Option<NaiveDate>,
}

/// `POST /certificates` — record an attestation from another parish or
/// registry. Not gated: a certificate is evidence, not a registration.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  ensure_person(store.as_ref(), body.person_id).await?;

  let certificate = store
    .record_certificate(NewExternalCertificate {
      person_id: body.person_id,
      kind:      body.kind,
      issued_by: body.issued_by,
      issued_on: body.issued_on,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(certificate)))
}
