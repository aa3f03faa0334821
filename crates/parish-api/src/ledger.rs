//! Handlers for `/ledger` endpoints — the cash-box book.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/ledger` | All entries, ordered by entry date |
//! | `POST` | `/ledger` | Body: [`CreateBody`] |
//! | `GET`  | `/ledger/summary` | Income/expense/balance totals |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use parish_core::{
  ledger::{EntryKind, LedgerEntry, LedgerSummary, NewLedgerEntry},
  store::ParishStore,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /ledger`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<LedgerEntry>>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries = store
    .list_ledger_entries()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub kind:         EntryKind,
  pub amount_cents: i64,
  pub description:  String,
  pub entered_on:   NaiveDate,
}

/// `POST /ledger`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.amount_cents <= 0 {
    return Err(ApiError::BadRequest("amount_cents must be positive".into()));
  }

  let entry = store
    .add_ledger_entry(NewLedgerEntry {
      kind:         body.kind,
      amount_cents: body.amount_cents,
      description:  body.description,
      entered_on:   body.entered_on,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Summary ──────────────────────────────────────────────────────────────────

/// `GET /ledger/summary`
pub async fn summary<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<LedgerSummary>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let summary = store
    .ledger_summary()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(summary))
}
