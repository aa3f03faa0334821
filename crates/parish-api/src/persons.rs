//! Handlers for `/persons` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/persons` | All parishioners |
//! | `POST` | `/persons` | Body: `{"full_name":"...","birth_date":"1990-04-12"}` |
//! | `GET`  | `/persons/:id` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::NaiveDate;
use parish_core::{
  person::{NewPerson, Person, PersonId},
  store::ParishStore,
};
use serde::Deserialize;

use crate::error::ApiError;

/// Resolve `id` to an existing person or a 404.
pub(crate) async fn ensure_person<S>(store: &S, id: PersonId) -> Result<(), ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .get_person(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /persons`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let persons = store
    .list_persons()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(persons))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub full_name:  String,
  pub birth_date: Option<NaiveDate>,
}

/// `POST /persons`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.full_name.trim().is_empty() {
    return Err(ApiError::BadRequest("full_name must not be empty".into()));
  }

  let person = store
    .add_person(NewPerson {
      full_name:  body.full_name,
      birth_date: body.birth_date,
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /persons/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PersonId>,
) -> Result<Json<Person>, ApiError>
where
  S: ParishStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let person = store
    .get_person(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}
