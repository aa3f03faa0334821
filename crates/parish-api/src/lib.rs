//! JSON REST API for the parish back office.
//!
//! Exposes an axum [`Router`] backed by any [`parish_core::store::ParishStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! The sacrament write path is gated: `POST /sacraments` consults the
//! eligibility engine before any insert, and a failed prerequisite comes back
//! as `422` with the engine's reason verbatim.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", parish_api::api_router(store.clone()))
//! ```

pub mod certificates;
pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod persons;
pub mod sacraments;


use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use parish_core::store::ParishStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ParishStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Persons
    .route("/persons", get(persons::list::<S>).post(persons::create::<S>))
    .route("/persons/{id}", get(persons::get_one::<S>))
    // Sacrament assignments (the gated write path)
    .route(
      "/sacraments",
      get(sacraments::list::<S>).post(sacraments::create::<S>),
    )
    .route("/sacraments/{id}", get(sacraments::get_one::<S>))
    .route("/sacraments/{id}/deactivate", post(sacraments::deactivate::<S>))
    // External certificates
    .route(
      "/certificates",
      get(certificates::list::<S>).post(certificates::create::<S>),
    )
    // Eligibility (read-only verdicts)
    .route(
      "/eligibility/confirmation/{person_id}",
      get(eligibility::confirmation::<S>),
    )
    .route("/eligibility/marriage", get(eligibility::marriage::<S>))
    .route(
      "/eligibility/{person_id}/{kind}",
      get(eligibility::sacrament::<S>),
    )
    // Cash-box ledger
    .route("/ledger", get(ledger::list::<S>).post(ledger::create::<S>))
    .route("/ledger/summary", get(ledger::summary::<S>))
    .with_state(store)
}
