//! SQLite persistence for the parish back office.
//!
//! Implements [`parish_core::store::ParishStore`] (and with it the
//! [`parish_core::store::SacramentLookup`] queries the eligibility engine
//! consumes) on top of a single SQLite file.

mod encode;
mod error;
mod schema;
mod store;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use store::SqliteStore;
