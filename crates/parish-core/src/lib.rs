//! Core types and trait definitions for the parish back office.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod eligibility;
pub mod error;
pub mod ledger;
pub mod person;
pub mod sacrament;
pub mod store;

pub use error::{Error, Result};
