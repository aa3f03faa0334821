//! Cash-box ledger — the parish's income/expense book.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
  Income,
  Expense,
}

impl EntryKind {
  /// The discriminant string stored in the `kind` database column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Income => "income",
      Self::Expense => "expense",
    }
  }

  pub fn parse(s: &str) -> Result<Self> {
    match s {
      "income" => Ok(Self::Income),
      "expense" => Ok(Self::Expense),
      other => Err(Error::UnknownEntryKind(other.to_string())),
    }
  }
}

/// A single cash-box movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
  pub entry_id:     i64,
  pub kind:         EntryKind,
  /// Amount in minor currency units; always positive — direction comes from
  /// `kind`.
  pub amount_cents: i64,
  pub description:  String,
  /// The calendar day the movement belongs to, as entered by the clerk.
  pub entered_on:   NaiveDate,
  pub recorded_at:  DateTime<Utc>,
}

/// Input to [`crate::store::ParishStore::add_ledger_entry`].
#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
  pub kind:         EntryKind,
  pub amount_cents: i64,
  pub description:  String,
  pub entered_on:   NaiveDate,
}

/// Aggregate totals over the whole ledger — computed, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
  pub income_cents:  i64,
  pub expense_cents: i64,
  pub balance_cents: i64,
  pub entry_count:   u64,
}
