//! [`SqliteStore`] — the SQLite implementation of [`ParishStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use parish_core::{
  ledger::{EntryKind, LedgerEntry, LedgerSummary, NewLedgerEntry},
  person::{NewPerson, Person, PersonId},
  sacrament::{
    ExternalCertificate, NewExternalCertificate, NewSacramentAssignment,
    SacramentAssignment, SacramentKind,
  },
  store::{ParishStore, SacramentLookup},
};

use crate::{
  Error, Result,
  encode::{
    RawAssignment, RawCertificate, RawLedgerEntry, RawPerson, encode_date,
    encode_dt,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A parish store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Writes that reference a person check existence first so a dangling id
  /// surfaces as [`Error::PersonNotFound`] rather than a constraint failure.
  async fn person_exists(&self, id: PersonId) -> Result<bool> {
    let raw_id = id.get();
    let exists: bool = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT 1 FROM persons WHERE person_id = ?1",
              rusqlite::params![raw_id],
              |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false),
        )
      })
      .await?;
    Ok(exists)
  }
}

// ─── ParishStore impl ────────────────────────────────────────────────────────

impl SacramentLookup for SqliteStore {
  type Error = Error;

  async fn find_active_assignment(
    &self,
    person_id: PersonId,
    kind: SacramentKind,
  ) -> Result<Option<SacramentAssignment>> {
    let raw_person = person_id.get();
    let kind_str = kind.as_str().to_owned();

    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT assignment_id, person_id, kind, celebrated_on,
                      officiant, active, recorded_at
               FROM sacrament_assignments
               WHERE person_id = ?1 AND kind = ?2 AND active = 1
               LIMIT 1",
              rusqlite::params![raw_person, kind_str],
              |row| {
                Ok(RawAssignment {
                  assignment_id: row.get(0)?,
                  person_id:     row.get(1)?,
                  kind:          row.get(2)?,
                  celebrated_on: row.get(3)?,
                  officiant:     row.get(4)?,
                  active:        row.get(5)?,
                  recorded_at:   row.get(6)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn find_external_certificate(
    &self,
    person_id: PersonId,
    kind: SacramentKind,
  ) -> Result<Option<ExternalCertificate>> {
    let raw_person = person_id.get();
    let kind_str = kind.as_str().to_owned();

    let raw: Option<RawCertificate> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT certificate_id, person_id, kind, issued_by, issued_on,
                      recorded_at
               FROM external_certificates
               WHERE person_id = ?1 AND kind = ?2
               LIMIT 1",
              rusqlite::params![raw_person, kind_str],
              |row| {
                Ok(RawCertificate {
                  certificate_id: row.get(0)?,
                  person_id:      row.get(1)?,
                  kind:           row.get(2)?,
                  issued_by:      row.get(3)?,
                  issued_on:      row.get(4)?,
                  recorded_at:    row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCertificate::into_certificate).transpose()
  }
}

impl ParishStore for SqliteStore {
  // ── Persons ───────────────────────────────────────────────────────────────

  async fn add_person(&self, input: NewPerson) -> Result<Person> {
    let created_at = Utc::now();
    let name = input.full_name.clone();
    let birth_str = input.birth_date.map(encode_date);
    let at_str = encode_dt(created_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (full_name, birth_date, created_at)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![name, birth_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Person {
      person_id: PersonId(id),
      full_name: input.full_name,
      birth_date: input.birth_date,
      created_at,
    })
  }

  async fn get_person(&self, id: PersonId) -> Result<Option<Person>> {
    let raw_id = id.get();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT person_id, full_name, birth_date, created_at
               FROM persons WHERE person_id = ?1",
              rusqlite::params![raw_id],
              |row| {
                Ok(RawPerson {
                  person_id:  row.get(0)?,
                  full_name:  row.get(1)?,
                  birth_date: row.get(2)?,
                  created_at: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_persons(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT person_id, full_name, birth_date, created_at
           FROM persons ORDER BY person_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawPerson {
              person_id:  row.get(0)?,
              full_name:  row.get(1)?,
              birth_date: row.get(2)?,
              created_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  // ── Sacrament assignments ─────────────────────────────────────────────────

  async fn record_assignment(
    &self,
    input: NewSacramentAssignment,
  ) -> Result<SacramentAssignment> {
    if !self.person_exists(input.person_id).await? {
      return Err(Error::PersonNotFound(input.person_id));
    }

    let recorded_at = Utc::now();
    let raw_person = input.person_id.get();
    let kind_str = input.kind.as_str().to_owned();
    let celebrated_str = input.celebrated_on.map(encode_date);
    let officiant = input.officiant.clone();
    let at_str = encode_dt(recorded_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sacrament_assignments
             (person_id, kind, celebrated_on, officiant, active, recorded_at)
           VALUES (?1, ?2, ?3, ?4, 1, ?5)",
          rusqlite::params![raw_person, kind_str, celebrated_str, officiant, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(SacramentAssignment {
      assignment_id: id,
      person_id: input.person_id,
      kind: input.kind,
      celebrated_on: input.celebrated_on,
      officiant: input.officiant,
      active: true,
      recorded_at,
    })
  }

  async fn get_assignment(
    &self,
    assignment_id: i64,
  ) -> Result<Option<SacramentAssignment>> {
    let raw: Option<RawAssignment> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT assignment_id, person_id, kind, celebrated_on,
                      officiant, active, recorded_at
               FROM sacrament_assignments WHERE assignment_id = ?1",
              rusqlite::params![assignment_id],
              |row| {
                Ok(RawAssignment {
                  assignment_id: row.get(0)?,
                  person_id:     row.get(1)?,
                  kind:          row.get(2)?,
                  celebrated_on: row.get(3)?,
                  officiant:     row.get(4)?,
                  active:        row.get(5)?,
                  recorded_at:   row.get(6)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAssignment::into_assignment).transpose()
  }

  async fn deactivate_assignment(
    &self,
    assignment_id: i64,
  ) -> Result<SacramentAssignment> {
    let assignment = match self.get_assignment(assignment_id).await? {
      Some(a) => a,
      None => return Err(Error::AssignmentNotFound(assignment_id)),
    };
    if !assignment.active {
      return Err(Error::AlreadyInactive(assignment_id));
    }

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE sacrament_assignments SET active = 0 WHERE assignment_id = ?1",
          rusqlite::params![assignment_id],
        )?;
        Ok(())
      })
      .await?;

    Ok(SacramentAssignment { active: false, ..assignment })
  }

  async fn list_assignments(
    &self,
    person_id: PersonId,
  ) -> Result<Vec<SacramentAssignment>> {
    let raw_person = person_id.get();

    let raws: Vec<RawAssignment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT assignment_id, person_id, kind, celebrated_on,
                  officiant, active, recorded_at
           FROM sacrament_assignments
           WHERE person_id = ?1
           ORDER BY assignment_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![raw_person], |row| {
            Ok(RawAssignment {
              assignment_id: row.get(0)?,
              person_id:     row.get(1)?,
              kind:          row.get(2)?,
              celebrated_on: row.get(3)?,
              officiant:     row.get(4)?,
              active:        row.get(5)?,
              recorded_at:   row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssignment::into_assignment).collect()
  }

  // ── External certificates ─────────────────────────────────────────────────

  async fn record_certificate(
    &self,
    input: NewExternalCertificate,
  ) -> Result<ExternalCertificate> {
    if !self.person_exists(input.person_id).await? {
      return Err(Error::PersonNotFound(input.person_id));
    }

    let recorded_at = Utc::now();
    let raw_person = input.person_id.get();
    let kind_str = input.kind.as_str().to_owned();
    let issued_by = input.issued_by.clone();
    let issued_str = input.issued_on.map(encode_date);
    let at_str = encode_dt(recorded_at);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO external_certificates
             (person_id, kind, issued_by, issued_on, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![raw_person, kind_str, issued_by, issued_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(ExternalCertificate {
      certificate_id: id,
      person_id: input.person_id,
      kind: input.kind,
      issued_by: input.issued_by,
      issued_on: input.issued_on,
      recorded_at,
    })
  }

  async fn list_certificates(
    &self,
    person_id: PersonId,
  ) -> Result<Vec<ExternalCertificate>> {
    let raw_person = person_id.get();

    let raws: Vec<RawCertificate> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT certificate_id, person_id, kind, issued_by, issued_on,
                  recorded_at
           FROM external_certificates
           WHERE person_id = ?1
           ORDER BY certificate_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![raw_person], |row| {
            Ok(RawCertificate {
              certificate_id: row.get(0)?,
              person_id:      row.get(1)?,
              kind:           row.get(2)?,
              issued_by:      row.get(3)?,
              issued_on:      row.get(4)?,
              recorded_at:    row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawCertificate::into_certificate)
      .collect()
  }

  // ── Cash-box ledger ───────────────────────────────────────────────────────

  async fn add_ledger_entry(&self, input: NewLedgerEntry) -> Result<LedgerEntry> {
    let recorded_at = Utc::now();
    let kind_str = input.kind.as_str().to_owned();
    let description = input.description.clone();
    let entered_str = encode_date(input.entered_on);
    let at_str = encode_dt(recorded_at);
    let amount = input.amount_cents;

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ledger_entries
             (kind, amount_cents, description, entered_on, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![kind_str, amount, description, entered_str, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(LedgerEntry {
      entry_id: id,
      kind: input.kind,
      amount_cents: input.amount_cents,
      description: input.description,
      entered_on: input.entered_on,
      recorded_at,
    })
  }

  async fn list_ledger_entries(&self) -> Result<Vec<LedgerEntry>> {
    let raws: Vec<RawLedgerEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT entry_id, kind, amount_cents, description, entered_on,
                  recorded_at
           FROM ledger_entries
           ORDER BY entered_on, entry_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawLedgerEntry {
              entry_id:     row.get(0)?,
              kind:         row.get(1)?,
              amount_cents: row.get(2)?,
              description:  row.get(3)?,
              entered_on:   row.get(4)?,
              recorded_at:  row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLedgerEntry::into_entry).collect()
  }

  async fn ledger_summary(&self) -> Result<LedgerSummary> {
    let income_kind = EntryKind::Income.as_str();
    let expense_kind = EntryKind::Expense.as_str();

    let (income, expense, count): (i64, i64, u64) = self
      .conn
      .call(move |conn| {
        conn
          .query_row(
            "SELECT
               COALESCE(SUM(CASE WHEN kind = ?1 THEN amount_cents ELSE 0 END), 0),
               COALESCE(SUM(CASE WHEN kind = ?2 THEN amount_cents ELSE 0 END), 0),
               COUNT(*)
             FROM ledger_entries",
            rusqlite::params![income_kind, expense_kind],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
          )
          .map_err(Into::into)
      })
      .await?;

    Ok(LedgerSummary {
      income_cents:  income,
      expense_cents: expense,
      balance_cents: income - expense,
      entry_count:   count,
    })
  }
}
