//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use parish_core::{
  eligibility::{EligibilityEngine, ProofSource},
  ledger::{EntryKind, NewLedgerEntry},
  person::{NewPerson, Person, PersonId},
  sacrament::{NewExternalCertificate, NewSacramentAssignment, SacramentKind},
  store::{ParishStore, SacramentLookup},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn add_person(s: &SqliteStore, name: &str) -> Person {
  s.add_person(NewPerson {
    full_name:  name.into(),
    birth_date: NaiveDate::from_ymd_opt(1990, 4, 12),
  })
  .await
  .unwrap()
}

fn assignment(person_id: PersonId, kind: SacramentKind) -> NewSacramentAssignment {
  NewSacramentAssignment {
    person_id,
    kind,
    celebrated_on: NaiveDate::from_ymd_opt(2005, 6, 19),
    officiant: Some("Fr. Mendez".into()),
  }
}

fn certificate(person_id: PersonId, kind: SacramentKind) -> NewExternalCertificate {
  NewExternalCertificate {
    person_id,
    kind,
    issued_by: Some("St. Monica parish".into()),
    issued_on: NaiveDate::from_ymd_opt(1998, 3, 1),
  }
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_person() {
  let s = store().await;

  let person = add_person(&s, "Alice Liddell").await;
  assert!(person.person_id.get() > 0);

  let fetched = s.get_person(person.person_id).await.unwrap().unwrap();
  assert_eq!(fetched.person_id, person.person_id);
  assert_eq!(fetched.full_name, "Alice Liddell");
  assert_eq!(fetched.birth_date, NaiveDate::from_ymd_opt(1990, 4, 12));
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  let result = s.get_person(PersonId(999)).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_persons_ordered_by_id() {
  let s = store().await;
  let a = add_person(&s, "Alice").await;
  let b = add_person(&s, "Bob").await;

  let all = s.list_persons().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].person_id, a.person_id);
  assert_eq!(all[1].person_id, b.person_id);
}

// ─── Sacrament assignments ───────────────────────────────────────────────────

#[tokio::test]
async fn record_assignment_and_retrieve() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;

  let recorded = s
    .record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();
  assert!(recorded.active);
  assert_eq!(recorded.kind, SacramentKind::Baptism);
  assert_eq!(recorded.officiant.as_deref(), Some("Fr. Mendez"));

  let all = s.list_assignments(person.person_id).await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].assignment_id, recorded.assignment_id);
}

#[tokio::test]
async fn record_assignment_for_unknown_person_errors() {
  let s = store().await;
  let err = s
    .record_assignment(assignment(PersonId(42), SacramentKind::Baptism))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::PersonNotFound(PersonId(42))));
}

#[tokio::test]
async fn find_active_assignment_matches_only_active_rows() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;

  let recorded = s
    .record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  let found = s
    .find_active_assignment(person.person_id, SacramentKind::Baptism)
    .await
    .unwrap();
  assert!(found.is_some());

  s.deactivate_assignment(recorded.assignment_id).await.unwrap();

  let found = s
    .find_active_assignment(person.person_id, SacramentKind::Baptism)
    .await
    .unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn find_active_assignment_is_kind_specific() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;
  s.record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  let found = s
    .find_active_assignment(person.person_id, SacramentKind::Confirmation)
    .await
    .unwrap();
  assert!(found.is_none());
}

#[tokio::test]
async fn deactivate_keeps_row_in_history() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;
  let recorded = s
    .record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  let corrected = s
    .deactivate_assignment(recorded.assignment_id)
    .await
    .unwrap();
  assert!(!corrected.active);

  // The row stays listed; only the flag changes.
  let all = s.list_assignments(person.person_id).await.unwrap();
  assert_eq!(all.len(), 1);
  assert!(!all[0].active);
}

#[tokio::test]
async fn deactivate_nonexistent_assignment_errors() {
  let s = store().await;
  let err = s.deactivate_assignment(99).await.unwrap_err();
  assert!(matches!(err, crate::Error::AssignmentNotFound(99)));
}

#[tokio::test]
async fn deactivate_twice_errors() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;
  let recorded = s
    .record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  s.deactivate_assignment(recorded.assignment_id).await.unwrap();
  let err = s
    .deactivate_assignment(recorded.assignment_id)
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::AlreadyInactive(_)));
}

#[tokio::test]
async fn corrections_allow_a_replacement_active_row() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;

  let wrong = s
    .record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();
  s.deactivate_assignment(wrong.assignment_id).await.unwrap();
  s.record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  // Two rows on file, one active; the lookup finds the active one.
  let all = s.list_assignments(person.person_id).await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all.iter().filter(|a| a.active).count(), 1);

  let found = s
    .find_active_assignment(person.person_id, SacramentKind::Baptism)
    .await
    .unwrap()
    .unwrap();
  assert!(found.active);
}

// ─── External certificates ───────────────────────────────────────────────────

#[tokio::test]
async fn record_certificate_and_find() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;

  let recorded = s
    .record_certificate(certificate(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();
  assert_eq!(recorded.issued_by.as_deref(), Some("St. Monica parish"));

  let found = s
    .find_external_certificate(person.person_id, SacramentKind::Baptism)
    .await
    .unwrap();
  assert!(found.is_some());

  let listed = s.list_certificates(person.person_id).await.unwrap();
  assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn record_certificate_for_unknown_person_errors() {
  let s = store().await;
  let err = s
    .record_certificate(certificate(PersonId(7), SacramentKind::Baptism))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::PersonNotFound(PersonId(7))));
}

#[tokio::test]
async fn find_external_certificate_is_kind_specific() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;
  s.record_certificate(certificate(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  let found = s
    .find_external_certificate(person.person_id, SacramentKind::Confirmation)
    .await
    .unwrap();
  assert!(found.is_none());
}

// ─── Engine over the real store ──────────────────────────────────────────────

#[tokio::test]
async fn engine_sees_internal_proof_through_sqlite() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;
  s.record_assignment(assignment(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  let engine = EligibilityEngine::new(&s);
  let proof = engine
    .has_valid_sacrament(person.person_id, SacramentKind::Baptism)
    .await
    .unwrap();
  assert_eq!(proof.source, Some(ProofSource::Internal));

  let verdict = engine
    .can_register_confirmation(person.person_id)
    .await
    .unwrap();
  assert!(verdict.can_register);
}

#[tokio::test]
async fn engine_falls_back_to_certificate_through_sqlite() {
  let s = store().await;
  let person = add_person(&s, "Alice").await;
  s.record_certificate(certificate(person.person_id, SacramentKind::Baptism))
    .await
    .unwrap();

  let engine = EligibilityEngine::new(&s);
  let proof = engine
    .has_valid_sacrament(person.person_id, SacramentKind::Baptism)
    .await
    .unwrap();
  assert_eq!(proof.source, Some(ProofSource::External));
}

// ─── Cash-box ledger ─────────────────────────────────────────────────────────

fn entry(kind: EntryKind, amount: i64, day: u32) -> NewLedgerEntry {
  NewLedgerEntry {
    kind,
    amount_cents: amount,
    description: "collection".into(),
    entered_on: NaiveDate::from_ymd_opt(2024, 11, day).unwrap(),
  }
}

#[tokio::test]
async fn ledger_entries_round_trip() {
  let s = store().await;

  let recorded = s
    .add_ledger_entry(entry(EntryKind::Income, 5_000, 3))
    .await
    .unwrap();
  assert_eq!(recorded.kind, EntryKind::Income);
  assert_eq!(recorded.amount_cents, 5_000);

  let listed = s.list_ledger_entries().await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].entry_id, recorded.entry_id);
}

#[tokio::test]
async fn ledger_entries_listed_by_entry_date() {
  let s = store().await;
  s.add_ledger_entry(entry(EntryKind::Income, 100, 20)).await.unwrap();
  s.add_ledger_entry(entry(EntryKind::Expense, 50, 5)).await.unwrap();

  let listed = s.list_ledger_entries().await.unwrap();
  assert_eq!(listed.len(), 2);
  assert!(listed[0].entered_on < listed[1].entered_on);
}

#[tokio::test]
async fn ledger_summary_totals() {
  let s = store().await;
  s.add_ledger_entry(entry(EntryKind::Income, 5_000, 3)).await.unwrap();
  s.add_ledger_entry(entry(EntryKind::Income, 2_500, 10)).await.unwrap();
  s.add_ledger_entry(entry(EntryKind::Expense, 1_500, 12)).await.unwrap();

  let summary = s.ledger_summary().await.unwrap();
  assert_eq!(summary.income_cents, 7_500);
  assert_eq!(summary.expense_cents, 1_500);
  assert_eq!(summary.balance_cents, 6_000);
  assert_eq!(summary.entry_count, 3);
}

#[tokio::test]
async fn ledger_summary_empty() {
  let s = store().await;
  let summary = s.ledger_summary().await.unwrap();
  assert_eq!(summary.balance_cents, 0);
  assert_eq!(summary.entry_count, 0);
}
