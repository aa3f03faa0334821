//! SQL schema for the parish SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    person_id   INTEGER PRIMARY KEY,
    full_name   TEXT NOT NULL,
    birth_date  TEXT,            -- YYYY-MM-DD or NULL
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- Internal sacrament assignments. Rows are never deleted; a correction
-- flips `active` to 0 and a replacement row is inserted.
CREATE TABLE IF NOT EXISTS sacrament_assignments (
    assignment_id INTEGER PRIMARY KEY,
    person_id     INTEGER NOT NULL REFERENCES persons(person_id),
    kind          TEXT NOT NULL,  -- 'baptism' | 'first_communion' | 'confirmation' | 'marriage'
    celebrated_on TEXT,
    officiant     TEXT,
    active        INTEGER NOT NULL DEFAULT 1,
    recorded_at   TEXT NOT NULL
);

-- Externally-issued certificates. Presence alone is proof; no active flag.
CREATE TABLE IF NOT EXISTS external_certificates (
    certificate_id INTEGER PRIMARY KEY,
    person_id      INTEGER NOT NULL REFERENCES persons(person_id),
    kind           TEXT NOT NULL,
    issued_by      TEXT,
    issued_on      TEXT,
    recorded_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ledger_entries (
    entry_id     INTEGER PRIMARY KEY,
    kind         TEXT NOT NULL,   -- 'income' | 'expense'
    amount_cents INTEGER NOT NULL CHECK (amount_cents > 0),
    description  TEXT NOT NULL,
    entered_on   TEXT NOT NULL,
    recorded_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS assignments_person_kind_idx
    ON sacrament_assignments(person_id, kind, active);
CREATE INDEX IF NOT EXISTS certificates_person_kind_idx
    ON external_certificates(person_id, kind);
CREATE INDEX IF NOT EXISTS ledger_entered_idx ON ledger_entries(entered_on);

PRAGMA user_version = 1;
";
