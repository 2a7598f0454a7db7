//! SQL schema for the planner SQLite store.
//!
//! Executed on every open. Idempotent thanks to `CREATE TABLE IF NOT EXISTS`;
//! existing rows are never touched.

/// Full schema DDL.
///
/// The store switches `foreign_keys` off before running this: the reference
/// from assignments to subjects is declared only, so orphaned assignments survive a subject delete and are
/// filtered out by joins.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS subjects (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    code          TEXT UNIQUE NOT NULL,
    name          TEXT NOT NULL,
    professor     TEXT NOT NULL,
    attendance    INTEGER DEFAULT 0,
    total_classes INTEGER DEFAULT 0
);

CREATE TABLE IF NOT EXISTS assignments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    subject_id  INTEGER,
    title       TEXT NOT NULL,
    deadline    TEXT NOT NULL,   -- ISO 8601 text; ordered lexicographically
    completed   INTEGER DEFAULT 0,
    FOREIGN KEY (subject_id) REFERENCES subjects (id)
);

CREATE INDEX IF NOT EXISTS assignments_deadline_idx ON assignments(deadline);
";
