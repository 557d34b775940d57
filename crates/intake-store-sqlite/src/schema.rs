//! SQL schema for the Intake SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never deleted. Only status, admin_notes, version and updated_at
-- are ever changed after insert.
CREATE TABLE IF NOT EXISTS enquiries (
    enquiry_id      TEXT PRIMARY KEY,
    full_name       TEXT NOT NULL,
    email           TEXT NOT NULL,
    phone           TEXT,
    course_id       TEXT,
    course_interest TEXT,
    message         TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'contacted', 'approved', 'rejected')),
    admin_notes     TEXT,
    version         INTEGER NOT NULL DEFAULT 1,
    created_at      TEXT NOT NULL,   -- RFC 3339 UTC, fixed microsecond width
    updated_at      TEXT NOT NULL,
    CHECK (updated_at >= created_at)
);

CREATE INDEX IF NOT EXISTS enquiries_status_idx  ON enquiries(status);
CREATE INDEX IF NOT EXISTS enquiries_created_idx ON enquiries(created_at);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` that decodes into a `RawEnquiry`.
pub const ENQUIRY_COLUMNS: &str = "enquiry_id, full_name, email, phone, \
  course_id, course_interest, message, status, admin_notes, version, \
  created_at, updated_at";
