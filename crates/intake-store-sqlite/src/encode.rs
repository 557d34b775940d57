//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond width
//! and a `Z` suffix, so lexical order matches chronological order. UUIDs are
//! stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use intake_core::{enquiry::Enquiry, status::EnquiryStatus};
use rusqlite::types::Type;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// [`decode_dt`] for use inside a `tokio_rusqlite` closure, where only
/// `rusqlite` errors can be raised.
pub fn decode_dt_column(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

// ─── EnquiryStatus ───────────────────────────────────────────────────────────

pub fn encode_status(s: EnquiryStatus) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<EnquiryStatus> {
  Ok(EnquiryStatus::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Index of `updated_at` in [`crate::schema::ENQUIRY_COLUMNS`].
pub const UPDATED_AT_COLUMN: usize = 11;

/// Raw values read directly from an `enquiries` row.
pub struct RawEnquiry {
  pub enquiry_id:      String,
  pub full_name:       String,
  pub email:           String,
  pub phone:           Option<String>,
  pub course_id:       Option<String>,
  pub course_interest: Option<String>,
  pub message:         String,
  pub status:          String,
  pub admin_notes:     Option<String>,
  pub version:         u64,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawEnquiry {
  /// Read a row selected with [`crate::schema::ENQUIRY_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      enquiry_id:      row.get(0)?,
      full_name:       row.get(1)?,
      email:           row.get(2)?,
      phone:           row.get(3)?,
      course_id:       row.get(4)?,
      course_interest: row.get(5)?,
      message:         row.get(6)?,
      status:          row.get(7)?,
      admin_notes:     row.get(8)?,
      version:         row.get(9)?,
      created_at:      row.get(10)?,
      updated_at:      row.get(UPDATED_AT_COLUMN)?,
    })
  }

  pub fn into_enquiry(self) -> Result<Enquiry> {
    Ok(Enquiry {
      enquiry_id:      decode_uuid(&self.enquiry_id)?,
      full_name:       self.full_name,
      email:           self.email,
      phone:           self.phone,
      course_id:       self.course_id,
      course_interest: self.course_interest,
      message:         self.message,
      status:          decode_status(&self.status)?,
      admin_notes:     self.admin_notes,
      version:         self.version,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}
