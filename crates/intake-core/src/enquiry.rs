//! Enquiry records (a prospective student's contact request) and the inputs
//! that create and change them.

use chrono::{DateTime, Duration, SubsecRound as _, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{error::ValidationError, status::EnquiryStatus};

// ─── Enquiry ─────────────────────────────────────────────────────────────────

/// A stored enquiry.
///
/// `enquiry_id` and `created_at` never change after creation. Status and
/// notes are changed only through [`StatusChange`]; every change bumps
/// `version` and advances `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enquiry {
  pub enquiry_id:      Uuid,
  pub full_name:       String,
  pub email:           String,
  pub phone:           Option<String>,
  /// Reference to a catalogue course; `None` for general enquiries.
  pub course_id:       Option<String>,
  /// Free-text description of what the student wants to learn.
  pub course_interest: Option<String>,
  pub message:         String,
  pub status:          EnquiryStatus,
  pub admin_notes:     Option<String>,
  /// Starts at 1; incremented on every status or notes change.
  pub version:         u64,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl Enquiry {
  /// Apply `change` in place, stamping a strictly later `updated_at`.
  ///
  /// Version checking is the caller's concern; see [`StatusChange::is_stale`].
  pub fn apply(&mut self, change: &StatusChange) {
    self.status = change.status;
    if let Some(notes) = &change.notes {
      self.admin_notes = Some(notes.clone());
    }
    self.version += 1;
    self.updated_at = next_timestamp(self.updated_at);
  }
}

// ─── NewEnquiry ──────────────────────────────────────────────────────────────

/// Input from a public form (contact page or enrollment modal).
///
/// Nothing here is trusted: [`NewEnquiry::validate`] re-checks the required
/// fields regardless of what the form already checked. Missing JSON fields
/// and `null` fields deserialise as empty so they are reported as validation
/// failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewEnquiry {
  #[serde(deserialize_with = "null_as_empty")]
  pub full_name:       String,
  #[serde(deserialize_with = "null_as_empty")]
  pub email:           String,
  pub phone:           Option<String>,
  pub course_id:       Option<String>,
  pub course_interest: Option<String>,
  #[serde(deserialize_with = "null_as_empty")]
  pub message:         String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NewEnquiry {
  /// Check required fields and normalise whitespace.
  ///
  /// Every missing field is reported, in declaration order. Optional fields
  /// that are blank after trimming become `None`.
  pub fn validate(self) -> Result<Self, ValidationError> {
    let full_name = self.full_name.trim().to_owned();
    let email = self.email.trim().to_owned();
    let message = self.message.trim().to_owned();

    let missing: Vec<&'static str> = [
      ("full_name", &full_name),
      ("email", &email),
      ("message", &message),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
      return Err(ValidationError::MissingFields(missing));
    }

    Ok(Self {
      full_name,
      email,
      phone: non_blank(self.phone),
      course_id: non_blank(self.course_id),
      course_interest: non_blank(self.course_interest),
      message,
    })
  }

  /// Build the initial `pending` record for this input.
  ///
  /// Callers are expected to have run [`NewEnquiry::validate`] first.
  pub fn into_pending(self) -> Enquiry {
    let now = timestamp_now();
    Enquiry {
      enquiry_id:      Uuid::new_v4(),
      full_name:       self.full_name,
      email:           self.email,
      phone:           self.phone,
      course_id:       self.course_id,
      course_interest: self.course_interest,
      message:         self.message,
      status:          EnquiryStatus::Pending,
      admin_notes:     None,
      version:         1,
      created_at:      now,
      updated_at:      now,
    }
  }
}

fn non_blank(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

// ─── StatusChange ────────────────────────────────────────────────────────────

/// An admin's status transition, optionally replacing the notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
  pub status:           EnquiryStatus,
  /// Replaces `admin_notes` entirely when present; `None` keeps them.
  pub notes:            Option<String>,
  /// When set, the change is rejected unless the stored version matches.
  /// When unset, the last write wins.
  pub expected_version: Option<u64>,
}

impl StatusChange {
  pub fn new(status: EnquiryStatus) -> Self {
    Self { status, notes: None, expected_version: None }
  }

  pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
    self.notes = Some(notes.into());
    self
  }

  pub fn expecting(mut self, version: u64) -> Self {
    self.expected_version = Some(version);
    self
  }

  /// Whether this change was prepared against an older version.
  pub fn is_stale(&self, current_version: u64) -> bool {
    self
      .expected_version
      .is_some_and(|expected| expected != current_version)
  }
}

// ─── Timestamps ──────────────────────────────────────────────────────────────

/// The current time at the microsecond precision that storage preserves.
pub fn timestamp_now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

/// A timestamp strictly later than `previous`, normally the current time.
pub fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
  let now = timestamp_now();
  if now > previous {
    now
  } else {
    previous + Duration::microseconds(1)
  }
}
