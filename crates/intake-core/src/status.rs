//! The enquiry triage status, list filters, and derived per-status counts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

use crate::error::ValidationError;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where an enquiry sits in the admin triage workflow.
///
/// Any status may move to any other; the workflow imposes no transition table.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
  strum::EnumIter,
  strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum EnquiryStatus {
  /// Initial state for every new submission.
  #[default]
  Pending,
  Contacted,
  Approved,
  Rejected,
}

impl EnquiryStatus {
  /// Parse a status supplied by a caller, e.g. from a request body.
  pub fn parse(raw: &str) -> Result<Self, ValidationError> {
    Self::from_str(raw.trim())
      .map_err(|_| ValidationError::UnknownStatus(raw.to_owned()))
  }

  /// The lowercase name stored in the database and used on the wire.
  pub fn as_str(self) -> &'static str { self.into() }

  /// All four statuses in workflow order.
  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Restricts an enquiry listing to one status, or lets everything through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
  #[default]
  All,
  Only(EnquiryStatus),
}

impl StatusFilter {
  pub fn matches(self, status: EnquiryStatus) -> bool {
    match self {
      Self::All => true,
      Self::Only(s) => s == status,
    }
  }

  /// The single status selected, if any.
  pub fn status(self) -> Option<EnquiryStatus> {
    match self {
      Self::All => None,
      Self::Only(s) => Some(s),
    }
  }
}

impl FromStr for StatusFilter {
  type Err = ValidationError;

  fn from_str(raw: &str) -> Result<Self, Self::Err> {
    if raw.trim().eq_ignore_ascii_case("all") {
      return Ok(Self::All);
    }
    EnquiryStatus::parse(raw).map(Self::Only)
  }
}

impl From<EnquiryStatus> for StatusFilter {
  fn from(status: EnquiryStatus) -> Self { Self::Only(status) }
}

// ─── Counts ──────────────────────────────────────────────────────────────────

/// Number of enquiries currently in each status. Always derived from the full
/// record set, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
  pub pending:   usize,
  pub contacted: usize,
  pub approved:  usize,
  pub rejected:  usize,
}

impl StatusCounts {
  /// Count one entry per status yielded by `statuses`.
  pub fn tally(statuses: impl IntoIterator<Item = EnquiryStatus>) -> Self {
    let mut counts = Self::default();
    for status in statuses {
      counts.add(status, 1);
    }
    counts
  }

  pub fn add(&mut self, status: EnquiryStatus, n: usize) {
    *self.slot_mut(status) += n;
  }

  pub fn get(&self, status: EnquiryStatus) -> usize {
    match status {
      EnquiryStatus::Pending => self.pending,
      EnquiryStatus::Contacted => self.contacted,
      EnquiryStatus::Approved => self.approved,
      EnquiryStatus::Rejected => self.rejected,
    }
  }

  /// Sum over all statuses; equals the number of stored enquiries.
  pub fn total(&self) -> usize {
    EnquiryStatus::all().map(|s| self.get(s)).sum()
  }

  fn slot_mut(&mut self, status: EnquiryStatus) -> &mut usize {
    match status {
      EnquiryStatus::Pending => &mut self.pending,
      EnquiryStatus::Contacted => &mut self.contacted,
      EnquiryStatus::Approved => &mut self.approved,
      EnquiryStatus::Rejected => &mut self.rejected,
    }
  }
}
