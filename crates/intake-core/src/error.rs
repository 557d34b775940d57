//! Error types for `intake-core`.

use thiserror::Error;
use uuid::Uuid;

/// Caller-supplied data failed a required-field or enum-membership check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("missing required field(s): {}", .0.join(", "))]
  MissingFields(Vec<&'static str>),

  #[error("unknown status: {0:?}")]
  UnknownStatus(String),
}

/// A contact field cannot be turned into a dispatch link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
  #[error("phone number contains no digits")]
  NoPhoneDigits,

  #[error("email address is empty")]
  EmptyEmail,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("enquiry not found: {0}")]
  NotFound(Uuid),

  #[error(
    "enquiry {id} was modified concurrently (expected version {expected}, \
     found {current})"
  )]
  Conflict { id: Uuid, expected: u64, current: u64 },

  #[error("invalid contact: {0}")]
  InvalidContact(#[from] ContactError),

  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error without altering it.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::StoreUnavailable(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
