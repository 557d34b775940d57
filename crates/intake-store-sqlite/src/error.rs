//! Error type for `intake-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored status is not one of the known values.
  #[error("stored status is invalid: {0}")]
  Status(#[from] intake_core::error::ValidationError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
