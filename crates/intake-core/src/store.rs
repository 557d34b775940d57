//! The `EnquiryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `intake-store-sqlite`).
//! The [`EnquiryDesk`](crate::desk::EnquiryDesk) and the HTTP layer depend on
//! this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  enquiry::{Enquiry, NewEnquiry, StatusChange},
  status::{StatusCounts, StatusFilter},
};

/// Result of a conditional status write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
  Updated(Enquiry),
  NotFound,
  /// `expected_version` did not match; nothing was written.
  Stale { current_version: u64 },
}

/// Abstraction over an enquiry store backend.
///
/// Each method is a single unit of work: no call spans more than one record's
/// write, and a failed call leaves the store unchanged.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait EnquiryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new `pending` enquiry built from already-validated input.
  /// The identifier and timestamps are assigned by the store.
  fn create_enquiry(
    &self,
    input: NewEnquiry,
  ) -> impl Future<Output = Result<Enquiry, Self::Error>> + Send + '_;

  /// Retrieve an enquiry by UUID. Returns `None` if not found.
  fn get_enquiry(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Enquiry>, Self::Error>> + Send + '_;

  /// Enquiries matching `filter`, newest `created_at` first.
  fn list_enquiries(
    &self,
    filter: StatusFilter,
  ) -> impl Future<Output = Result<Vec<Enquiry>, Self::Error>> + Send + '_;

  /// [`list_enquiries`](Self::list_enquiries) and
  /// [`count_by_status`](Self::count_by_status) read as one snapshot, so the
  /// counts always describe the same record set the listing was drawn from.
  fn list_with_counts(
    &self,
    filter: StatusFilter,
  ) -> impl Future<Output = Result<(Vec<Enquiry>, StatusCounts), Self::Error>>
  + Send
  + '_;

  /// Per-status counts over every stored enquiry.
  fn count_by_status(
    &self,
  ) -> impl Future<Output = Result<StatusCounts, Self::Error>> + Send + '_;

  /// Apply `change` to enquiry `id` atomically: the existence check, the
  /// version check, and the write happen as one operation.
  fn update_status(
    &self,
    id: Uuid,
    change: StatusChange,
  ) -> impl Future<Output = Result<UpdateOutcome, Self::Error>> + Send + '_;
}
