//! [`EnquiryDesk`] — enquiry submission and the admin review workflow.
//!
//! The desk owns validation and error mapping; the store only persists.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  dispatch::{self, ContactLinks, ContactTemplates},
  enquiry::{Enquiry, NewEnquiry, StatusChange},
  error::Error,
  status::{StatusCounts, StatusFilter},
  store::{EnquiryStore, UpdateOutcome},
  Result,
};

/// A filtered listing together with counts over the whole collection, so a
/// filter UI can show totals next to the subset it displays. Both halves are
/// read from the same snapshot of the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryListing {
  pub enquiries: Vec<Enquiry>,
  pub counts:    StatusCounts,
}

/// Front door for enquiries, backed by any [`EnquiryStore`].
///
/// Cloning is cheap; the store is reference-counted.
pub struct EnquiryDesk<S> {
  store: Arc<S>,
}

impl<S> Clone for EnquiryDesk<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: EnquiryStore> EnquiryDesk<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Accept a public submission and persist it as `pending`.
  ///
  /// Input is validated here even if the form already did so; an invalid
  /// submission never reaches the store.
  pub async fn submit(&self, input: NewEnquiry) -> Result<Enquiry> {
    let input = input.validate()?;
    let enquiry = self
      .store
      .create_enquiry(input)
      .await
      .map_err(Error::store)?;
    tracing::info!(enquiry_id = %enquiry.enquiry_id, "enquiry submitted");
    Ok(enquiry)
  }

  pub async fn get(&self, id: Uuid) -> Result<Enquiry> {
    self
      .store
      .get_enquiry(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))
  }

  /// Enquiries matching `filter`, newest first, with unfiltered counts.
  pub async fn list(&self, filter: StatusFilter) -> Result<EnquiryListing> {
    let (enquiries, counts) = self
      .store
      .list_with_counts(filter)
      .await
      .map_err(Error::store)?;
    Ok(EnquiryListing { enquiries, counts })
  }

  /// Per-status counts over every enquiry, ignoring any active filter.
  pub async fn aggregate_counts(&self) -> Result<StatusCounts> {
    self.store.count_by_status().await.map_err(Error::store)
  }

  /// Move an enquiry to `change.status`, replacing notes if given.
  ///
  /// Unknown ids and stale `expected_version`s leave the store untouched.
  pub async fn update_status(
    &self,
    id: Uuid,
    change: StatusChange,
  ) -> Result<Enquiry> {
    let expected = change.expected_version;
    let status = change.status;
    let outcome = self
      .store
      .update_status(id, change)
      .await
      .map_err(Error::store)?;

    match outcome {
      UpdateOutcome::Updated(enquiry) => {
        tracing::info!(
          enquiry_id = %id,
          status = %status,
          version = enquiry.version,
          "enquiry status updated"
        );
        Ok(enquiry)
      }
      UpdateOutcome::NotFound => Err(Error::NotFound(id)),
      UpdateOutcome::Stale { current_version } => {
        tracing::warn!(
          enquiry_id = %id,
          current_version,
          "rejected stale status update"
        );
        Err(Error::Conflict {
          id,
          expected: expected.unwrap_or_default(),
          current: current_version,
        })
      }
    }
  }

  /// Ready-to-open WhatsApp and e-mail links for enquiry `id`.
  pub async fn contact_links(
    &self,
    id: Uuid,
    templates: &ContactTemplates,
  ) -> Result<ContactLinks> {
    let enquiry = self.get(id).await?;
    Ok(dispatch::contact_links(&enquiry, templates))
  }
}
