//! JSON REST API for Intake.
//!
//! Exposes an axum [`Router`] backed by any [`EnquiryStore`].
//! Auth, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", intake_api::api_router(store.clone(), templates))
//! ```

pub mod enquiries;
pub mod error;

use std::sync::Arc;

use axum::{Router, routing::get};
use intake_core::{desk::EnquiryDesk, dispatch::ContactTemplates, store::EnquiryStore};

pub use error::ApiError;

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub desk:      EnquiryDesk<S>,
  pub templates: Arc<ContactTemplates>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      desk:      self.desk.clone(),
      templates: Arc::clone(&self.templates),
    }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, templates: ContactTemplates) -> Router<()>
where
  S: EnquiryStore + 'static,
{
  let state = ApiState {
    desk:      EnquiryDesk::new(store),
    templates: Arc::new(templates),
  };

  Router::new()
    .route(
      "/enquiries",
      get(enquiries::list::<S>).post(enquiries::create::<S>),
    )
    .route("/enquiries/counts", get(enquiries::counts::<S>))
    .route(
      "/enquiries/{id}",
      get(enquiries::get_one::<S>).patch(enquiries::update::<S>),
    )
    .route("/enquiries/{id}/contact", get(enquiries::contact::<S>))
    .with_state(state)
}
