//! Core types and services for the Intake enquiry desk.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::EnquiryStore`]; transports drive the
//! [`desk::EnquiryDesk`] workflow service.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod desk;
pub mod dispatch;
pub mod enquiry;
pub mod error;
pub mod status;
pub mod store;

pub use error::{Error, Result};
