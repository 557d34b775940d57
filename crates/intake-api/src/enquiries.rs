//! Handlers for `/enquiries` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `GET`   | `/enquiries` | Optional `?status=all\|pending\|contacted\|approved\|rejected`; returns `{enquiries, counts}` |
//! | `POST`  | `/enquiries` | Body: [`NewEnquiry`]; returns 201 + stored enquiry |
//! | `GET`   | `/enquiries/counts` | Per-status counts over all enquiries |
//! | `GET`   | `/enquiries/:id` | 404 if not found |
//! | `PATCH` | `/enquiries/:id` | Body: [`UpdateBody`]; 409 on a stale `expected_version` |
//! | `GET`   | `/enquiries/:id/contact` | WhatsApp and e-mail links |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use intake_core::{
  desk::EnquiryListing,
  dispatch::ContactLinks,
  enquiry::{Enquiry, NewEnquiry, StatusChange},
  status::{EnquiryStatus, StatusCounts, StatusFilter},
  store::EnquiryStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// `all` (the default) or one status.
  pub status: Option<String>,
}

/// `GET /enquiries[?status=<status>]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<EnquiryListing>, ApiError>
where
  S: EnquiryStore,
{
  let filter = params
    .status
    .as_deref()
    .map(str::parse::<StatusFilter>)
    .transpose()?
    .unwrap_or_default();
  Ok(Json(state.desk.list(filter).await?))
}

/// `GET /enquiries/counts`
pub async fn counts<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<StatusCounts>, ApiError>
where
  S: EnquiryStore,
{
  Ok(Json(state.desk.aggregate_counts().await?))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /enquiries` — returns 201 + the stored [`Enquiry`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<NewEnquiry>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EnquiryStore,
{
  let enquiry = state.desk.submit(body).await?;
  Ok((StatusCode::CREATED, Json(enquiry)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /enquiries/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Enquiry>, ApiError>
where
  S: EnquiryStore,
{
  Ok(Json(state.desk.get(id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PATCH /enquiries/:id`.
///
/// `status` is taken as text so an unknown value is reported as a validation
/// error rather than a deserialisation failure.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  #[serde(default)]
  pub status:           String,
  /// Replaces the admin notes when present.
  pub notes:            Option<String>,
  /// The version the admin last saw; omit for last-write-wins.
  pub expected_version: Option<u64>,
}

impl TryFrom<UpdateBody> for StatusChange {
  type Error = ApiError;

  fn try_from(b: UpdateBody) -> Result<Self, Self::Error> {
    Ok(StatusChange {
      status:           EnquiryStatus::parse(&b.status)?,
      notes:            b.notes,
      expected_version: b.expected_version,
    })
  }
}

/// `PATCH /enquiries/:id` — body: `{"status":"approved","notes":"..."}`.
pub async fn update<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<Enquiry>, ApiError>
where
  S: EnquiryStore,
{
  let change = StatusChange::try_from(body)?;
  Ok(Json(state.desk.update_status(id, change).await?))
}

// ─── Contact ──────────────────────────────────────────────────────────────────

/// `GET /enquiries/:id/contact`
///
/// An unusable phone or e-mail is reported inside the response; it does not
/// fail the request.
pub async fn contact<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ContactLinks>, ApiError>
where
  S: EnquiryStore,
{
  Ok(Json(state.desk.contact_links(id, &state.templates).await?))
}
