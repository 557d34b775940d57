//! [`SqliteStore`] — the SQLite implementation of [`EnquiryStore`].

use std::path::Path;

use intake_core::{
  enquiry::{next_timestamp, Enquiry, NewEnquiry, StatusChange},
  status::{StatusCounts, StatusFilter},
  store::{EnquiryStore, UpdateOutcome},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  encode::{
    decode_dt_column, decode_status, encode_dt, encode_status, encode_uuid,
    RawEnquiry, UPDATED_AT_COLUMN,
  },
  schema::{ENQUIRY_COLUMNS, SCHEMA},
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An enquiry store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All
/// statements run on the connection's own thread, one closure at a time, so
/// each closure below executes without interleaving with other operations.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What the status-update transaction found, before decoding.
enum RawUpdate {
  Updated(RawEnquiry),
  NotFound,
  Stale(u64),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened enquiry store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert a fully-built [`Enquiry`] into the `enquiries` table.
  async fn insert_enquiry(&self, enquiry: &Enquiry) -> Result<()> {
    let id_str          = encode_uuid(enquiry.enquiry_id);
    let full_name       = enquiry.full_name.clone();
    let email           = enquiry.email.clone();
    let phone           = enquiry.phone.clone();
    let course_id       = enquiry.course_id.clone();
    let course_interest = enquiry.course_interest.clone();
    let message         = enquiry.message.clone();
    let status_str      = encode_status(enquiry.status);
    let admin_notes     = enquiry.admin_notes.clone();
    let version         = enquiry.version;
    let created_at_str  = encode_dt(enquiry.created_at);
    let updated_at_str  = encode_dt(enquiry.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO enquiries (
             enquiry_id, full_name, email, phone, course_id, course_interest,
             message, status, admin_notes, version, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          rusqlite::params![
            id_str,
            full_name,
            email,
            phone,
            course_id,
            course_interest,
            message,
            status_str,
            admin_notes,
            version,
            created_at_str,
            updated_at_str,
          ],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── EnquiryStore impl ───────────────────────────────────────────────────────

impl EnquiryStore for SqliteStore {
  type Error = Error;

  async fn create_enquiry(&self, input: NewEnquiry) -> Result<Enquiry> {
    let enquiry = input.into_pending();
    self.insert_enquiry(&enquiry).await?;
    Ok(enquiry)
  }

  async fn get_enquiry(&self, id: Uuid) -> Result<Option<Enquiry>> {
    let id_str = encode_uuid(id);
    let sql = format!("SELECT {ENQUIRY_COLUMNS} FROM enquiries WHERE enquiry_id = ?1");

    let raw: Option<RawEnquiry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id_str], RawEnquiry::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawEnquiry::into_enquiry).transpose()
  }

  async fn list_enquiries(&self, filter: StatusFilter) -> Result<Vec<Enquiry>> {
    let status_str = filter.status().map(encode_status);

    let raws = self
      .conn
      .call(move |conn| Ok(select_enquiries(conn, status_str)?))
      .await?;

    raws.into_iter().map(RawEnquiry::into_enquiry).collect()
  }

  async fn list_with_counts(
    &self,
    filter: StatusFilter,
  ) -> Result<(Vec<Enquiry>, StatusCounts)> {
    let status_str = filter.status().map(encode_status);

    let (raws, rows) = self
      .conn
      .call(move |conn| {
        // Both reads see the same snapshot.
        let tx = conn.transaction()?;
        let raws = select_enquiries(&tx, status_str)?;
        let rows = select_status_counts(&tx)?;
        tx.commit()?;
        Ok((raws, rows))
      })
      .await?;

    let enquiries = raws
      .into_iter()
      .map(RawEnquiry::into_enquiry)
      .collect::<Result<_>>()?;
    Ok((enquiries, decode_counts(rows)?))
  }

  async fn count_by_status(&self) -> Result<StatusCounts> {
    let rows = self
      .conn
      .call(|conn| Ok(select_status_counts(conn)?))
      .await?;

    decode_counts(rows)
  }

  async fn update_status(&self, id: Uuid, change: StatusChange) -> Result<UpdateOutcome> {
    let id_str     = encode_uuid(id);
    let status_str = encode_status(change.status);
    let select_one = format!("SELECT {ENQUIRY_COLUMNS} FROM enquiries WHERE enquiry_id = ?1");

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current = tx
          .query_row(&select_one, rusqlite::params![id_str], RawEnquiry::from_row)
          .optional()?;
        let Some(current) = current else {
          return Ok(RawUpdate::NotFound);
        };
        if change.is_stale(current.version) {
          return Ok(RawUpdate::Stale(current.version));
        }

        let previous = decode_dt_column(&current.updated_at, UPDATED_AT_COLUMN)?;
        let updated_at_str = encode_dt(next_timestamp(previous));

        tx.execute(
          "UPDATE enquiries
              SET status      = ?2,
                  admin_notes = COALESCE(?3, admin_notes),
                  version     = version + 1,
                  updated_at  = ?4
            WHERE enquiry_id = ?1",
          rusqlite::params![id_str, status_str, change.notes, updated_at_str],
        )?;
        let updated =
          tx.query_row(&select_one, rusqlite::params![id_str], RawEnquiry::from_row)?;

        tx.commit()?;
        Ok(RawUpdate::Updated(updated))
      })
      .await?;

    Ok(match raw {
      RawUpdate::Updated(raw) => UpdateOutcome::Updated(raw.into_enquiry()?),
      RawUpdate::NotFound => UpdateOutcome::NotFound,
      RawUpdate::Stale(current_version) => UpdateOutcome::Stale { current_version },
    })
  }
}

// ─── Shared reads ────────────────────────────────────────────────────────────

fn select_enquiries(
  conn: &rusqlite::Connection,
  status: Option<&'static str>,
) -> rusqlite::Result<Vec<RawEnquiry>> {
  // rowid breaks ties between enquiries created in the same microsecond.
  let sql = format!(
    "SELECT {ENQUIRY_COLUMNS} FROM enquiries
     WHERE (?1 IS NULL OR status = ?1)
     ORDER BY created_at DESC, rowid DESC"
  );
  let mut stmt = conn.prepare(&sql)?;
  let rows = stmt
    .query_map(rusqlite::params![status], RawEnquiry::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn select_status_counts(
  conn: &rusqlite::Connection,
) -> rusqlite::Result<Vec<(String, usize)>> {
  let mut stmt =
    conn.prepare("SELECT status, COUNT(*) FROM enquiries GROUP BY status")?;
  let rows = stmt
    .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn decode_counts(rows: Vec<(String, usize)>) -> Result<StatusCounts> {
  let mut counts = StatusCounts::default();
  for (status, n) in rows {
    counts.add(decode_status(&status)?, n);
  }
  Ok(counts)
}
