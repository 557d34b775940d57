//! Integration tests for `SqliteStore` against an in-memory database.

use intake_core::{
  enquiry::{NewEnquiry, StatusChange},
  status::{EnquiryStatus, StatusCounts, StatusFilter},
  store::{EnquiryStore, UpdateOutcome},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn form(name: &str) -> NewEnquiry {
  NewEnquiry {
    full_name:       name.into(),
    email:           format!("{}@example.com", name.to_lowercase()),
    phone:           Some("+1 555 0100".into()),
    course_id:       Some("selenium-101".into()),
    course_interest: Some("Automation".into()),
    message:         "When does the next batch start?".into(),
  }
}

fn updated(outcome: UpdateOutcome) -> intake_core::enquiry::Enquiry {
  match outcome {
    UpdateOutcome::Updated(e) => e,
    other => panic!("expected Updated, got {other:?}"),
  }
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_enquiry() {
  let s = store().await;

  let created = s.create_enquiry(form("Nisha")).await.unwrap();
  assert_eq!(created.status, EnquiryStatus::Pending);
  assert_eq!(created.version, 1);
  assert_eq!(created.created_at, created.updated_at);

  let fetched = s.get_enquiry(created.enquiry_id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn optional_columns_roundtrip_as_null() {
  let s = store().await;
  let input = NewEnquiry {
    phone: None,
    course_id: None,
    course_interest: None,
    ..form("Nisha")
  };

  let created = s.create_enquiry(input).await.unwrap();
  let fetched = s.get_enquiry(created.enquiry_id).await.unwrap().unwrap();
  assert_eq!(fetched.phone, None);
  assert_eq!(fetched.course_id, None);
  assert_eq!(fetched.course_interest, None);
  assert_eq!(fetched.admin_notes, None);
}

#[tokio::test]
async fn get_enquiry_missing_returns_none() {
  let s = store().await;
  assert!(s.get_enquiry(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_is_newest_first() {
  let s = store().await;
  let first = s.create_enquiry(form("A")).await.unwrap();
  let second = s.create_enquiry(form("B")).await.unwrap();
  let third = s.create_enquiry(form("C")).await.unwrap();

  let ids: Vec<_> = s
    .list_enquiries(StatusFilter::All)
    .await
    .unwrap()
    .into_iter()
    .map(|e| e.enquiry_id)
    .collect();
  assert_eq!(ids, vec![third.enquiry_id, second.enquiry_id, first.enquiry_id]);
}

#[tokio::test]
async fn list_filtered_by_status() {
  let s = store().await;
  let a = s.create_enquiry(form("A")).await.unwrap();
  s.create_enquiry(form("B")).await.unwrap();
  s.update_status(a.enquiry_id, StatusChange::new(EnquiryStatus::Contacted))
    .await
    .unwrap();

  let contacted = s
    .list_enquiries(StatusFilter::Only(EnquiryStatus::Contacted))
    .await
    .unwrap();
  assert_eq!(contacted.len(), 1);
  assert_eq!(contacted[0].enquiry_id, a.enquiry_id);

  let rejected = s
    .list_enquiries(StatusFilter::Only(EnquiryStatus::Rejected))
    .await
    .unwrap();
  assert!(rejected.is_empty());

  assert_eq!(s.list_enquiries(StatusFilter::All).await.unwrap().len(), 2);
}

// ─── Counts ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn count_by_status_empty_store() {
  let s = store().await;
  assert_eq!(s.count_by_status().await.unwrap(), StatusCounts::default());
}

#[tokio::test]
async fn count_by_status_covers_every_row() {
  let s = store().await;
  let mut ids = Vec::new();
  for name in ["A", "B", "C", "D", "E", "F"] {
    ids.push(s.create_enquiry(form(name)).await.unwrap().enquiry_id);
  }
  for (id, status) in [
    (ids[0], EnquiryStatus::Approved),
    (ids[1], EnquiryStatus::Approved),
    (ids[2], EnquiryStatus::Rejected),
  ] {
    s.update_status(id, StatusChange::new(status)).await.unwrap();
  }

  let counts = s.count_by_status().await.unwrap();
  assert_eq!(counts, StatusCounts {
    pending:   3,
    contacted: 0,
    approved:  2,
    rejected:  1,
  });
  assert_eq!(counts.total(), 6);
}

#[tokio::test]
async fn list_with_counts_reads_one_snapshot() {
  let s = store().await;
  let a = s.create_enquiry(form("A")).await.unwrap();
  s.create_enquiry(form("B")).await.unwrap();
  s.update_status(a.enquiry_id, StatusChange::new(EnquiryStatus::Rejected))
    .await
    .unwrap();

  let (rejected, counts) = s
    .list_with_counts(StatusFilter::Only(EnquiryStatus::Rejected))
    .await
    .unwrap();
  assert_eq!(rejected.len(), 1);
  assert_eq!(rejected[0].enquiry_id, a.enquiry_id);
  assert_eq!(counts.get(EnquiryStatus::Rejected), rejected.len());
  assert_eq!(counts.total(), 2);

  let (all, counts) = s.list_with_counts(StatusFilter::All).await.unwrap();
  assert_eq!(all, s.list_enquiries(StatusFilter::All).await.unwrap());
  assert_eq!(counts, s.count_by_status().await.unwrap());
  assert_eq!(counts.total(), all.len());
}

// ─── Status updates ──────────────────────────────────────────────────────────

#[tokio::test]
async fn update_status_persists_change() {
  let s = store().await;
  let created = s.create_enquiry(form("Nisha")).await.unwrap();

  let after = updated(
    s.update_status(
      created.enquiry_id,
      StatusChange::new(EnquiryStatus::Contacted).with_notes("left voicemail"),
    )
    .await
    .unwrap(),
  );

  assert_eq!(after.status, EnquiryStatus::Contacted);
  assert_eq!(after.admin_notes.as_deref(), Some("left voicemail"));
  assert_eq!(after.version, 2);
  assert_eq!(after.created_at, created.created_at);
  assert!(after.updated_at > created.updated_at);

  let fetched = s.get_enquiry(created.enquiry_id).await.unwrap().unwrap();
  assert_eq!(fetched, after);
}

#[tokio::test]
async fn update_without_notes_keeps_existing_notes() {
  let s = store().await;
  let created = s.create_enquiry(form("Nisha")).await.unwrap();
  s.update_status(
    created.enquiry_id,
    StatusChange::new(EnquiryStatus::Contacted).with_notes("call back Friday"),
  )
  .await
  .unwrap();

  let after = updated(
    s.update_status(created.enquiry_id, StatusChange::new(EnquiryStatus::Approved))
      .await
      .unwrap(),
  );
  assert_eq!(after.admin_notes.as_deref(), Some("call back Friday"));
}

#[tokio::test]
async fn rapid_updates_strictly_advance_updated_at() {
  let s = store().await;
  let created = s.create_enquiry(form("Nisha")).await.unwrap();

  let mut last = created.updated_at;
  for _ in 0..20 {
    let e = updated(
      s.update_status(created.enquiry_id, StatusChange::new(EnquiryStatus::Pending))
        .await
        .unwrap(),
    );
    assert!(e.updated_at > last);
    last = e.updated_at;
  }
}

#[tokio::test]
async fn update_missing_enquiry_is_not_found() {
  let s = store().await;
  s.create_enquiry(form("Nisha")).await.unwrap();
  let before = s.list_enquiries(StatusFilter::All).await.unwrap();

  let outcome = s
    .update_status(Uuid::new_v4(), StatusChange::new(EnquiryStatus::Approved))
    .await
    .unwrap();
  assert_eq!(outcome, UpdateOutcome::NotFound);
  assert_eq!(s.list_enquiries(StatusFilter::All).await.unwrap(), before);
}

#[tokio::test]
async fn stale_version_writes_nothing() {
  let s = store().await;
  let created = s.create_enquiry(form("Nisha")).await.unwrap();
  s.update_status(
    created.enquiry_id,
    StatusChange::new(EnquiryStatus::Approved).expecting(1),
  )
  .await
  .unwrap();
  let before = s.get_enquiry(created.enquiry_id).await.unwrap().unwrap();

  let outcome = s
    .update_status(
      created.enquiry_id,
      StatusChange::new(EnquiryStatus::Rejected)
        .with_notes("duplicate")
        .expecting(1),
    )
    .await
    .unwrap();

  assert_eq!(outcome, UpdateOutcome::Stale { current_version: 2 });
  let after = s.get_enquiry(created.enquiry_id).await.unwrap().unwrap();
  assert_eq!(after, before);
}

#[tokio::test]
async fn data_survives_reopen() {
  let dir = std::env::temp_dir().join(format!("intake-test-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("enquiries.db");

  let id = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_enquiry(form("Nisha")).await.unwrap().enquiry_id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let fetched = s.get_enquiry(id).await.unwrap().unwrap();
  assert_eq!(fetched.full_name, "Nisha");

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
