//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use std::time::Duration;

use planner_core::{
  ErrorKind, StoreError,
  assignment::NewAssignment,
  attendance::AttendanceAction,
  store::PlannerStore,
  subject::NewSubject,
};

use crate::{Error, SqliteStore, StoreConfig};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn subject(code: &str) -> NewSubject {
  NewSubject::new(code, format!("{code} name"), "Prof. Ada")
}

/// Create a subject and return its id.
async fn add_subject(s: &SqliteStore, input: NewSubject) -> i64 {
  let code = input.code.clone();
  s.create_subject(input)
    .await
    .unwrap()
    .into_iter()
    .find(|v| v.subject.code == code)
    .expect("created subject is listed")
    .subject
    .id
}

// ─── Subjects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_subject_returns_full_listing() {
  let s = store().await;

  s.create_subject(subject("CS101")).await.unwrap();
  let listing = s
    .create_subject(subject("MA201").with_attendance(2, 3))
    .await
    .unwrap();

  assert_eq!(listing.len(), 2);
  assert_eq!(listing[0].subject.code, "CS101");
  assert_eq!(listing[0].attendance_pct, 0.0);
  assert_eq!(listing[1].subject.code, "MA201");
  assert_eq!(listing[1].attendance_pct, 66.7);
}

#[tokio::test]
async fn list_subjects_in_insertion_order() {
  let s = store().await;
  for code in ["C", "A", "B"] {
    s.create_subject(subject(code)).await.unwrap();
  }

  let codes: Vec<_> = s
    .list_subjects()
    .await
    .unwrap()
    .into_iter()
    .map(|v| v.subject.code)
    .collect();
  assert_eq!(codes, ["C", "A", "B"]);
}

#[tokio::test]
async fn duplicate_code_is_rejected_without_insert() {
  let s = store().await;
  s.create_subject(subject("CS101")).await.unwrap();

  let err = s
    .create_subject(NewSubject::new("CS101", "Other", "Someone"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::DuplicateKey);
  assert!(matches!(
    err,
    Error::Core(planner_core::Error::DuplicateSubjectCode(ref c)) if c == "CS101"
  ));

  let listing = s.list_subjects().await.unwrap();
  assert_eq!(listing.len(), 1);
  assert_eq!(listing[0].subject.name, "CS101 name");
}

#[tokio::test]
async fn create_does_not_validate_attendance_against_total() {
  let s = store().await;
  let listing = s
    .create_subject(subject("CS101").with_attendance(7, 5))
    .await
    .unwrap();
  assert_eq!(listing[0].subject.attendance, 7);
  assert_eq!(listing[0].attendance_pct, 140.0);
}

#[tokio::test]
async fn update_subject_overwrites_counters() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;

  s.update_subject(id, 9, 4).await.unwrap();

  let listing = s.list_subjects().await.unwrap();
  assert_eq!(listing[0].subject.attendance, 9);
  assert_eq!(listing[0].subject.total_classes, 4);
}

#[tokio::test]
async fn repeated_update_is_idempotent() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;

  s.update_subject(id, 3, 4).await.unwrap();
  let first = s.list_subjects().await.unwrap();
  s.update_subject(id, 3, 4).await.unwrap();
  let second = s.list_subjects().await.unwrap();

  assert_eq!(first, second);
}

#[tokio::test]
async fn writes_to_missing_subject_are_no_ops() {
  let s = store().await;
  add_subject(&s, subject("CS101")).await;
  let before = s.list_subjects().await.unwrap();

  s.update_subject(999, 1, 1).await.unwrap();
  s.delete_subject(999).await.unwrap();

  assert_eq!(s.list_subjects().await.unwrap(), before);
}

#[tokio::test]
async fn delete_subject_removes_it() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;
  add_subject(&s, subject("MA201")).await;

  s.delete_subject(id).await.unwrap();

  let listing = s.list_subjects().await.unwrap();
  assert_eq!(listing.len(), 1);
  assert_eq!(listing[0].subject.code, "MA201");
}

// ─── Attendance ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn increment_stops_at_total() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101").with_attendance(4, 5)).await;

  let summary = s.record_attendance(id, AttendanceAction::Increment).await.unwrap();
  assert_eq!(summary.attendance, 5);
  assert_eq!(summary.attendance_pct, 100.0);

  let summary = s.record_attendance(id, AttendanceAction::Increment).await.unwrap();
  assert_eq!(summary.attendance, 5);
  assert_eq!(summary.total_classes, 5);
}

#[tokio::test]
async fn decrement_stops_at_zero() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101").with_attendance(1, 5)).await;

  let summary = s.record_attendance(id, AttendanceAction::Decrement).await.unwrap();
  assert_eq!(summary.attendance, 0);
  let summary = s.record_attendance(id, AttendanceAction::Decrement).await.unwrap();
  assert_eq!(summary.attendance, 0);
  assert_eq!(summary.attendance_pct, 0.0);
}

#[tokio::test]
async fn attendance_action_is_persisted() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101").with_attendance(2, 4)).await;

  s.record_attendance(id, AttendanceAction::Increment).await.unwrap();

  let listing = s.list_subjects().await.unwrap();
  assert_eq!(listing[0].subject.attendance, 3);
  assert_eq!(listing[0].attendance_pct, 75.0);
}

#[tokio::test]
async fn unrecognized_action_returns_current_state() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101").with_attendance(2, 3)).await;

  let summary = s
    .record_attendance(id, AttendanceAction::from("skip"))
    .await
    .unwrap();
  assert_eq!(summary.attendance, 2);
  assert_eq!(summary.total_classes, 3);
  assert_eq!(summary.attendance_pct, 66.7);
}

#[tokio::test]
async fn attendance_on_missing_subject_is_not_found() {
  let s = store().await;
  let err = s
    .record_attendance(42, AttendanceAction::Increment)
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ─── Assignments ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn assignments_are_sorted_by_deadline_with_subject_fields() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;

  for deadline in ["2025-03-01", "2025-01-01", "2025-02-01"] {
    s.create_assignment(NewAssignment::new(id, format!("due {deadline}"), deadline))
      .await
      .unwrap();
  }

  let listing = s.list_assignments().await.unwrap();
  let deadlines: Vec<_> = listing.iter().map(|a| a.assignment.deadline.as_str()).collect();
  assert_eq!(deadlines, ["2025-01-01", "2025-02-01", "2025-03-01"]);
  assert!(listing.iter().all(|a| !a.assignment.completed));
  assert!(listing.iter().all(|a| a.subject_code == "CS101"));
  assert!(listing.iter().all(|a| a.subject_name == "CS101 name"));
}

#[tokio::test]
async fn create_assignment_returns_listing() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;

  let listing = s
    .create_assignment(NewAssignment::new(id, "Essay", "2025-05-01T09:00"))
    .await
    .unwrap();
  assert_eq!(listing.len(), 1);
  assert_eq!(listing[0].assignment.title, "Essay");
  assert_eq!(listing[0].assignment.subject_id, id);
}

#[tokio::test]
async fn orphaned_assignments_are_excluded() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;

  // Accepted even though subject 999 does not exist.
  let listing = s
    .create_assignment(NewAssignment::new(999, "Orphan", "2025-01-01"))
    .await
    .unwrap();
  assert!(listing.is_empty());

  s.create_assignment(NewAssignment::new(id, "Kept", "2025-02-01"))
    .await
    .unwrap();
  let listing = s.list_assignments().await.unwrap();
  assert_eq!(listing.len(), 1);
  assert_eq!(listing[0].assignment.title, "Kept");
}

#[tokio::test]
async fn deleting_subject_orphans_its_assignments() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;
  s.create_assignment(NewAssignment::new(id, "Essay", "2025-01-01"))
    .await
    .unwrap();

  s.delete_subject(id).await.unwrap();
  assert!(s.list_assignments().await.unwrap().is_empty());

  // A new subject never reuses the deleted id, so the orphan stays hidden.
  add_subject(&s, subject("CS101")).await;
  assert!(s.list_assignments().await.unwrap().is_empty());
}

#[tokio::test]
async fn complete_and_delete_assignment() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;
  let listing = s
    .create_assignment(NewAssignment::new(id, "Essay", "2025-01-01"))
    .await
    .unwrap();
  let assignment_id = listing[0].assignment.id;

  s.set_assignment_completed(assignment_id, true).await.unwrap();
  assert!(s.list_assignments().await.unwrap()[0].assignment.completed);

  s.set_assignment_completed(assignment_id, false).await.unwrap();
  assert!(!s.list_assignments().await.unwrap()[0].assignment.completed);

  s.delete_assignment(assignment_id).await.unwrap();
  assert!(s.list_assignments().await.unwrap().is_empty());
}

#[tokio::test]
async fn assignment_writes_to_missing_id_are_no_ops() {
  let s = store().await;
  s.set_assignment_completed(7, true).await.unwrap();
  s.delete_assignment(7).await.unwrap();
  assert!(s.list_assignments().await.unwrap().is_empty());
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_dashboard() {
  let s = store().await;
  let d = s.dashboard().await.unwrap();
  assert!(d.today_classes.is_empty());
  assert!(d.upcoming_assignments.is_empty());
  assert_eq!(d.low_attendance, 0);
  assert_eq!(d.total_subjects, 0);
}

#[tokio::test]
async fn dashboard_statistics() {
  let s = store().await;
  let low = add_subject(&s, subject("LOW").with_attendance(2, 10)).await;
  add_subject(&s, subject("OK").with_attendance(8, 10)).await;
  add_subject(&s, subject("NEW")).await;
  add_subject(&s, subject("LAST").with_attendance(1, 2)).await;

  let d = s.dashboard().await.unwrap();
  assert_eq!(d.total_subjects, 4);
  assert_eq!(d.low_attendance, 2);
  let codes: Vec<_> = d.today_classes.iter().map(|c| c.code.as_str()).collect();
  assert_eq!(codes, ["LOW", "OK", "NEW"]);
  assert_eq!(d.today_classes[0].professor, "Prof. Ada");

  s.delete_subject(low).await.unwrap();
  assert_eq!(s.dashboard().await.unwrap().low_attendance, 1);
}

#[tokio::test]
async fn dashboard_lists_three_earliest_incomplete_assignments() {
  let s = store().await;
  let id = add_subject(&s, subject("CS101")).await;

  for deadline in ["2025-03-01", "2025-01-01", "2025-02-01", "2025-04-01", "2024-12-01"] {
    s.create_assignment(NewAssignment::new(id, deadline, deadline))
      .await
      .unwrap();
  }
  // The earliest one is done and must not appear.
  let done = s
    .list_assignments()
    .await
    .unwrap()
    .into_iter()
    .find(|a| a.assignment.deadline == "2024-12-01")
    .unwrap();
  s.set_assignment_completed(done.assignment.id, true).await.unwrap();

  let d = s.dashboard().await.unwrap();
  let deadlines: Vec<_> = d
    .upcoming_assignments
    .iter()
    .map(|a| a.deadline.as_str())
    .collect();
  assert_eq!(deadlines, ["2025-01-01", "2025-02-01", "2025-03-01"]);
  assert!(d.upcoming_assignments.iter().all(|a| a.subject_code == "CS101"));
}

#[tokio::test]
async fn dashboard_skips_orphaned_assignments() {
  let s = store().await;
  s.create_assignment(NewAssignment::new(5, "Orphan", "2025-01-01"))
    .await
    .unwrap();
  assert!(s.dashboard().await.unwrap().upcoming_assignments.is_empty());
}

// ─── On-disk behaviour ───────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_uses_wal_and_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("planner.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_subject(subject("CS101")).await.unwrap();
  }

  // Re-initialising the schema must not touch existing rows.
  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.list_subjects().await.unwrap().len(), 1);

  // WAL is a property of the file, visible to any connection.
  let raw = rusqlite::Connection::open(&path).unwrap();
  let mode: String = raw.query_row("PRAGMA journal_mode", [], |r| r.get(0)).unwrap();
  assert_eq!(mode.to_lowercase(), "wal");
}

#[tokio::test]
async fn writer_lock_contention_times_out() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("planner.db");

  let config = StoreConfig { busy_timeout: Duration::from_millis(50) };
  let s = SqliteStore::open_with(&path, config).await.unwrap();

  // Hold the write lock from a second, independent connection.
  let blocker = rusqlite::Connection::open(&path).unwrap();
  blocker.execute_batch("BEGIN IMMEDIATE").unwrap();

  let err = s.create_subject(subject("CS101")).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Timeout);

  blocker.execute_batch("ROLLBACK").unwrap();
  assert!(s.list_subjects().await.unwrap().is_empty());
}
