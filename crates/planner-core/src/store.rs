//! The `PlannerStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `planner-store-sqlite`).
//! The API layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  assignment::{AssignmentId, AssignmentView, NewAssignment},
  attendance::{AttendanceAction, AttendanceSummary},
  dashboard::Dashboard,
  error::StoreError,
  subject::{NewSubject, SubjectId, SubjectView},
};

/// Abstraction over a planner storage backend.
///
/// Every operation is atomic: it either commits all of its writes or none.
/// Writes addressed to an id that does not exist succeed without effect,
/// except [`PlannerStore::record_attendance`], which reports the missing
/// subject.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PlannerStore: Send + Sync {
  type Error: StoreError;

  // ── Dashboard ─────────────────────────────────────────────────────────

  /// Compute the dashboard from the current state.
  fn dashboard(
    &self,
  ) -> impl Future<Output = Result<Dashboard, Self::Error>> + Send + '_;

  // ── Subjects ──────────────────────────────────────────────────────────

  /// All subjects in storage order, with their attendance percentage.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<SubjectView>, Self::Error>> + Send + '_;

  /// Insert a subject and return the listing as it stands after the insert.
  ///
  /// Fails with a duplicate-key error, leaving the store unchanged, if the
  /// code is already taken.
  fn create_subject(
    &self,
    input: NewSubject,
  ) -> impl Future<Output = Result<Vec<SubjectView>, Self::Error>> + Send + '_;

  /// Overwrite both attendance counters. No clamping is applied.
  fn update_subject(
    &self,
    id: SubjectId,
    attendance: u32,
    total_classes: u32,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Remove a subject. Its assignments are left in place.
  fn delete_subject(
    &self,
    id: SubjectId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Apply a clamped attendance action and return the resulting counters.
  ///
  /// Fails with a not-found error if the subject does not exist.
  fn record_attendance(
    &self,
    id: SubjectId,
    action: AttendanceAction,
  ) -> impl Future<Output = Result<AttendanceSummary, Self::Error>> + Send + '_;

  // ── Assignments ───────────────────────────────────────────────────────

  /// Assignments whose subject exists, ascending by deadline.
  fn list_assignments(
    &self,
  ) -> impl Future<Output = Result<Vec<AssignmentView>, Self::Error>> + Send + '_;

  /// Insert an incomplete assignment and return the listing after the insert.
  fn create_assignment(
    &self,
    input: NewAssignment,
  ) -> impl Future<Output = Result<Vec<AssignmentView>, Self::Error>> + Send + '_;

  fn set_assignment_completed(
    &self,
    id: AssignmentId,
    completed: bool,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn delete_assignment(
    &self,
    id: AssignmentId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
