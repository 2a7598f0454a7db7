//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | All subjects with `attendance_pct` |
//! | `POST`   | `/subjects` | Body: [`NewSubject`]; returns the updated listing |
//! | `PUT`    | `/subjects/:id` | Body: [`UpdateBody`] |
//! | `DELETE` | `/subjects/:id` | |
//! | `POST`   | `/subjects/:id/attendance` | Body: `{"action":"increment"\|"decrement"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use planner_core::{
  attendance::{AttendanceAction, AttendanceSummary},
  store::PlannerStore,
  subject::{NewSubject, SubjectId, SubjectView},
};
use serde::Deserialize;

use crate::{Success, error::ApiError, extract::ApiJson};

// ─── List / create ────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<SubjectView>>, ApiError>
where
  S: PlannerStore,
{
  let subjects = store.list_subjects().await.map_err(ApiError::from_store)?;
  Ok(Json(subjects))
}

/// `POST /subjects`: inserts, then answers with the full listing.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NewSubject>,
) -> Result<Json<Vec<SubjectView>>, ApiError>
where
  S: PlannerStore,
{
  let subjects = store.create_subject(body).await.map_err(ApiError::from_store)?;
  Ok(Json(subjects))
}

// ─── Update / delete ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub attendance:    u32,
  pub total_classes: u32,
}

/// `PUT /subjects/:id`: succeeds even when the subject does not exist.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<SubjectId>,
  ApiJson(body): ApiJson<UpdateBody>,
) -> Result<Json<Success>, ApiError>
where
  S: PlannerStore,
{
  store
    .update_subject(id, body.attendance, body.total_classes)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(Success::default()))
}

/// `DELETE /subjects/:id`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<SubjectId>,
) -> Result<Json<Success>, ApiError>
where
  S: PlannerStore,
{
  store.delete_subject(id).await.map_err(ApiError::from_store)?;
  Ok(Json(Success::default()))
}

// ─── Attendance ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AttendanceBody {
  pub action: AttendanceAction,
}

/// `POST /subjects/:id/attendance`: 404 if the subject does not exist.
pub async fn attendance<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<SubjectId>,
  ApiJson(body): ApiJson<AttendanceBody>,
) -> Result<Json<AttendanceSummary>, ApiError>
where
  S: PlannerStore,
{
  let summary = store
    .record_attendance(id, body.action)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(summary))
}
