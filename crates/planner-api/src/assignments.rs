//! Handlers for `/assignments` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/assignments` | Joined with subject code/name, by deadline |
//! | `POST`   | `/assignments` | Body: [`NewAssignment`]; returns the updated listing |
//! | `PUT`    | `/assignments/:id` | Body: `{"completed":true}` |
//! | `DELETE` | `/assignments/:id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use planner_core::{
  assignment::{AssignmentId, AssignmentView, NewAssignment},
  store::PlannerStore,
};
use serde::Deserialize;

use crate::{Success, error::ApiError, extract::ApiJson};

/// `GET /assignments`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<AssignmentView>>, ApiError>
where
  S: PlannerStore,
{
  let assignments = store.list_assignments().await.map_err(ApiError::from_store)?;
  Ok(Json(assignments))
}

/// `POST /assignments`. The subject id is not checked.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<NewAssignment>,
) -> Result<Json<Vec<AssignmentView>>, ApiError>
where
  S: PlannerStore,
{
  let assignments = store.create_assignment(body).await.map_err(ApiError::from_store)?;
  Ok(Json(assignments))
}

/// `completed` as sent by clients: a JSON boolean or a 0/1 integer.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum CompletedFlag {
  Bool(bool),
  Int(i64),
}

impl From<CompletedFlag> for bool {
  fn from(flag: CompletedFlag) -> Self {
    match flag {
      CompletedFlag::Bool(b) => b,
      CompletedFlag::Int(n) => n != 0,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub completed: CompletedFlag,
}

/// `PUT /assignments/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<AssignmentId>,
  ApiJson(body): ApiJson<UpdateBody>,
) -> Result<Json<Success>, ApiError>
where
  S: PlannerStore,
{
  store
    .set_assignment_completed(id, body.completed.into())
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(Success::default()))
}

/// `DELETE /assignments/:id`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<AssignmentId>,
) -> Result<Json<Success>, ApiError>
where
  S: PlannerStore,
{
  store.delete_assignment(id).await.map_err(ApiError::from_store)?;
  Ok(Json(Success::default()))
}
