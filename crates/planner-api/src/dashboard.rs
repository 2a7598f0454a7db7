//! Handler for `GET /dashboard`.

use std::sync::Arc;

use axum::{Json, extract::State};
use planner_core::{dashboard::Dashboard, store::PlannerStore};

use crate::error::ApiError;

/// `GET /dashboard`
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<Json<Dashboard>, ApiError>
where
  S: PlannerStore,
{
  let dashboard = store.dashboard().await.map_err(ApiError::from_store)?;
  Ok(Json(dashboard))
}
