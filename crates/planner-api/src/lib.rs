//! JSON REST API for the university planner.
//!
//! Exposes an axum [`Router`] backed by any [`planner_core::store::PlannerStore`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", planner_api::api_router(store.clone()))
//! ```

pub mod assignments;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use planner_core::store::PlannerStore;
use serde::Serialize;

pub use error::ApiError;
pub use extract::ApiJson;

/// Body of every successful update or delete: `{"message":"Success"}`.
#[derive(Debug, Clone, Serialize)]
pub struct Success {
  pub message: &'static str,
}

impl Default for Success {
  fn default() -> Self { Self { message: "Success" } }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PlannerStore + 'static,
{
  Router::new()
    .route("/dashboard", get(dashboard::handler::<S>))
    // Subjects
    .route("/subjects", get(subjects::list::<S>).post(subjects::create::<S>))
    .route("/subjects/{id}", put(subjects::update::<S>).delete(subjects::remove::<S>))
    .route("/subjects/{id}/attendance", post(subjects::attendance::<S>))
    // Assignments
    .route("/assignments", get(assignments::list::<S>).post(assignments::create::<S>))
    .route(
      "/assignments/{id}",
      put(assignments::update::<S>).delete(assignments::remove::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
