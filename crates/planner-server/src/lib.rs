//! HTTP server assembly for the university planner.
//!
//! Mounts the JSON API from `planner-api` under `/api` and wraps it in the
//! CORS and request-tracing layers.

use std::{path::{Path, PathBuf}, sync::Arc, time::Duration};

use axum::{
  Router,
  http::{HeaderValue, header::InvalidHeaderValue},
};
use planner_core::store::PlannerStore;
use planner_store_sqlite::StoreConfig;
use serde::Deserialize;
use tower_http::{
  cors::{AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `PLANNER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:               String,
  #[serde(default = "default_port")]
  pub port:               u16,
  #[serde(default = "default_store_path")]
  pub store_path:         PathBuf,
  /// Seconds a write waits for the database lock before failing.
  #[serde(default = "default_busy_timeout_secs")]
  pub busy_timeout_secs:  u64,
  /// Allowed CORS origins; `"*"` allows any origin.
  #[serde(default = "default_cors_allow_origins")]
  pub cors_allow_origins: Vec<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("planner.db") }

fn default_busy_timeout_secs() -> u64 { 30 }

fn default_cors_allow_origins() -> Vec<String> { vec!["*".to_string()] }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `PLANNER_*` environment
  /// variables. Missing keys fall back to their defaults.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("PLANNER")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("cors_allow_origins"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn store_config(&self) -> StoreConfig {
    StoreConfig { busy_timeout: Duration::from_secs(self.busy_timeout_secs) }
  }

  /// CORS policy for the configured origins. Any method and header is
  /// allowed.
  pub fn cors_layer(&self) -> Result<CorsLayer, InvalidHeaderValue> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if self.cors_allow_origins.iter().any(|o| o == "*") {
      return Ok(layer.allow_origin(Any));
    }
    let origins = self
      .cors_allow_origins
      .iter()
      .map(|o| HeaderValue::from_str(o))
      .collect::<Result<Vec<_>, _>>()?;
    Ok(layer.allow_origin(AllowOrigin::list(origins)))
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the API under `/api`, plus CORS and
/// per-request tracing.
pub fn router<S>(store: Arc<S>, cors: CorsLayer) -> Router
where
  S: PlannerStore + 'static,
{
  Router::new()
    .nest("/api", planner_api::api_router(store))
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}
