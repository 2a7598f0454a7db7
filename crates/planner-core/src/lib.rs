//! Core types and trait definitions for the university planner.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::PlannerStore`]; the API layer depends
//! only on that abstraction.

pub mod assignment;
pub mod attendance;
pub mod dashboard;
pub mod error;
pub mod store;
pub mod subject;

pub use error::{Error, ErrorKind, StoreError};
