//! # katla-api
//!
//! HTTP API layer for KatlaSport hive management built on Axum.
//!
//! Provides the hive section REST endpoints, health checks, request
//! logging and CORS middleware, the actor extractor, DTOs, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use state::AppState;
