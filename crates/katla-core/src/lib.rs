//! # katla-core
//!
//! Core crate for KatlaSport hive management. Contains the configuration
//! schema, typed identifiers, the identity provider trait, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Katla crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
