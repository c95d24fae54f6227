//! Core type definitions used across the Katla workspace.

pub mod id;

pub use id::*;
