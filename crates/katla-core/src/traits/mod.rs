//! Core traits defined in `katla-core` and implemented by other crates.

pub mod user_context;

pub use user_context::UserContext;
