//! HTTP integration tests driving the router over the in-memory store.

mod health_test;
mod helpers;
mod hive_section_test;
