//! Request and response bodies.

pub mod request;
pub mod response;

pub use request::HiveSectionBody;
pub use response::{ApiResponse, DetailedHealthResponse, HealthResponse, PoolUsage};
