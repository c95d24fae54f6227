//! Actor identity configuration.

use serde::{Deserialize, Serialize};

/// Settings for resolving the acting user of a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// User id stamped on records when a request carries no `X-User-Id`.
    #[serde(default)]
    pub default_user_id: i32,
}
