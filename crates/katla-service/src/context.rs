//! Request context carrying the acting user.

use katla_core::traits::UserContext;
use katla_core::types::UserId;

/// Context for the current request.
///
/// Built by the API layer for every request and handed to the services as
/// their identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl UserContext for RequestContext {
    fn user_id(&self) -> UserId {
        self.user_id
    }
}
