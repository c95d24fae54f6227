//! Identity provider trait.

use crate::types::id::UserId;

/// Supplies the identifier of the user performing the current operation.
///
/// Services read it when stamping `created_by` / `last_updated_by`.
pub trait UserContext: Send + Sync + 'static {
    /// The acting user's identifier.
    fn user_id(&self) -> UserId;
}

/// A fixed actor, used for background tasks and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticUserContext(pub UserId);

impl UserContext for StaticUserContext {
    fn user_id(&self) -> UserId {
        self.0
    }
}
