use crate::types::DbId;

/// Domain-level failures shared by the server and the client.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// Input that cannot be turned into a domain value (e.g. an unknown role name).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The store changed underneath a request that the policy would have allowed.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No acting profile could be resolved from the session.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The acting profile is known but the membership policy rejects the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    pub fn server_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Server",
            id,
        }
    }

    pub fn member_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Member",
            id,
        }
    }
}
