use concord_core::error::CoreError;
use concord_core::roles::MemberRole;

/// Errors from the member management client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The role is displayable but not offered for assignment.
    #[error("Role {0} cannot be assigned")]
    RoleNotAssignable(MemberRole),

    /// An action was issued while no server is loaded in the members modal.
    #[error("No server is open")]
    NoServer,

    /// Invalid client configuration.
    #[error(transparent)]
    Core(#[from] CoreError),
}
