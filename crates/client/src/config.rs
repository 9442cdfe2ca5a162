use concord_core::error::CoreError;
use concord_core::roles::{parse_role_list, MemberRole};

use crate::error::ClientError;

/// Default API base URL for local development.
const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash.
    pub api_url: String,
    /// Roles the members dialog offers in its role submenu.
    pub assignable_roles: Vec<MemberRole>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            assignable_roles: MemberRole::DEFAULT_ASSIGNABLE.to_vec(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables (and `.env`).
    ///
    /// | Env Var                    | Default                 |
    /// |----------------------------|-------------------------|
    /// | `CONCORD_API_URL`          | `http://localhost:3000` |
    /// | `CONCORD_ASSIGNABLE_ROLES` | `GUEST,MODERATOR`       |
    pub fn from_env() -> Result<Self, ClientError> {
        dotenvy::dotenv().ok();

        Self::from_values(
            std::env::var("CONCORD_API_URL").ok().as_deref(),
            std::env::var("CONCORD_ASSIGNABLE_ROLES").ok().as_deref(),
        )
    }

    fn from_values(api_url: Option<&str>, roles: Option<&str>) -> Result<Self, ClientError> {
        let api_url = api_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        let assignable_roles = match roles {
            Some(raw) => {
                let roles = parse_role_list(raw)?;
                if roles.is_empty() {
                    return Err(CoreError::Validation(
                        "CONCORD_ASSIGNABLE_ROLES must name at least one role".into(),
                    )
                    .into());
                }
                roles
            }
            None => MemberRole::DEFAULT_ASSIGNABLE.to_vec(),
        };

        Ok(Self {
            api_url,
            assignable_roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_values(None, None).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(
            config.assignable_roles,
            vec![MemberRole::Guest, MemberRole::Moderator]
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::from_values(Some("https://chat.example.com/"), None).unwrap();
        assert_eq!(config.api_url, "https://chat.example.com");
    }

    #[test]
    fn admin_can_be_made_assignable() {
        let config = ClientConfig::from_values(None, Some("guest, moderator, ADMIN")).unwrap();
        assert_eq!(config.assignable_roles, MemberRole::ALL.to_vec());
    }

    #[test]
    fn unknown_or_empty_role_list_is_rejected() {
        assert_matches!(
            ClientConfig::from_values(None, Some("GUEST,OWNER")),
            Err(ClientError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            ClientConfig::from_values(None, Some(" , ")),
            Err(ClientError::Core(CoreError::Validation(_)))
        );
    }
}
