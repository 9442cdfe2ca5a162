//! Member role enumeration.
//!
//! Stored as upper-case text in the `members.role` column; the names must
//! match the CHECK constraint in `20260301000003_create_members_table.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Privilege level of a member within a server.
///
/// The derived ordering is the display order (`GUEST < MODERATOR < ADMIN`)
/// used when member lists are sorted ascending by role. This is not the
/// alphabetical order of the stored names, which would put `ADMIN` first.
/// It carries no permission meaning: only server ownership grants authority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    #[default]
    Guest,
    Moderator,
    Admin,
}

impl MemberRole {
    /// Every role a member list can display, in display order.
    pub const ALL: [MemberRole; 3] = [MemberRole::Guest, MemberRole::Moderator, MemberRole::Admin];

    /// Roles offered by the role menu unless configured otherwise.
    pub const DEFAULT_ASSIGNABLE: [MemberRole; 2] = [MemberRole::Guest, MemberRole::Moderator];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Guest => "GUEST",
            MemberRole::Moderator => "MODERATOR",
            MemberRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GUEST" => Ok(MemberRole::Guest),
            "MODERATOR" => Ok(MemberRole::Moderator),
            "ADMIN" => Ok(MemberRole::Admin),
            other => Err(CoreError::Validation(format!("unknown member role '{other}'"))),
        }
    }
}

impl TryFrom<String> for MemberRole {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse a comma-separated role list such as `"GUEST,MODERATOR"`.
///
/// Empty entries are skipped and duplicates are dropped while keeping the
/// first occurrence's position.
pub fn parse_role_list(raw: &str) -> Result<Vec<MemberRole>, CoreError> {
    let mut roles = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let role: MemberRole = part.parse()?;
        if !roles.contains(&role) {
            roles.push(role);
        }
    }
    Ok(roles)
}
