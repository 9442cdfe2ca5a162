//! Membership authorization policy.
//!
//! The store enforces the same predicate inside its conditional write; the
//! functions here are the storage-independent statement of it, used to
//! explain a rejected write and to decide which rows get an action menu.

use crate::error::CoreError;
use crate::types::DbId;

/// Whether `actor` may change the role of (or kick) the member whose profile
/// is `target_profile` in a server owned by `server_owner`.
///
/// Only the owner may act, and never on their own membership.
pub fn can_change_role(actor: DbId, server_owner: DbId, target_profile: DbId) -> bool {
    actor == server_owner && target_profile != actor
}

/// Whether a member row should offer moderation actions at all.
///
/// The owner's own row never does, whoever is looking at it.
pub fn is_manageable(server_owner: DbId, member_profile: DbId) -> bool {
    server_owner != member_profile
}

/// What the store saw when a guarded write matched no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedWrite {
    pub server_id: DbId,
    pub member_id: DbId,
    /// Owner of `server_id`, or `None` if the server does not exist.
    pub server_owner: Option<DbId>,
    /// Profile of `member_id` within `server_id`, or `None` if there is no such member.
    pub target_profile: Option<DbId>,
}

/// Turn a guarded write that matched zero rows into a typed error.
pub fn classify_rejection(actor: DbId, rejected: RejectedWrite) -> CoreError {
    let Some(server_owner) = rejected.server_owner else {
        return CoreError::server_not_found(rejected.server_id);
    };
    let Some(target_profile) = rejected.target_profile else {
        return CoreError::member_not_found(rejected.member_id);
    };

    if actor != server_owner {
        return CoreError::Forbidden("Only the server owner can manage members".into());
    }
    if !can_change_role(actor, server_owner, target_profile) {
        return CoreError::Forbidden("The server owner's own membership cannot be changed".into());
    }

    CoreError::Conflict(format!(
        "Member {} changed while the request was in flight",
        rejected.member_id
    ))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const OWNER: DbId = 1;
    const OTHER: DbId = 2;
    const STRANGER: DbId = 3;

    fn rejected(server_owner: Option<DbId>, target_profile: Option<DbId>) -> RejectedWrite {
        RejectedWrite {
            server_id: 10,
            member_id: 20,
            server_owner,
            target_profile,
        }
    }

    #[test]
    fn owner_may_change_other_member() {
        assert!(can_change_role(OWNER, OWNER, OTHER));
    }

    #[test]
    fn owner_may_not_change_own_membership() {
        assert!(!can_change_role(OWNER, OWNER, OWNER));
    }

    #[test]
    fn non_owner_may_not_change_anyone() {
        assert!(!can_change_role(STRANGER, OWNER, OTHER));
        assert!(!can_change_role(OTHER, OWNER, OTHER));
        assert!(!can_change_role(OTHER, OWNER, OWNER));
    }

    #[test]
    fn owner_row_is_not_manageable() {
        assert!(!is_manageable(OWNER, OWNER));
        assert!(is_manageable(OWNER, OTHER));
    }

    #[test]
    fn missing_server_classifies_as_not_found() {
        let err = classify_rejection(OWNER, rejected(None, None));
        assert_matches!(err, CoreError::NotFound { entity: "Server", id: 10 });
    }

    #[test]
    fn missing_member_classifies_as_not_found() {
        let err = classify_rejection(OWNER, rejected(Some(OWNER), None));
        assert_matches!(err, CoreError::NotFound { entity: "Member", id: 20 });
    }

    #[test]
    fn non_owner_classifies_as_forbidden() {
        let err = classify_rejection(STRANGER, rejected(Some(OWNER), Some(OTHER)));
        assert_matches!(err, CoreError::Forbidden(_));
    }

    #[test]
    fn self_target_classifies_as_forbidden() {
        let err = classify_rejection(OWNER, rejected(Some(OWNER), Some(OWNER)));
        assert_matches!(err, CoreError::Forbidden(_));
    }

    #[test]
    fn allowed_but_unmatched_classifies_as_conflict() {
        let err = classify_rejection(OWNER, rejected(Some(OWNER), Some(OTHER)));
        assert_matches!(err, CoreError::Conflict(_));
    }
}
