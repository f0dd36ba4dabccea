// SPDX-License-Identifier: MIT OR Apache-2.0

use groups_relay_core::GroupId;
use tracing::trace;

use crate::{Action, Role};

/// Decide whether the given role grants permission to perform an action.
///
/// Admins may do everything. Moderators may remove members, delete events and change the roles of
/// members. Everyone else can't do anything.
///
/// Every action has to be listed explicitly, new actions are forbidden for everyone but admins
/// until they get added here.
pub fn authorize(role: &Role, action: &Action) -> bool {
    match role {
        Role::Admin => true,
        Role::Moderator => match action {
            Action::RemoveMember { .. } | Action::DeleteEvent { .. } | Action::PutUser { .. } => {
                true
            }
            Action::AddMember { .. }
            | Action::EditMetadata(_)
            | Action::EditPermissions { .. }
            | Action::CreateGroup
            | Action::DeleteGroup
            | Action::CreateInvite { .. } => false,
        },
        Role::Member | Role::Other(_) => false,
    }
}

/// Hook deciding if a member holding a role in a group may perform an action.
///
/// Implemented for plain functions and closures, so hosts can install their own policy.
pub trait AllowAction {
    fn allow(&self, group: &GroupId, role: &Role, action: &Action) -> bool;
}

impl<F> AllowAction for F
where
    F: Fn(&GroupId, &Role, &Action) -> bool,
{
    fn allow(&self, group: &GroupId, role: &Role, action: &Action) -> bool {
        self(group, role, action)
    }
}

/// Policy of the three built-in roles, see [`authorize`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultRoles;

impl AllowAction for DefaultRoles {
    fn allow(&self, group: &GroupId, role: &Role, action: &Action) -> bool {
        let allowed = authorize(role, action);
        trace!(%group, %role, action = action.name(), allowed, "authorize action");
        allowed
    }
}

#[cfg(test)]
mod tests {
    use groups_relay_core::{EventId, GroupId};

    use super::{AllowAction, DefaultRoles, authorize};
    use crate::action::{MemberRoles, MetadataChanges};
    use crate::test_utils::identity;
    use crate::{Action, Role};

    fn all_actions() -> Vec<Action> {
        vec![
            Action::AddMember {
                members: vec![identity(1)],
            },
            Action::PutUser {
                members: vec![MemberRoles {
                    member: identity(1),
                    roles: vec!["moderator".into()],
                }],
            },
            Action::RemoveMember {
                members: vec![identity(1)],
            },
            Action::DeleteEvent {
                targets: vec![EventId::from_bytes([1; 32])],
            },
            Action::EditMetadata(MetadataChanges::default()),
            Action::EditPermissions {
                members: vec![identity(1)],
            },
            Action::CreateGroup,
            Action::DeleteGroup,
            Action::CreateInvite { code: "abc".into() },
        ]
    }

    #[test]
    fn admin_can_do_everything() {
        for action in all_actions() {
            assert!(authorize(&Role::Admin, &action), "{}", action.name());
        }
    }

    #[test]
    fn moderator_allow_list() {
        for action in all_actions() {
            let expected = matches!(
                action,
                Action::RemoveMember { .. } | Action::DeleteEvent { .. } | Action::PutUser { .. }
            );
            assert_eq!(
                authorize(&Role::Moderator, &action),
                expected,
                "{}",
                action.name()
            );
        }
    }

    #[test]
    fn everyone_else_can_do_nothing() {
        let roles = [
            Role::Member,
            Role::Other("bouncer".into()),
            Role::Other("admin ".into()),
        ];
        for role in roles {
            for action in all_actions() {
                assert!(!authorize(&role, &action), "{role} {}", action.name());
            }
        }
    }

    #[test]
    fn closures_as_hooks() {
        let group = GroupId::new("abc").unwrap();
        let only_admins = |_: &GroupId, role: &Role, _: &Action| *role == Role::Admin;

        let action = Action::RemoveMember {
            members: vec![identity(3)],
        };
        assert!(DefaultRoles.allow(&group, &Role::Moderator, &action));
        assert!(!only_admins.allow(&group, &Role::Moderator, &action));
        assert!(only_admins.allow(&group, &Role::Admin, &action));
    }
}
