// SPDX-License-Identifier: MIT OR Apache-2.0

use groups_relay_auth::{Action, AllowAction, GroupAccess, MembershipQuery};
use groups_relay_core::{Event, GroupId, Kind};
use tracing::warn;

use crate::admission::{AdmissionContext, Validator};
use crate::reject::RejectReason;

/// Checks that the author of an event has access to the group it was published to.
///
/// Group-management events additionally need a role which grants the requested action, as decided
/// by the [`AllowAction`] hook. Join and leave requests only need the group to exist. Everything
/// else is accepted for open groups and restricted to members in closed ones.
#[derive(Debug)]
pub struct GroupAccessCheck<M, A> {
    membership: M,
    allow: A,
}

impl<M, A> GroupAccessCheck<M, A>
where
    M: MembershipQuery,
    A: AllowAction,
{
    pub fn new(membership: M, allow: A) -> Self {
        Self { membership, allow }
    }

    fn lookup(
        &self,
        group: &GroupId,
        event: &Event,
    ) -> Result<Option<GroupAccess>, RejectReason> {
        self.membership.lookup(group, &event.pubkey).map_err(|err| {
            warn!(
                %group,
                id = %event.id,
                "membership lookup failed, refusing event: {err}"
            );
            RejectReason::NotAMember
        })
    }

    fn check_action(
        &self,
        group: &GroupId,
        event: &Event,
        access: Option<GroupAccess>,
    ) -> Result<(), RejectReason> {
        let access = match access {
            Some(access) => access,
            // Creating a group which doesn't exist yet is always possible, the membership layer
            // will make the creator its admin.
            None if event.kind == Kind::CREATE_GROUP => return Ok(()),
            None => return Err(RejectReason::GroupNotFound),
        };

        let action = Action::from_event(event)?;
        let role = access.role.ok_or(RejectReason::NotAMember)?;

        if self.allow.allow(group, &role, &action) {
            Ok(())
        } else {
            Err(RejectReason::ActionNotPermitted(action.name()))
        }
    }
}

impl<M, A> Validator for GroupAccessCheck<M, A>
where
    M: MembershipQuery + Send + Sync,
    A: AllowAction + Send + Sync,
{
    fn name(&self) -> &'static str {
        "group-access"
    }

    fn validate(&self, event: &Event, _context: &AdmissionContext) -> Result<(), RejectReason> {
        let group = event.group_id().ok_or(RejectReason::GroupNotFound)?;
        let access = self.lookup(&group, event)?;

        if event.kind.is_moderation() {
            return self.check_action(&group, event, access);
        }

        let access = access.ok_or(RejectReason::GroupNotFound)?;

        if event.kind.is_membership_request() || !access.closed || access.is_member() {
            Ok(())
        } else {
            Err(RejectReason::NotAMember)
        }
    }
}
