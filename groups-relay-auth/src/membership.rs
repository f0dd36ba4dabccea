// SPDX-License-Identifier: MIT OR Apache-2.0

use std::error::Error;
use std::sync::Arc;

use groups_relay_core::{GroupId, PublicKey};

use crate::Role;

/// What an identity may do inside an existing group, as seen by the membership layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupAccess {
    /// Only members can write ordinary content to closed groups.
    pub closed: bool,

    /// Role the identity currently holds, `None` if it is not a member.
    pub role: Option<Role>,
}

impl GroupAccess {
    pub fn is_member(&self) -> bool {
        self.role.is_some()
    }
}

/// Read-only interface to the layer keeping track of groups and the roles of their members.
pub trait MembershipQuery {
    type Error: Error;

    /// Look up the given identity in a group.
    ///
    /// Returns `None` if no such group exists.
    fn lookup(
        &self,
        group: &GroupId,
        member: &PublicKey,
    ) -> Result<Option<GroupAccess>, Self::Error>;
}

impl<T: MembershipQuery> MembershipQuery for &T {
    type Error = T::Error;

    fn lookup(
        &self,
        group: &GroupId,
        member: &PublicKey,
    ) -> Result<Option<GroupAccess>, Self::Error> {
        (**self).lookup(group, member)
    }
}

impl<T: MembershipQuery> MembershipQuery for Arc<T> {
    type Error = T::Error;

    fn lookup(
        &self,
        group: &GroupId,
        member: &PublicKey,
    ) -> Result<Option<GroupAccess>, Self::Error> {
        self.as_ref().lookup(group, member)
    }
}
