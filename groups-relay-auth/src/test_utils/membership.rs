// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use groups_relay_core::{GroupId, PublicKey};
use thiserror::Error;

use crate::{GroupAccess, MembershipQuery, Role};

#[derive(Clone, Debug, Default)]
struct MemoryGroup {
    closed: bool,
    members: HashMap<PublicKey, Role>,
}

/// In-memory membership layer.
///
/// Cloned instances share the same state.
#[derive(Clone, Debug, Default)]
pub struct MemoryMembership {
    groups: Arc<RwLock<HashMap<GroupId, MemoryGroup>>>,
}

impl MemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a group, its creator becomes the first member holding the default creator role.
    pub fn create_group(&self, group: &GroupId, creator: PublicKey, closed: bool) {
        let mut groups = self.groups.write().expect("acquire write lock on groups");
        let mut members = HashMap::new();
        members.insert(creator, Role::group_creator_default());
        groups.insert(group.clone(), MemoryGroup { closed, members });
    }

    pub fn put_member(&self, group: &GroupId, member: PublicKey, role: Role) {
        let mut groups = self.groups.write().expect("acquire write lock on groups");
        if let Some(state) = groups.get_mut(group) {
            state.members.insert(member, role);
        }
    }

    pub fn remove_member(&self, group: &GroupId, member: &PublicKey) {
        let mut groups = self.groups.write().expect("acquire write lock on groups");
        if let Some(state) = groups.get_mut(group) {
            state.members.remove(member);
        }
    }
}

#[derive(Debug, Error)]
#[error("membership layer unavailable")]
pub struct MemoryMembershipError;

impl MembershipQuery for MemoryMembership {
    type Error = MemoryMembershipError;

    fn lookup(
        &self,
        group: &GroupId,
        member: &PublicKey,
    ) -> Result<Option<GroupAccess>, Self::Error> {
        let groups = self.groups.read().map_err(|_| MemoryMembershipError)?;
        Ok(groups.get(group).map(|state| GroupAccess {
            closed: state.closed,
            role: state.members.get(member).cloned(),
        }))
    }
}
