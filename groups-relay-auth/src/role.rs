// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Capability level held by exactly one identity within one group.
///
/// The relay knows three built-in roles. Every other role name a group might use is represented
/// by `Other` and carries no group-management capability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Unrestricted, always the initial role of a group's creator.
    Admin,

    /// Restricted to removing members, deleting events and changing member roles.
    Moderator,

    /// No management capability.
    Member,

    /// Any role which is not built-in.
    Other(String),
}

impl Role {
    /// Built-in roles, in order of decreasing capability.
    pub const DEFAULT_ROLES: [Role; 3] = [Role::Admin, Role::Moderator, Role::Member];

    /// Role assigned to the creator of a new group.
    pub const fn group_creator_default() -> Self {
        Role::Admin
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "admin" => Role::Admin,
            "moderator" => Role::Moderator,
            "member" => Role::Member,
            other => Role::Other(other.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Moderator => "moderator",
            Role::Member => "member",
            Role::Other(name) => name,
        }
    }

    /// Human-readable description, as announced in the group's role list.
    pub fn description(&self) -> &str {
        match self {
            Role::Admin => "the group's max top admin",
            Role::Moderator => "the group's noble servant",
            Role::Member => "townsman",
            Role::Other(_) => "",
        }
    }

    /// Role is one of the built-in ones.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from_name(&value)
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.name().to_owned()
    }
}
