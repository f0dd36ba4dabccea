// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a group, scoped to the relay hosting it.
///
/// Group ids are carried in the `h` tag of every event belonging to a group and may only contain
/// ASCII letters, digits, `-` and `_`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupId(String);

impl GroupId {
    pub fn new(value: &str) -> Result<Self, GroupIdError> {
        if value.is_empty() {
            return Err(GroupIdError::Empty);
        }

        if let Some(invalid) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(GroupIdError::InvalidCharacter(invalid));
        }

        Ok(Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for GroupId {
    type Err = GroupIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for GroupId {
    type Error = GroupIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<GroupId> for String {
    fn from(value: GroupId) -> Self {
        value.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GroupIdError {
    #[error("group id can't be empty")]
    Empty,

    #[error("group id contains invalid character '{0}'")]
    InvalidCharacter(char),
}

#[cfg(test)]
mod tests {
    use super::{GroupId, GroupIdError};

    #[test]
    fn valid_group_ids() {
        assert!(GroupId::new("pizza-lovers_42").is_ok());
        assert_eq!(GroupId::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn invalid_group_ids() {
        assert_eq!(GroupId::new(""), Err(GroupIdError::Empty));
        assert_eq!(
            GroupId::new("no spaces"),
            Err(GroupIdError::InvalidCharacter(' '))
        );
        assert_eq!(
            GroupId::new("relay.example'abc"),
            Err(GroupIdError::InvalidCharacter('.'))
        );
    }

    #[test]
    fn deserialize_rejects_invalid() {
        let result: Result<GroupId, _> = serde_json::from_str("\"bad/id\"");
        assert!(result.is_err());
    }
}
