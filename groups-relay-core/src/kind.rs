// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Integer classifying the purpose of an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kind(u16);

/// Kinds reserved for group moderation actions issued by group members.
pub const MODERATION_KINDS: RangeInclusive<u16> = 9000..=9020;

impl Kind {
    pub const TEXT_NOTE: Kind = Kind(1);
    pub const DELETION: Kind = Kind(5);
    pub const REACTION: Kind = Kind(7);
    pub const CHAT_MESSAGE: Kind = Kind(9);
    pub const THREADED_REPLY: Kind = Kind(10);
    pub const THREAD: Kind = Kind(11);
    pub const THREAD_REPLY: Kind = Kind(12);
    pub const GENERIC_REPOST: Kind = Kind(16);
    pub const PICTURE: Kind = Kind(20);
    pub const POLL_RESPONSE: Kind = Kind(1018);
    pub const POLL: Kind = Kind(1068);
    pub const COMMENT: Kind = Kind(1111);
    pub const HIGHLIGHT: Kind = Kind(9802);
    pub const NUTZAP: Kind = Kind(9321);
    pub const ZAP_RECEIPT: Kind = Kind(9735);
    pub const LONG_FORM_ARTICLE: Kind = Kind(30023);
    pub const DATE_CALENDAR_EVENT: Kind = Kind(31922);
    pub const TIME_CALENDAR_EVENT: Kind = Kind(31923);
    pub const VIDEO: Kind = Kind(34235);
    pub const SHORT_VIDEO: Kind = Kind(34236);

    pub const PUT_USER: Kind = Kind(9000);
    pub const REMOVE_USER: Kind = Kind(9001);
    pub const EDIT_METADATA: Kind = Kind(9002);
    pub const ADD_PERMISSION: Kind = Kind(9003);
    pub const REMOVE_PERMISSION: Kind = Kind(9004);
    pub const DELETE_EVENT: Kind = Kind(9005);
    pub const EDIT_GROUP_STATUS: Kind = Kind(9006);
    pub const CREATE_GROUP: Kind = Kind(9007);
    pub const DELETE_GROUP: Kind = Kind(9008);
    pub const CREATE_INVITE: Kind = Kind(9009);

    pub const JOIN_REQUEST: Kind = Kind(9021);
    pub const LEAVE_REQUEST: Kind = Kind(9022);

    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns `true` if this kind requests a group-management action.
    pub fn is_moderation(&self) -> bool {
        MODERATION_KINDS.contains(&self.0)
    }

    /// Returns `true` if this kind asks the relay to delete other events of a group.
    pub fn is_deletion_request(&self) -> bool {
        *self == Kind::DELETE_EVENT
    }

    /// Returns `true` for requests to join or leave a group, which are sent by identities which
    /// are not (or no longer want to be) members.
    pub fn is_membership_request(&self) -> bool {
        *self == Kind::JOIN_REQUEST || *self == Kind::LEAVE_REQUEST
    }
}

impl From<u16> for Kind {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Kind;

    #[test]
    fn moderation_range() {
        assert!(Kind::PUT_USER.is_moderation());
        assert!(Kind::CREATE_INVITE.is_moderation());
        assert!(!Kind::CHAT_MESSAGE.is_moderation());
        assert!(!Kind::JOIN_REQUEST.is_moderation());
        assert!(Kind::JOIN_REQUEST.is_membership_request());
        assert!(Kind::DELETE_EVENT.is_deletion_request());
        assert!(!Kind::DELETION.is_deletion_request());
    }
}
