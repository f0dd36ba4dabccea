// SPDX-License-Identifier: MIT OR Apache-2.0

use groups_relay_auth::ActionError;
use groups_relay_core::Kind;
use thiserror::Error;

/// Reasons for refusing an event.
///
/// These are policy decisions, not faults: the submitter learns why the event was refused and no
/// rejection is ever retried by the relay. The messages follow the machine-readable prefixes
/// Nostr relays use in `OK` responses.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RejectReason {
    #[error("invalid: signature verification failed")]
    InvalidSignature,

    #[error("invalid: tag with {len} elements exceeds the maximum of {max}")]
    OversizedTag { len: usize, max: usize },

    #[error("blocked: kind {0} is not allowed")]
    KindNotAllowed(Kind),

    #[error("invalid: event too old")]
    TimestampTooOld,

    #[error("invalid: event too much in the future")]
    TimestampTooNew,

    #[error("invalid: group not found")]
    GroupNotFound,

    #[error("restricted: not a member of this group")]
    NotAMember,

    #[error("restricted: insufficient permissions to {0}")]
    ActionNotPermitted(&'static str),

    #[error("invalid: {0}")]
    MalformedAction(#[from] ActionError),
}

impl RejectReason {
    /// Stable identifier of the rejection reason.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::InvalidSignature => "invalid-signature",
            RejectReason::OversizedTag { .. } => "oversized-tag",
            RejectReason::KindNotAllowed(_) => "kind-not-allowed",
            RejectReason::TimestampTooOld => "timestamp-too-old",
            RejectReason::TimestampTooNew => "timestamp-too-new",
            RejectReason::GroupNotFound => "group-not-found",
            RejectReason::NotAMember => "not-a-member",
            RejectReason::ActionNotPermitted(_) => "action-not-permitted",
            RejectReason::MalformedAction(_) => "malformed-action",
        }
    }
}

#[cfg(test)]
mod tests {
    use groups_relay_auth::ActionError;
    use groups_relay_core::Kind;

    use super::RejectReason;

    #[test]
    fn messages() {
        assert_eq!(
            RejectReason::KindNotAllowed(Kind::TEXT_NOTE).to_string(),
            "blocked: kind 1 is not allowed"
        );
        assert_eq!(
            RejectReason::ActionNotPermitted("delete-event").to_string(),
            "restricted: insufficient permissions to delete-event"
        );
        assert_eq!(
            RejectReason::from(ActionError::MissingTag("p")).to_string(),
            "invalid: missing \"p\" tag"
        );
    }

    #[test]
    fn codes() {
        assert_eq!(RejectReason::NotAMember.code(), "not-a-member");
        assert_eq!(
            RejectReason::OversizedTag { len: 641, max: 640 }.code(),
            "oversized-tag"
        );
    }
}
