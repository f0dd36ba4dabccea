// SPDX-License-Identifier: MIT OR Apache-2.0

use std::time::Duration;

use groups_relay_core::Kind;
use serde::{Deserialize, Serialize};

/// Maximum number of elements a single tag may have.
pub const MAX_TAG_ELEMENTS: usize = 640;

/// Events may not be older than this, relative to the time they are received.
pub const MAX_PAST_DRIFT: Duration = Duration::from_secs(60);

/// Events may not be further in the future than this, relative to the time they are received.
pub const MAX_FUTURE_DRIFT: Duration = Duration::from_secs(30);

/// Messages older than this, relative to the deletion request, can't be deleted anymore.
pub const DELETION_RETENTION: Duration = Duration::from_secs(60 * 60 * 2);

/// Kinds accepted by the relay: group chat and threads, reactions, reposts, media, polls,
/// comments, long-form content, calendar events, highlights, group moderation, join and leave
/// requests and zaps.
///
/// Invites (kind 9009) are not accepted.
pub const ALLOWED_KINDS: [Kind; 29] = [
    Kind::REACTION,
    Kind::CHAT_MESSAGE,
    Kind::THREADED_REPLY,
    Kind::THREAD,
    Kind::THREAD_REPLY,
    Kind::GENERIC_REPOST,
    Kind::PICTURE,
    Kind::POLL_RESPONSE,
    Kind::POLL,
    Kind::COMMENT,
    Kind::LONG_FORM_ARTICLE,
    Kind::DATE_CALENDAR_EVENT,
    Kind::TIME_CALENDAR_EVENT,
    Kind::HIGHLIGHT,
    Kind::PUT_USER,
    Kind::REMOVE_USER,
    Kind::EDIT_METADATA,
    Kind::ADD_PERMISSION,
    Kind::REMOVE_PERMISSION,
    Kind::DELETE_EVENT,
    Kind::EDIT_GROUP_STATUS,
    Kind::CREATE_GROUP,
    Kind::DELETE_GROUP,
    Kind::JOIN_REQUEST,
    Kind::LEAVE_REQUEST,
    Kind::NUTZAP,
    Kind::ZAP_RECEIPT,
    Kind::VIDEO,
    Kind::SHORT_VIDEO,
];

/// Policy knobs of the admission pipeline and the deletion chain.
///
/// All fields have defaults, so a configuration file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Maximum number of elements in a single tag.
    pub max_tag_elements: usize,

    /// Kinds the relay accepts, everything else is rejected.
    pub allowed_kinds: Vec<Kind>,

    /// Also accept ephemeral kinds (20000 to 29999) which are not on the allow-list.
    pub allow_ephemeral: bool,

    /// Seconds an event may lie in the past.
    pub max_past_drift_secs: u64,

    /// Seconds an event may lie in the future.
    pub max_future_drift_secs: u64,

    /// Seconds after which messages can't be deleted anymore.
    pub deletion_retention_secs: u64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_tag_elements: MAX_TAG_ELEMENTS,
            allowed_kinds: ALLOWED_KINDS.to_vec(),
            allow_ephemeral: false,
            max_past_drift_secs: MAX_PAST_DRIFT.as_secs(),
            max_future_drift_secs: MAX_FUTURE_DRIFT.as_secs(),
            deletion_retention_secs: DELETION_RETENTION.as_secs(),
        }
    }
}

impl PolicyConfig {
    pub fn max_past_drift(&self) -> Duration {
        Duration::from_secs(self.max_past_drift_secs)
    }

    pub fn max_future_drift(&self) -> Duration {
        Duration::from_secs(self.max_future_drift_secs)
    }

    pub fn deletion_retention(&self) -> Duration {
        Duration::from_secs(self.deletion_retention_secs)
    }
}

/// Public information about the relay, announced to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayInfo {
    /// Domain under which the groups of this relay are addressed.
    pub domain: String,
    pub name: String,
    pub description: String,
    pub contact: String,
    pub icon: String,
}

impl Default for RelayInfo {
    fn default() -> Self {
        Self {
            domain: "groups.0xchat.com".into(),
            name: "0xchat groups relay".into(),
            description: String::new(),
            contact: String::new(),
            icon: String::new(),
        }
    }
}

/// Everything the policy layer needs to know about the relay it runs in.
///
/// Built once at startup and handed to the components by reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub relay: RelayInfo,
    pub policy: PolicyConfig,
}
