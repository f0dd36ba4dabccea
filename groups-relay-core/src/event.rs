// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::group::GroupId;
use crate::identity::{EventId, PublicKey, Signature};
use crate::kind::Kind;
use crate::timestamp::Timestamp;

/// Key of the tag carrying the id of the group an event belongs to.
pub const GROUP_TAG: &str = "h";

/// Sequence of strings attached to an event, the first element is the tag's key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(Vec<String>);

impl Tag {
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(elements.into_iter().map(Into::into).collect())
    }

    /// First element of the tag.
    pub fn key(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Second element of the tag.
    pub fn value(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// All elements after the key and the value.
    pub fn rest(&self) -> &[String] {
        self.0.get(2..).unwrap_or_default()
    }

    /// Number of elements, including the key.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Tag {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Signed record received by the relay.
///
/// Events are immutable once received, signature and id are assumed to have been checked by
/// whoever hands the event to the policy layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub pubkey: PublicKey,
    pub created_at: Timestamp,
    pub kind: Kind,
    pub tags: Vec<Tag>,
    pub content: String,
    pub sig: Signature,
}

impl Event {
    /// All tags with the given key, in order of appearance.
    pub fn tags_by_key<'a, 'k>(
        &'a self,
        key: &'k str,
    ) -> impl Iterator<Item = &'a Tag> + use<'a, 'k> {
        self.tags.iter().filter(move |tag| tag.key() == Some(key))
    }

    /// Value of the first tag with the given key.
    pub fn tag_value(&self, key: &str) -> Option<&str> {
        self.tags_by_key(key).find_map(Tag::value)
    }

    /// Id of the group this event is addressed to.
    ///
    /// Returns `None` if the `h` tag is missing or does not hold a valid group id.
    pub fn group_id(&self) -> Option<GroupId> {
        self.tag_value(GROUP_TAG)
            .and_then(|value| GroupId::new(value).ok())
    }
}
