// SPDX-License-Identifier: MIT OR Apache-2.0

use groups_relay_core::{
    Event, EventId, GROUP_TAG, GroupId, Kind, PublicKey, Signature, Tag, Timestamp,
};

use super::{NOW, identity};

/// Builds unsigned events with random ids for tests.
#[derive(Clone, Debug)]
pub struct EventBuilder {
    id: Option<EventId>,
    pubkey: PublicKey,
    created_at: Timestamp,
    kind: Kind,
    tags: Vec<Tag>,
    content: String,
}

impl EventBuilder {
    pub fn new(kind: Kind) -> Self {
        Self {
            id: None,
            pubkey: identity(0),
            created_at: NOW,
            kind,
            tags: Vec::new(),
            content: String::new(),
        }
    }

    pub fn id(mut self, id: EventId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn author(mut self, pubkey: PublicKey) -> Self {
        self.pubkey = pubkey;
        self
    }

    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn group(self, group: &GroupId) -> Self {
        self.tag([GROUP_TAG, group.as_str()])
    }

    pub fn tag<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.push(Tag::new(elements));
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = content.to_owned();
        self
    }

    pub fn build(self) -> Event {
        Event {
            id: self
                .id
                .unwrap_or_else(|| EventId::from_bytes(rand::random())),
            pubkey: self.pubkey,
            created_at: self.created_at,
            kind: self.kind,
            tags: self.tags,
            content: self.content,
            sig: Signature::from_bytes([0; 64]),
        }
    }
}
