// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg_attr(doctest, doc=include_str!("../README.md"))]

//! Data-types for events exchanged with a relay hosting chat groups.
//!
//! Events follow the Nostr data model: every event is signed by its author, carries a `kind`
//! classifying its purpose, a creation timestamp and a list of tags. Events belonging to a group
//! carry the group's id in an `h` tag.
//!
//! This crate does not verify signatures or derive ids, it only offers typed access to the fields
//! the policy layer needs to make decisions.
pub mod event;
pub mod group;
pub mod identity;
pub mod kind;
mod serde;
pub mod timestamp;

pub use event::{Event, GROUP_TAG, Tag};
pub use group::{GroupId, GroupIdError};
pub use identity::{EventId, IdError, PublicKey, Signature};
pub use kind::Kind;
pub use timestamp::Timestamp;
