// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg_attr(doctest, doc=include_str!("../README.md"))]

//! Policies deciding which events a relay hosting chat groups accepts and which events a deletion
//! request actually removes.
//!
//! Every inbound event passes the [`Admission`](admission::Admission) pipeline, an ordered chain
//! of validators checking its signature, size, kind, timestamp and finally whether its author has
//! access to the group it was published to. Deletion requests which got admitted are then
//! resolved into a [`DeletionOutcome`](deletion::DeletionOutcome) and refined by the
//! [`DeletionChain`](deletion::DeletionChain).
//!
//! Both chains hold no state of their own. Group membership is read through
//! [`MembershipQuery`](groups_relay_auth::MembershipQuery) and the current time is passed in by
//! the host, so the same inputs always lead to the same decision.
pub mod admission;
pub mod config;
pub mod deletion;
mod reject;

pub use admission::{Admission, AdmissionBuilder};
pub use config::{Config, PolicyConfig, RelayInfo};
pub use deletion::{DeletionChain, DeletionOutcome};
pub use reject::RejectReason;
