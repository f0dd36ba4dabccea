// SPDX-License-Identifier: MIT OR Apache-2.0

#![cfg_attr(doctest, doc=include_str!("../README.md"))]

//! Role-based authorization of group-management actions.
//!
//! Every member of a group holds exactly one [`Role`]. Moderation events request an [`Action`]
//! and [`authorize`] decides, based on the role of the issuer, whether the action may be
//! performed.
//!
//! Membership itself is tracked elsewhere, this crate only reads it through the
//! [`MembershipQuery`] interface.
mod action;
mod authorizer;
mod membership;
mod role;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use action::{Action, ActionError, MemberRoles, MetadataChanges};
pub use authorizer::{AllowAction, DefaultRoles, authorize};
pub use membership::{GroupAccess, MembershipQuery};
pub use role::Role;
