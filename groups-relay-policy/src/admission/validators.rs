// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::time::Duration;

use groups_relay_core::{Event, Kind};

use crate::admission::{AdmissionContext, Validator};
use crate::reject::RejectReason;

/// Kinds of events relays don't store.
const EPHEMERAL_KINDS: RangeInclusive<u16> = 20000..=29999;

/// Checks the signature of an event against its author.
pub trait EventVerifier {
    fn verify(&self, event: &Event) -> bool;
}

/// Verifier for hosts which already checked signatures before handing events over.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipVerification;

impl EventVerifier for SkipVerification {
    fn verify(&self, _event: &Event) -> bool {
        true
    }
}

/// Rejects events whose signature does not verify.
#[derive(Debug)]
pub struct VerifySignature<V> {
    verifier: V,
}

impl<V> VerifySignature<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }
}

impl<V> Validator for VerifySignature<V>
where
    V: EventVerifier + Send + Sync,
{
    fn name(&self) -> &'static str {
        "verify-signature"
    }

    fn validate(&self, event: &Event, _context: &AdmissionContext) -> Result<(), RejectReason> {
        if self.verifier.verify(event) {
            Ok(())
        } else {
            Err(RejectReason::InvalidSignature)
        }
    }
}

/// Rejects events which don't carry a valid group id in their `h` tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireGroupTag;

impl Validator for RequireGroupTag {
    fn name(&self) -> &'static str {
        "require-group-tag"
    }

    fn validate(&self, event: &Event, _context: &AdmissionContext) -> Result<(), RejectReason> {
        match event.group_id() {
            Some(_) => Ok(()),
            None => Err(RejectReason::GroupNotFound),
        }
    }
}

/// Rejects events containing a tag with more than the given number of elements.
#[derive(Clone, Copy, Debug)]
pub struct PreventLargeTags {
    max_elements: usize,
}

impl PreventLargeTags {
    pub fn new(max_elements: usize) -> Self {
        Self { max_elements }
    }
}

impl Validator for PreventLargeTags {
    fn name(&self) -> &'static str {
        "prevent-large-tags"
    }

    fn validate(&self, event: &Event, _context: &AdmissionContext) -> Result<(), RejectReason> {
        match event.tags.iter().find(|tag| tag.len() > self.max_elements) {
            Some(tag) => Err(RejectReason::OversizedTag {
                len: tag.len(),
                max: self.max_elements,
            }),
            None => Ok(()),
        }
    }
}

/// Rejects events of every kind which is not on the allow-list.
#[derive(Clone, Debug)]
pub struct RestrictToSpecifiedKinds {
    kinds: BTreeSet<Kind>,
    allow_ephemeral: bool,
}

impl RestrictToSpecifiedKinds {
    pub fn new(kinds: impl IntoIterator<Item = Kind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
            allow_ephemeral: false,
        }
    }

    /// Also let ephemeral kinds through, even when they are not on the list.
    pub fn allow_ephemeral(mut self, allow: bool) -> Self {
        self.allow_ephemeral = allow;
        self
    }
}

impl Validator for RestrictToSpecifiedKinds {
    fn name(&self) -> &'static str {
        "restrict-to-specified-kinds"
    }

    fn validate(&self, event: &Event, _context: &AdmissionContext) -> Result<(), RejectReason> {
        if self.allow_ephemeral && EPHEMERAL_KINDS.contains(&event.kind.as_u16()) {
            return Ok(());
        }

        if self.kinds.contains(&event.kind) {
            Ok(())
        } else {
            Err(RejectReason::KindNotAllowed(event.kind))
        }
    }
}

/// Rejects events created more than the given duration before they were received.
#[derive(Clone, Copy, Debug)]
pub struct PreventTimestampsInThePast {
    threshold: Duration,
}

impl PreventTimestampsInThePast {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }
}

impl Validator for PreventTimestampsInThePast {
    fn name(&self) -> &'static str {
        "prevent-timestamps-in-the-past"
    }

    fn validate(&self, event: &Event, context: &AdmissionContext) -> Result<(), RejectReason> {
        if event.created_at < context.now.saturating_sub(self.threshold) {
            Err(RejectReason::TimestampTooOld)
        } else {
            Ok(())
        }
    }
}

/// Rejects events created more than the given duration after they were received.
#[derive(Clone, Copy, Debug)]
pub struct PreventTimestampsInTheFuture {
    threshold: Duration,
}

impl PreventTimestampsInTheFuture {
    pub fn new(threshold: Duration) -> Self {
        Self { threshold }
    }
}

impl Validator for PreventTimestampsInTheFuture {
    fn name(&self) -> &'static str {
        "prevent-timestamps-in-the-future"
    }

    fn validate(&self, event: &Event, context: &AdmissionContext) -> Result<(), RejectReason> {
        if event.created_at > context.now.saturating_add(self.threshold) {
            Err(RejectReason::TimestampTooNew)
        } else {
            Ok(())
        }
    }
}
