// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ordered chain of validators deciding whether an inbound event is accepted.
//!
//! The chain is composed of a baseline supplied by the relay framework (signature and structure
//! checks) and the domain validators of this relay, which are spliced into the baseline at
//! [`DOMAIN_VALIDATORS_POSITION`]. Validators run in order and the first rejection wins.
//!
//! Domain validators always run in this order:
//!
//! 1. [`PreventLargeTags`]
//! 2. [`RestrictToSpecifiedKinds`]
//! 3. [`PreventTimestampsInThePast`]
//! 4. [`PreventTimestampsInTheFuture`]
//! 5. [`GroupAccessCheck`]
mod group_access;
mod validators;

use groups_relay_auth::{AllowAction, MembershipQuery};
use groups_relay_core::{Event, Timestamp};
use tracing::debug;

use crate::config::PolicyConfig;
use crate::reject::RejectReason;

pub use group_access::GroupAccessCheck;
pub use validators::{
    EventVerifier, PreventLargeTags, PreventTimestampsInTheFuture, PreventTimestampsInThePast,
    RequireGroupTag, RestrictToSpecifiedKinds, SkipVerification, VerifySignature,
};

/// Index in the baseline chain at which the domain validators get inserted.
///
/// Signature verification and the group tag check run before them.
pub const DOMAIN_VALIDATORS_POSITION: usize = 2;

/// Ambient information available to every validator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdmissionContext {
    /// Time at which the event was received.
    pub now: Timestamp,
}

/// A single check in the admission chain.
///
/// Validators must be pure: given the same event and context they always decide the same way.
pub trait Validator: Send + Sync {
    /// Name used when logging rejections.
    fn name(&self) -> &'static str;

    fn validate(&self, event: &Event, context: &AdmissionContext) -> Result<(), RejectReason>;
}

/// Admission pipeline, see module documentation.
pub struct Admission {
    validators: Vec<Box<dyn Validator>>,
}

impl Admission {
    pub fn builder() -> AdmissionBuilder {
        AdmissionBuilder::default()
    }

    /// Standard pipeline of the relay.
    ///
    /// The baseline verifies signatures and requires a group tag, the domain validators are
    /// configured from `config`.
    pub fn from_config<V, M, A>(config: &PolicyConfig, verifier: V, membership: M, allow: A) -> Self
    where
        V: EventVerifier + Send + Sync + 'static,
        M: MembershipQuery + Send + Sync + 'static,
        A: AllowAction + Send + Sync + 'static,
    {
        Self::builder()
            .baseline(VerifySignature::new(verifier))
            .baseline(RequireGroupTag)
            .domain(PreventLargeTags::new(config.max_tag_elements))
            .domain(
                RestrictToSpecifiedKinds::new(config.allowed_kinds.iter().copied())
                    .allow_ephemeral(config.allow_ephemeral),
            )
            .domain(PreventTimestampsInThePast::new(config.max_past_drift()))
            .domain(PreventTimestampsInTheFuture::new(config.max_future_drift()))
            .domain(GroupAccessCheck::new(membership, allow))
            .build()
    }

    /// Run all validators against an event which was received at `now`.
    pub fn admit(&self, event: &Event, now: Timestamp) -> Result<(), RejectReason> {
        let context = AdmissionContext { now };

        for validator in &self.validators {
            if let Err(reason) = validator.validate(event, &context) {
                debug!(
                    validator = validator.name(),
                    id = %event.id,
                    kind = %event.kind,
                    author = %event.pubkey.fmt_short(),
                    "rejected event: {reason}"
                );
                return Err(reason);
            }
        }

        Ok(())
    }

    /// Names of all validators in the order they run.
    pub fn validator_names(&self) -> Vec<&'static str> {
        self.validators
            .iter()
            .map(|validator| validator.name())
            .collect()
    }
}

impl std::fmt::Debug for Admission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Admission")
            .field("validators", &self.validator_names())
            .finish()
    }
}

/// Assembles an [`Admission`] chain from baseline and domain validators.
#[derive(Default)]
pub struct AdmissionBuilder {
    baseline: Vec<Box<dyn Validator>>,
    domain: Vec<Box<dyn Validator>>,
}

impl AdmissionBuilder {
    /// Append a validator to the baseline chain.
    pub fn baseline(mut self, validator: impl Validator + 'static) -> Self {
        self.baseline.push(Box::new(validator));
        self
    }

    /// Append a validator to the domain chain.
    pub fn domain(mut self, validator: impl Validator + 'static) -> Self {
        self.domain.push(Box::new(validator));
        self
    }

    /// Splice the domain validators into the baseline at [`DOMAIN_VALIDATORS_POSITION`].
    ///
    /// If the baseline is shorter than that, domain validators run after all of it.
    pub fn build(self) -> Admission {
        let AdmissionBuilder {
            mut baseline,
            domain,
        } = self;

        let position = DOMAIN_VALIDATORS_POSITION.min(baseline.len());
        let rest = baseline.split_off(position);
        baseline.extend(domain);
        baseline.extend(rest);

        Admission {
            validators: baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;
    use groups_relay_auth::test_utils::{EventBuilder, NOW};
    use groups_relay_core::{Event, Kind};

    use super::{Admission, AdmissionContext, Validator};
    use crate::reject::RejectReason;

    struct Named(&'static str);

    impl Validator for Named {
        fn name(&self) -> &'static str {
            self.0
        }

        fn validate(
            &self,
            _event: &Event,
            _context: &AdmissionContext,
        ) -> Result<(), RejectReason> {
            Ok(())
        }
    }

    struct Reject(RejectReason, Arc<AtomicUsize>);

    impl Validator for Reject {
        fn name(&self) -> &'static str {
            "reject"
        }

        fn validate(
            &self,
            _event: &Event,
            _context: &AdmissionContext,
        ) -> Result<(), RejectReason> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Err(self.0.clone())
        }
    }

    #[test]
    fn domain_validators_are_spliced_into_baseline() {
        let admission = Admission::builder()
            .baseline(Named("first"))
            .baseline(Named("second"))
            .baseline(Named("third"))
            .domain(Named("domain-a"))
            .domain(Named("domain-b"))
            .build();

        assert_eq!(
            admission.validator_names(),
            vec!["first", "second", "domain-a", "domain-b", "third"]
        );
    }

    #[test]
    fn short_baseline() {
        let admission = Admission::builder()
            .baseline(Named("first"))
            .domain(Named("domain"))
            .build();
        assert_eq!(admission.validator_names(), vec!["first", "domain"]);
    }

    #[test]
    fn first_rejection_wins() {
        let first_calls = Arc::new(AtomicUsize::new(0));
        let second_calls = Arc::new(AtomicUsize::new(0));

        let admission = Admission::builder()
            .domain(Reject(RejectReason::TimestampTooOld, first_calls.clone()))
            .domain(Reject(RejectReason::TimestampTooNew, second_calls.clone()))
            .build();

        let event = EventBuilder::new(Kind::CHAT_MESSAGE).build();
        assert_matches!(
            admission.admit(&event, NOW),
            Err(RejectReason::TimestampTooOld)
        );
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_chain_admits() {
        let admission = Admission::builder().build();
        let event = EventBuilder::new(Kind::TEXT_NOTE).build();
        assert!(admission.admit(&event, NOW).is_ok());
    }
}
