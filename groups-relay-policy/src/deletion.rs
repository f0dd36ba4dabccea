// SPDX-License-Identifier: MIT OR Apache-2.0

//! Refinement of the events a deletion request is going to remove.
//!
//! When a moderator asks to delete events of a group, the storage layer first works out which
//! events the request targets (the "default outcome"). Before anything gets removed, that outcome
//! passes through a [`DeletionChain`] of overrides, each of which may refuse some of the
//! deletions.
//!
//! Overrides can only narrow an outcome. A candidate refused by one override never comes back,
//! and the chain drops any candidate an override tries to add.
use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;

use groups_relay_core::{Event, EventId, Timestamp};
use tracing::{debug, warn};

use crate::config::PolicyConfig;

/// An event proposed for deletion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeletionCandidate {
    pub id: EventId,

    /// Creation time of the event which would be deleted.
    pub created_at: Timestamp,
}

impl DeletionCandidate {
    pub fn new(id: EventId, created_at: Timestamp) -> Self {
        Self { id, created_at }
    }
}

impl From<&Event> for DeletionCandidate {
    fn from(event: &Event) -> Self {
        Self::new(event.id, event.created_at)
    }
}

/// A candidate which was kept from being deleted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefusedDeletion {
    pub candidate: DeletionCandidate,
    pub reason: String,
}

/// Candidates which are going to be deleted and those which were refused on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeletionOutcome {
    accepted: Vec<DeletionCandidate>,
    refused: Vec<RefusedDeletion>,
}

impl DeletionOutcome {
    /// Outcome accepting all given candidates. Duplicate ids are only kept once.
    pub fn new(candidates: impl IntoIterator<Item = DeletionCandidate>) -> Self {
        let mut seen = HashSet::new();
        let accepted = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.id))
            .collect();

        Self {
            accepted,
            refused: Vec::new(),
        }
    }

    /// Outcome which doesn't delete anything.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn accepted(&self) -> &[DeletionCandidate] {
        &self.accepted
    }

    pub fn accepted_ids(&self) -> impl Iterator<Item = EventId> + '_ {
        self.accepted.iter().map(|candidate| candidate.id)
    }

    pub fn refused(&self) -> &[RefusedDeletion] {
        &self.refused
    }

    /// Returns `true` if nothing is going to be deleted.
    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    /// Refuse deletion of every accepted candidate matching the predicate.
    pub fn refuse_where<F>(self, predicate: F, reason: &str) -> Self
    where
        F: FnMut(&DeletionCandidate) -> bool,
    {
        let DeletionOutcome {
            accepted,
            mut refused,
        } = self;

        let (refuse, accepted): (Vec<_>, Vec<_>) = accepted.into_iter().partition(predicate);
        refused.extend(refuse.into_iter().map(|candidate| RefusedDeletion {
            candidate,
            reason: reason.to_owned(),
        }));

        Self { accepted, refused }
    }

    /// Drop all accepted candidates which were not accepted in `previous` as well.
    ///
    /// Returns the number of dropped candidates.
    fn restrict_to(&mut self, previous: &DeletionOutcome) -> usize {
        let allowed: HashSet<EventId> = previous.accepted_ids().collect();
        let before = self.accepted.len();
        self.accepted.retain(|candidate| allowed.contains(&candidate.id));
        before - self.accepted.len()
    }

    /// Keep all refusals recorded in `previous`, followed by the ones added since.
    fn carry_refusals_from(&mut self, previous: &DeletionOutcome) {
        let known: HashSet<EventId> = previous
            .refused
            .iter()
            .map(|refused| refused.candidate.id)
            .collect();
        let added: Vec<RefusedDeletion> = self
            .refused
            .drain(..)
            .filter(|refused| !known.contains(&refused.candidate.id))
            .collect();

        self.refused = previous.refused.clone();
        self.refused.extend(added);
    }
}

/// A single step in the deletion chain.
pub trait DeletionOverride: Send + Sync {
    /// Name used when logging refused deletions.
    fn name(&self) -> &'static str;

    /// Return the outcome of `request` after applying this override.
    ///
    /// Implementations should only narrow the given outcome, for example with
    /// [`DeletionOutcome::refuse_where`].
    fn refine(&self, request: &Event, outcome: DeletionOutcome) -> DeletionOutcome;
}

/// Layer computing the default outcome of a deletion request, usually the storage engine.
pub trait DeletionPlanner {
    type Error: Error;

    fn plan(&self, request: &Event) -> Result<DeletionOutcome, Self::Error>;
}

impl<T: DeletionPlanner> DeletionPlanner for &T {
    type Error = T::Error;

    fn plan(&self, request: &Event) -> Result<DeletionOutcome, Self::Error> {
        (**self).plan(request)
    }
}

/// Refuses deletion of messages which are older than the retention period.
///
/// Age is measured against the creation time of the deletion request.
#[derive(Clone, Debug)]
pub struct BlockDeletesOfOldMessages {
    retention: Duration,
    reason: String,
}

impl BlockDeletesOfOldMessages {
    pub fn new(retention: Duration) -> Self {
        Self {
            retention,
            reason: format!("can't delete messages older than {}", describe(retention)),
        }
    }
}

impl DeletionOverride for BlockDeletesOfOldMessages {
    fn name(&self) -> &'static str {
        "block-deletes-of-old-messages"
    }

    fn refine(&self, request: &Event, outcome: DeletionOutcome) -> DeletionOutcome {
        let oldest = request.created_at.saturating_sub(self.retention);
        outcome.refuse_where(|candidate| candidate.created_at < oldest, &self.reason)
    }
}

fn describe(duration: Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        3600 => "1 hour".into(),
        secs if secs % 3600 == 0 => format!("{} hours", secs / 3600),
        60 => "1 minute".into(),
        secs if secs % 60 == 0 => format!("{} minutes", secs / 60),
        1 => "1 second".into(),
        secs => format!("{secs} seconds"),
    }
}

/// Ordered chain of deletion overrides, see module documentation.
#[derive(Default)]
pub struct DeletionChain {
    overrides: Vec<Box<dyn DeletionOverride>>,
}

impl DeletionChain {
    /// Chain without any overrides, it returns every outcome unchanged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard chain of the relay.
    pub fn from_config(config: &PolicyConfig) -> Self {
        Self::new().with(BlockDeletesOfOldMessages::new(config.deletion_retention()))
    }

    /// Append an override to the end of the chain.
    pub fn with(mut self, deletion_override: impl DeletionOverride + 'static) -> Self {
        self.overrides.push(Box::new(deletion_override));
        self
    }

    /// Run all overrides on the default outcome of a deletion request.
    ///
    /// Other events don't delete anything and get an empty outcome.
    pub fn refine(&self, request: &Event, outcome: DeletionOutcome) -> DeletionOutcome {
        if !request.kind.is_deletion_request() {
            debug!(id = %request.id, kind = %request.kind, "not a deletion request");
            return DeletionOutcome::empty();
        }

        self.overrides.iter().fold(outcome, |previous, deletion_override| {
            let mut next = deletion_override.refine(request, previous.clone());
            next.carry_refusals_from(&previous);

            let widened = next.restrict_to(&previous);
            if widened > 0 {
                warn!(
                    deletion_override = deletion_override.name(),
                    id = %request.id,
                    widened,
                    "override tried to add deletion candidates, ignoring them"
                );
            }

            for refused in next.refused.iter().skip(previous.refused.len()) {
                debug!(
                    deletion_override = deletion_override.name(),
                    id = %request.id,
                    target = %refused.candidate.id,
                    "refused deletion: {}",
                    refused.reason
                );
            }

            next
        })
    }

    /// Compute the default outcome of a deletion request with `planner` and refine it.
    ///
    /// Nothing gets deleted if the planner fails.
    pub fn resolve<P>(&self, planner: &P, request: &Event) -> DeletionOutcome
    where
        P: DeletionPlanner,
    {
        match planner.plan(request) {
            Ok(outcome) => self.refine(request, outcome),
            Err(err) => {
                warn!(id = %request.id, "planning deletion failed, deleting nothing: {err}");
                DeletionOutcome::empty()
            }
        }
    }

    /// Names of all overrides in the order they run.
    pub fn override_names(&self) -> Vec<&'static str> {
        self.overrides
            .iter()
            .map(|deletion_override| deletion_override.name())
            .collect()
    }
}

impl std::fmt::Debug for DeletionChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeletionChain")
            .field("overrides", &self.override_names())
            .finish()
    }
}
