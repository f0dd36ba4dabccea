// SPDX-License-Identifier: MIT OR Apache-2.0

//! Check a Nostr event against the admission policy of a group relay.
//!
//! The event is read as JSON from a file or stdin. Its author gets added to an in-memory group
//! with the given role before the event is checked.
//!
//! ```text
//! cargo run --example check_event -- --role moderator --closed event.json
//! ```
use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use groups_relay_auth::test_utils::{MemoryMembership, identity};
use groups_relay_auth::{DefaultRoles, Role};
use groups_relay_core::{Event, EventId, Timestamp};
use groups_relay_policy::admission::SkipVerification;
use groups_relay_policy::deletion::DeletionCandidate;
use groups_relay_policy::{Admission, Config, DeletionChain, DeletionOutcome};
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub fn setup_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .ok();
}

#[derive(Parser)]
struct Args {
    /// Path to the event, reads from stdin if not given.
    #[arg(value_name = "EVENT")]
    event: Option<PathBuf>,

    /// Role of the event's author in the group (admin, moderator, member or any custom name).
    #[arg(short = 'r', long, value_name = "ROLE")]
    role: Option<String>,

    /// Only members may post to the group.
    #[arg(short = 'c', long, action)]
    closed: bool,

    /// Time the event was received at as unix timestamp, defaults to the current time.
    #[arg(short = 'n', long, value_name = "SECONDS")]
    now: Option<u64>,

    /// Path to a JSON configuration file.
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

fn read_event(path: Option<&PathBuf>) -> Result<Event> {
    let json = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read event from {}", path.display()))?,
        None => {
            let mut json = String::new();
            std::io::stdin()
                .read_to_string(&mut json)
                .context("could not read event from stdin")?;
            json
        }
    };

    serde_json::from_str(&json).context("invalid event")
}

fn main() -> Result<()> {
    setup_logging();

    let args = Args::parse();

    let config: Config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("could not read config from {}", path.display()))?;
            serde_json::from_str(&json).context("invalid config")?
        }
        None => Config::default(),
    };

    let event = read_event(args.event.as_ref())?;
    let Some(group) = event.group_id() else {
        bail!("event does not carry a group id in its \"h\" tag");
    };

    // The group is owned by someone else, so the author's role is exactly the one given.
    let membership = MemoryMembership::new();
    membership.create_group(&group, identity(0), args.closed);
    if let Some(role) = &args.role {
        membership.put_member(&group, event.pubkey, Role::from_name(role));
    }

    info!(
        relay = %config.relay.name,
        domain = %config.relay.domain,
        %group,
        "checking event"
    );

    let now = args.now.map(Timestamp::from_secs).unwrap_or_else(Timestamp::now);
    let admission = Admission::from_config(
        &config.policy,
        SkipVerification,
        membership,
        DefaultRoles,
    );

    match admission.admit(&event, now) {
        Ok(()) => println!("accepted {}", event.id),
        Err(reason) => {
            println!("rejected {} ({}): {reason}", event.id, reason.code());
            return Ok(());
        }
    }

    if event.kind.is_deletion_request() {
        // Without a store, every target counts as created together with the request.
        let candidates = event
            .tags_by_key("e")
            .filter_map(|tag| tag.value()?.parse::<EventId>().ok())
            .map(|id| DeletionCandidate::new(id, event.created_at));
        let outcome = DeletionChain::from_config(&config.policy)
            .refine(&event, DeletionOutcome::new(candidates));

        for id in outcome.accepted_ids() {
            println!("deletes {id}");
        }
        for refused in outcome.refused() {
            println!("keeps {}: {}", refused.candidate.id, refused.reason);
        }
    }

    Ok(())
}
