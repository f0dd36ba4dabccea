// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities.
mod event;
mod membership;

use groups_relay_core::{PublicKey, Timestamp};

pub use event::EventBuilder;
pub use membership::{MemoryMembership, MemoryMembershipError};

/// Fixed point in time tests use as "now".
pub const NOW: Timestamp = Timestamp::from_secs(1_700_000_000);

/// Deterministic identity derived from a single byte.
pub fn identity(seed: u8) -> PublicKey {
    PublicKey::from_bytes([seed; 32])
}

pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}
