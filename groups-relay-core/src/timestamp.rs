// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds, as used by the `created_at` field of events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Current system time.
    ///
    /// Only hosts should call this, everything inside the policy layer receives the ambient time
    /// as an argument.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_secs())
            .unwrap_or_default();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Moves the timestamp back by the given duration, stopping at the unix epoch.
    pub fn saturating_sub(self, duration: Duration) -> Self {
        Self(self.0.saturating_sub(duration.as_secs()))
    }

    /// Moves the timestamp forward by the given duration, stopping at `u64::MAX`.
    pub fn saturating_add(self, duration: Duration) -> Self {
        Self(self.0.saturating_add(duration.as_secs()))
    }
}

impl From<u64> for Timestamp {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Timestamp> for u64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Timestamp;

    #[test]
    fn saturating_arithmetic() {
        let timestamp = Timestamp::from_secs(100);
        assert_eq!(
            timestamp.saturating_sub(Duration::from_secs(60)),
            Timestamp::from_secs(40)
        );
        assert_eq!(
            timestamp.saturating_sub(Duration::from_secs(600)),
            Timestamp::from_secs(0)
        );
        assert_eq!(
            Timestamp::from_secs(u64::MAX).saturating_add(Duration::from_secs(30)),
            Timestamp::from_secs(u64::MAX)
        );
    }

    #[test]
    fn sub_second_durations_are_truncated() {
        let timestamp = Timestamp::from_secs(100);
        assert_eq!(
            timestamp.saturating_add(Duration::from_millis(1500)),
            Timestamp::from_secs(101)
        );
    }
}
