//! Time source for game creation.

use time::{Duration, OffsetDateTime};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Drop sub-millisecond precision.
///
/// Game identifiers embed their creation instant; stores differ in how much
/// precision they keep, so identifiers are minted at millisecond precision.
pub fn truncate_to_millis(instant: OffsetDateTime) -> OffsetDateTime {
    let sub_millis = instant.nanosecond() % 1_000_000;
    instant - Duration::nanoseconds(i64::from(sub_millis))
}
