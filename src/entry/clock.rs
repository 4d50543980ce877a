//! Process-wide monotonic millisecond clock for entry timestamps.
//!
//! Every timestamp handed out is strictly greater than the previous one,
//! even when the wall clock stalls within a millisecond or steps backwards.
//! Timestamps read from a loaded container are fed back through `observe`
//! so later edits always sort after them.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Latest instant the clock will hand out: 9999-12-31T23:59:59.999Z.
/// Loaded timestamps beyond it are rejected.
pub const MAX_MILLIS: i64 = 253_402_300_799_999;

/// Last issued (or observed) timestamp in epoch milliseconds.
static LAST_ISSUED: AtomicI64 = AtomicI64::new(i64::MIN);

/// Return the current instant at millisecond precision, strictly after
/// every instant previously issued or observed in this process.
///
/// Saturates at [`MAX_MILLIS`]; once there, repeated calls return it.
pub fn now() -> DateTime<Utc> {
    let wall = Utc::now().timestamp_millis();
    let previous = LAST_ISSUED
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
            Some(next_after(last, wall))
        })
        .unwrap_or_else(|last| last);

    from_millis(next_after(previous, wall))
}

/// Record an externally supplied timestamp so later `now()` calls exceed it.
pub fn observe(instant: DateTime<Utc>) {
    LAST_ISSUED.fetch_max(instant.timestamp_millis().min(MAX_MILLIS), Ordering::AcqRel);
}

fn next_after(last: i64, wall: i64) -> i64 {
    wall.max(last.saturating_add(1)).min(MAX_MILLIS)
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Whether `instant` lies within the range the clock can issue.
pub(crate) fn in_range(instant: DateTime<Utc>) -> bool {
    instant.timestamp_millis() <= MAX_MILLIS
}
