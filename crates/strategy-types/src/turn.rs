//! Turn Numbers
//!
//! Turns are plain signed integers so sentinel values can live alongside
//! real turn numbers, the same way catalog data expresses them.

/// A simulated turn number.
pub type Turn = i32;

/// `turn_adopted` value of a strategy that is not adopted.
pub const NEVER: Turn = -1;

/// `recheck_interval_turns` value meaning "never re-check once adopted".
///
/// Any interval `<= 0` is treated the same way.
pub const NO_RECHECK: i32 = -1;

/// Returns true if `interval` schedules periodic re-checks.
pub fn is_periodic(interval: i32) -> bool {
    interval > 0
}

/// Number of turns elapsed since `since`, or `None` for the [`NEVER`] sentinel.
pub fn turns_since(current: Turn, since: Turn) -> Option<i32> {
    if since == NEVER {
        None
    } else {
        Some(current - since)
    }
}
