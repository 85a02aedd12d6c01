//! Time abstraction traits for platform-agnostic timing.
//!
//! The frame assembler only needs to measure how long a partial frame has
//! been idle, so these traits stay small. Wrap your HAL's millisecond counter
//! or `embassy_time::Instant` to implement them.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Counters that wrap (e.g. a 32-bit millisecond tick) should use
    /// wrapping subtraction here.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
