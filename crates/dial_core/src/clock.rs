//! Wall-clock sampling.
//!
//! The face never stores the time of day: every frame asks a [`WallClock`]
//! for a fresh [`ClockTime`] and derives the hand angles from it.  The host
//! normally plugs in [`LocalClock`]; tests and the headless simulator use
//! [`FixedClock`] so frames are reproducible.
//!
//! # Example
//! ```rust,ignore
//! use dial_core::clock::{ClockTime, FixedClock, WallClock};
//!
//! let clock = FixedClock::new(ClockTime::from_hms(10, 8, 42)?);
//! assert_eq!(clock.now().minute, 8);
//! ```

use std::cell::Cell;
use std::time::Duration;

use chrono::Timelike;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("time of day out of range: {hour:02}:{minute:02}:{second:02}")]
    OutOfRange { hour: u32, minute: u32, second: u32 },
}

/// A snapshot of the local time of day.
///
/// Fields are guaranteed in range: `hour < 24`, `minute < 60`,
/// `second < 60`, `nanos < 1_000_000_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Sub-second fraction.  Not used by the hand mapping, kept for hosts
    /// that want to schedule against the next whole second.
    pub nanos: u32,
}

impl ClockTime {
    /// Builds a time of day from hour/minute/second.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Result<Self, ClockError> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return Err(ClockError::OutOfRange { hour, minute, second });
        }
        Ok(Self { hour, minute, second, nanos: 0 })
    }

    /// Converts any `chrono` time-of-day value.
    ///
    /// A leap second (chrono reports it as `second == 59` with
    /// `nanos >= 1e9`) is folded into `59.999…`.
    pub fn from_chrono<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second().min(59),
            nanos: t.nanosecond().min(999_999_999),
        }
    }

    /// Seconds elapsed since midnight, ignoring the sub-second part.
    pub fn seconds_since_midnight(&self) -> u32 {
        self.hour * 3600 + self.minute * 60 + self.second
    }

    /// Time left until the next multiple of `period` counted from
    /// midnight, e.g. the next whole minute for a 60 s period.  Never zero:
    /// exactly on a boundary the answer is a full period.
    pub fn until_next_boundary(&self, period: Duration) -> Duration {
        let period = period.as_secs().max(1);
        let into = u64::from(self.seconds_since_midnight()) % period;
        Duration::from_secs(period - into) - Duration::from_nanos(u64::from(self.nanos))
    }
}

/// Source of the current time of day.
pub trait WallClock {
    fn now(&self) -> ClockTime;
}

/// Reads the system clock in the local time zone on every call, so a time
/// zone change is picked up by the next frame without any notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl WallClock for LocalClock {
    fn now(&self) -> ClockTime {
        ClockTime::from_chrono(&chrono::Local::now())
    }
}

/// A clock that reports whatever it was last set to.
#[derive(Debug, Default)]
pub struct FixedClock {
    time: Cell<ClockTime>,
}

impl FixedClock {
    pub fn new(time: ClockTime) -> Self {
        Self { time: Cell::new(time) }
    }

    /// Moves the clock forward by `secs`, wrapping at midnight.
    pub fn advance(&self, secs: u32) {
        let total = (self.time.get().seconds_since_midnight() + secs) % 86_400;
        self.time.set(ClockTime {
            hour: total / 3600,
            minute: (total / 60) % 60,
            second: total % 60,
            nanos: 0,
        });
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> ClockTime {
        self.time.get()
    }
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now(&self) -> ClockTime {
        (**self).now()
    }
}

impl<C: WallClock + ?Sized> WallClock for std::rc::Rc<C> {
    fn now(&self) -> ClockTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn rejects_out_of_range() {
        assert!(ClockTime::from_hms(23, 59, 59).is_ok());
        assert_eq!(
            ClockTime::from_hms(24, 0, 0),
            Err(ClockError::OutOfRange { hour: 24, minute: 0, second: 0 })
        );
        assert!(ClockTime::from_hms(0, 60, 0).is_err());
        assert!(ClockTime::from_hms(0, 0, 60).is_err());
    }

    #[test]
    fn chrono_leap_second_is_folded() {
        let leap = NaiveTime::from_hms_milli_opt(23, 59, 59, 1_500).unwrap();
        let t = ClockTime::from_chrono(&leap);
        assert_eq!((t.hour, t.minute, t.second), (23, 59, 59));
        assert!(t.nanos < 1_000_000_000);
    }

    #[test]
    fn fixed_clock_wraps_at_midnight() {
        let clock = FixedClock::new(ClockTime::from_hms(23, 59, 30).unwrap());
        clock.advance(45);
        assert_eq!(clock.now(), ClockTime::from_hms(0, 0, 15).unwrap());
    }

    #[test]
    fn next_boundary() {
        let minute = Duration::from_secs(60);
        let mut t = ClockTime::from_hms(10, 0, 59).unwrap();
        t.nanos = 500_000_000;
        assert_eq!(t.until_next_boundary(minute), Duration::from_millis(500));

        let on_the_minute = ClockTime::from_hms(10, 1, 0).unwrap();
        assert_eq!(on_the_minute.until_next_boundary(minute), minute);
        assert_eq!(
            on_the_minute.until_next_boundary(Duration::ZERO),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn local_clock_is_in_range() {
        let t = LocalClock.now();
        assert!(t.hour < 24 && t.minute < 60 && t.second < 60);
    }
}
