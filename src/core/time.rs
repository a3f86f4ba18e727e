//! Wall-clock access for the schedulers.
//!
//! The simulation never calls `Utc::now()` directly so that tests can freeze
//! or step time with [`ManualClock`].

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.current.lock() = at;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock();
        *current += by;
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.advance(Duration::minutes(minutes));
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

/// Whole minutes from `since` to `now`, floored. Zero when `now` is not after `since`.
pub fn whole_minutes_between(since: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let minutes = (now - since).num_minutes();
    if minutes <= 0 {
        0
    } else {
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_manual_clock_is_frozen_until_advanced() {
        let clock = ManualClock::new(noon());
        assert_eq!(clock.now(), clock.now());

        clock.advance_minutes(90);
        assert_eq!(clock.now(), noon() + Duration::minutes(90));

        clock.set(noon());
        assert_eq!(clock.now(), noon());
    }

    #[test]
    fn test_whole_minutes_floors_partial_minutes() {
        let later = noon() + Duration::seconds(299);
        assert_eq!(whole_minutes_between(noon(), later), 4);
        assert_eq!(whole_minutes_between(noon(), noon() + Duration::seconds(300)), 5);
    }

    #[test]
    fn test_whole_minutes_never_negative() {
        let earlier = noon() - Duration::hours(3);
        assert_eq!(whole_minutes_between(noon(), earlier), 0);
        assert_eq!(whole_minutes_between(noon(), noon()), 0);
    }
}
