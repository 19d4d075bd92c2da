//! Millisecond durations
//!
//! The UX runs on a 100 ms ticker, so millisecond resolution in a `u32`
//! covers every interval the application schedules (about 49 days).

use core::ops;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span of time in milliseconds
///
/// Operators saturate instead of overflowing; use the `checked_*` methods
/// where overflow must be detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Duration(u32);

impl Duration {
    pub const ZERO: Duration = Duration(0);

    pub const fn from_millis(millis: u32) -> Duration {
        Duration(millis)
    }

    pub const fn from_secs(secs: u32) -> Duration {
        Duration(secs.saturating_mul(1_000))
    }

    pub const fn as_millis(&self) -> u32 {
        self.0
    }

    pub const fn as_secs(&self) -> u32 {
        self.0 / 1_000
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, rhs: Duration) -> Option<Duration> {
        self.0.checked_add(rhs.0).map(Duration)
    }

    pub fn checked_sub(self, rhs: Duration) -> Option<Duration> {
        self.0.checked_sub(rhs.0).map(Duration)
    }

    pub fn checked_mul(self, rhs: u32) -> Option<Duration> {
        self.0.checked_mul(rhs).map(Duration)
    }

    pub fn checked_div(self, rhs: u32) -> Option<Duration> {
        self.0.checked_div(rhs).map(Duration)
    }
}

impl ops::Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_add(rhs.0))
    }
}

impl ops::AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = *self + rhs;
    }
}

impl ops::Sub for Duration {
    type Output = Duration;

    fn sub(self, rhs: Duration) -> Duration {
        Duration(self.0.saturating_sub(rhs.0))
    }
}

impl ops::SubAssign for Duration {
    fn sub_assign(&mut self, rhs: Duration) {
        *self = *self - rhs;
    }
}

impl ops::Mul<u32> for Duration {
    type Output = Duration;

    fn mul(self, rhs: u32) -> Duration {
        Duration(self.0.saturating_mul(rhs))
    }
}

impl ops::Mul<Duration> for u32 {
    type Output = Duration;

    fn mul(self, rhs: Duration) -> Duration {
        rhs * self
    }
}
