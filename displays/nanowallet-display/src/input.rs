//! Button input
//!
//! The OS reports the raw button state roughly every 100 ms while any
//! button is held, and once more with no bits set on release. The
//! [`ButtonTracker`] folds these reports into the masks screens react to.

use core::ops::{BitOr, BitOrAssign};

/// Button state and event flags passed to screen button handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(pub u32);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    pub const LEFT: ButtonMask = ButtonMask(1 << 0);
    pub const RIGHT: ButtonMask = ButtonMask(1 << 1);
    /// Set periodically while a button is held past the fast threshold
    pub const EVT_FAST: ButtonMask = ButtonMask(0x4000_0000);
    /// Set once when all buttons are released
    pub const EVT_RELEASED: ButtonMask = ButtonMask(0x8000_0000);

    /// Raw mask value
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if every bit of `other` is set
    pub const fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if this mask reports a release
    pub const fn is_released(self) -> bool {
        self.contains(Self::EVT_RELEASED)
    }

    const fn without(self, other: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 & !other.0)
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: ButtonMask) -> ButtonMask {
        ButtonMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonMask {
    fn bitor_assign(&mut self, rhs: ButtonMask) {
        self.0 |= rhs.0;
    }
}

/// One call to a screen button handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPress {
    pub mask: ButtonMask,
    /// Number of consecutive reports with the same buttons held
    pub counter: u32,
}

/// Default number of repeats before fast events start (~800 ms)
pub const FAST_THRESHOLD: u32 = 8;

/// Default period of fast events, in repeats (~300 ms)
pub const FAST_ACTION_PERIOD: u32 = 3;

/// Folds raw button reports into masks and repeat counters
#[derive(Debug, Clone)]
pub struct ButtonTracker {
    mask: ButtonMask,
    counter: u32,
    fast_threshold: u32,
    fast_period: u32,
}

impl Default for ButtonTracker {
    fn default() -> Self {
        Self::new(FAST_THRESHOLD, FAST_ACTION_PERIOD)
    }
}

impl ButtonTracker {
    /// Create a tracker with the given fast-repeat timing
    ///
    /// A zero period is treated as 1.
    pub fn new(fast_threshold: u32, fast_period: u32) -> Self {
        Self {
            mask: ButtonMask::NONE,
            counter: 0,
            fast_threshold,
            fast_period: fast_period.max(1),
        }
    }

    /// Buttons currently considered held
    pub fn held(&self) -> ButtonMask {
        self.mask
    }

    /// Process one raw report (`buttons` is the bitmask of held buttons)
    ///
    /// Buttons pressed together accumulate until all are released, so a
    /// left-then-right chord releases as `LEFT | RIGHT | EVT_RELEASED`.
    /// Once the hold passes the fast threshold, `EVT_FAST` is set every
    /// period and the final release is swallowed.
    pub fn push(&mut self, buttons: u8) -> ButtonPress {
        let new = ButtonMask(buttons as u32);

        if new == self.mask {
            self.counter = self.counter.saturating_add(1);
        }

        let mut mask = self.mask | new;
        let counter = self.counter;

        if new == ButtonMask::NONE {
            self.mask = ButtonMask::NONE;
            self.counter = 0;
            mask |= ButtonMask::EVT_RELEASED;
        } else {
            self.mask = mask;
        }

        if new != self.mask {
            self.counter = 0;
        }

        if counter >= self.fast_threshold {
            if counter % self.fast_period == 0 {
                mask |= ButtonMask::EVT_FAST;
            }
            mask = mask.without(ButtonMask::EVT_RELEASED);
        }

        ButtonPress { mask, counter }
    }

    /// Forget any held buttons
    pub fn reset(&mut self) {
        self.mask = ButtonMask::NONE;
        self.counter = 0;
    }
}
