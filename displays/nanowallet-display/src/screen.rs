//! Screen trait and per-screen state
//!
//! A screen exposes its layout table and reacts to two callbacks. The
//! dispatcher owns the [`UxTimer`] and hands it to the preprocessor, so
//! screens never keep timing state of their own.

use heapless::{String, Vec};
use nanowallet_hal::Supervisor;

use crate::element::Element;
use crate::input::ButtonMask;

/// Maximum number of elements in a layout table
pub const MAX_ELEMENTS: usize = 16;

/// Size of the OS label buffer in bytes, terminator included
pub const LABEL_BUFFER_SIZE: usize = 50;

/// Longest label text in bytes
pub const LABEL_MAX_LEN: usize = LABEL_BUFFER_SIZE - 1;

/// Elements of a screen, in drawing order
pub type Layout<'a> = Vec<Element<'a>, MAX_ELEMENTS>;

/// Owned text shown by a dynamic label
///
/// Rewritten when the owning screen is activated. Holds at most
/// [`LABEL_MAX_LEN`] bytes so the text still fits the OS buffer with its
/// terminator; longer text is cut at the last character that fits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelBuffer {
    text: String<LABEL_MAX_LEN>,
}

impl LabelBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            text: String::new(),
        }
    }

    /// Replace the content
    ///
    /// Returns false if the text had to be truncated.
    pub fn set(&mut self, text: &str) -> bool {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                return false;
            }
        }
        true
    }

    /// Current content
    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Refresh interval a preprocessor may request
///
/// When non-zero, the dispatcher counts it down on every ticker event and
/// redraws the whole screen once it elapses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UxTimer {
    interval_ms: u32,
}

impl UxTimer {
    /// Request a redraw after `ms` milliseconds
    pub fn set_interval(&mut self, ms: u32) {
        self.interval_ms = ms;
    }

    /// Remaining time before the redraw, 0 if none is scheduled
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Cancel the scheduled redraw
    pub fn clear(&mut self) {
        self.interval_ms = 0;
    }

    /// Advance by one tick
    ///
    /// Returns true when a scheduled interval elapses on this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.interval_ms == 0 {
            return false;
        }
        self.interval_ms = self.interval_ms.saturating_sub(elapsed_ms);
        self.interval_ms == 0
    }
}

/// A displayable screen
pub trait Screen {
    /// Layout table, in drawing order
    fn elements(&self) -> Layout<'_>;

    /// Called for each element right before it is sent
    ///
    /// Return the element to draw (possibly modified), or `None` to skip it.
    fn prepro<'e>(&self, element: Element<'e>, _timer: &mut UxTimer) -> Option<Element<'e>> {
        Some(element)
    }

    /// Called for each button mask
    ///
    /// `counter` is the number of consecutive reports with the same
    /// buttons held. The return value is reserved and is 0 for all
    /// current screens.
    fn button<S: Supervisor>(&mut self, mask: ButtonMask, counter: u32, supervisor: &mut S) -> u32;
}
