//! Supervisor call abstraction
//!
//! One method per syscall the application issues. Implementations are
//! expected to be cheap and non-blocking, except [`Supervisor::seph_recv`]
//! which waits for the next SE proxy HAL packet.

use crate::error::SystemError;

/// Reply of the OS UX syscall (`os_ux`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum UxResponse {
    /// The OS has nothing to draw, the app may render
    Continue = 0,
    /// The OS drew over the app screen, redraw from scratch
    Redraw = 0xB010_5055,
    /// The OS owns the screen right now
    Ignore = 0xB010_5044,
    Error = 0xB010_5033,
    Cancel = 0xB010_5022,
    Ok = 0xB010_5011,
}

impl UxResponse {
    /// Decode a raw syscall return value
    ///
    /// Unknown values are reported as [`UxResponse::Error`].
    pub fn from_u32(value: u32) -> Self {
        match value {
            0 => UxResponse::Continue,
            0xB010_5055 => UxResponse::Redraw,
            0xB010_5044 => UxResponse::Ignore,
            0xB010_5022 => UxResponse::Cancel,
            0xB010_5011 => UxResponse::Ok,
            _ => UxResponse::Error,
        }
    }

    /// Returns true if the app must not draw during this turn
    pub fn defers_drawing(&self) -> bool {
        matches!(self, UxResponse::Ignore | UxResponse::Continue)
    }
}

/// Secure-element OS services used by the application
pub trait Supervisor {
    /// Verify that the OS provides at least the given API level
    fn check_api_level(&mut self, level: u32) -> Result<(), SystemError>;

    /// Request process termination
    ///
    /// On the device this never returns. Host implementations record the
    /// request and refuse further I/O with [`SystemError::AppExit`].
    fn exit(&mut self, code: u32);

    /// Give the OS UX a chance to process the current event
    fn ux_event(&mut self) -> UxResponse;

    /// Wake the screen up before the app redraws it
    fn ux_wake_up(&mut self) -> UxResponse;

    /// Whether a status has been sent for the current SE proxy HAL turn
    fn is_status_sent(&mut self) -> Result<bool, SystemError>;

    /// Send one SE proxy HAL packet (command or status)
    fn seph_send(&mut self, packet: &[u8]) -> Result<(), SystemError>;

    /// Receive one SE proxy HAL packet into `buf`
    ///
    /// Returns the number of bytes written.
    fn seph_recv(&mut self, buf: &mut [u8], flags: u32) -> Result<usize, SystemError>;

    /// Fill `buf` with random bytes from the secure element
    fn random(&mut self, buf: &mut [u8]) -> Result<(), SystemError>;
}
