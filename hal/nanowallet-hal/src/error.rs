//! OS exception codes
//!
//! A supervisor call either returns a value or unwinds with one of these
//! codes. They are the only error vocabulary the OS speaks.

/// Exception raised by the OS during a supervisor call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum SystemError {
    Exception = 1,
    InvalidParameter = 2,
    Overflow = 3,
    /// Syscall answered with an unexpected return id
    Security = 4,
    InvalidCrc = 5,
    InvalidChecksum = 6,
    InvalidCounter = 7,
    NotSupported = 8,
    InvalidState = 9,
    Timeout = 10,
    Pic = 11,
    /// The application has been asked to terminate
    AppExit = 12,
    IoOverflow = 13,
    IoHeader = 14,
    /// SE proxy HAL exchange out of sequence (e.g. two statuses in one turn)
    IoState = 15,
    IoReset = 16,
    CxPort = 17,
    System = 18,
}

impl SystemError {
    /// Decode an exception code
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(SystemError::Exception),
            2 => Some(SystemError::InvalidParameter),
            3 => Some(SystemError::Overflow),
            4 => Some(SystemError::Security),
            5 => Some(SystemError::InvalidCrc),
            6 => Some(SystemError::InvalidChecksum),
            7 => Some(SystemError::InvalidCounter),
            8 => Some(SystemError::NotSupported),
            9 => Some(SystemError::InvalidState),
            10 => Some(SystemError::Timeout),
            11 => Some(SystemError::Pic),
            12 => Some(SystemError::AppExit),
            13 => Some(SystemError::IoOverflow),
            14 => Some(SystemError::IoHeader),
            15 => Some(SystemError::IoState),
            16 => Some(SystemError::IoReset),
            17 => Some(SystemError::CxPort),
            18 => Some(SystemError::System),
            _ => None,
        }
    }

    /// Exception code as raised by the OS
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}
