//! UX configuration
//!
//! Timing and layout constants of the UX, with the firmware defaults.
//! A configuration can be provisioned as postcard-serialized binary data;
//! anything unreadable falls back to the defaults.

use heapless::String;
use nanowallet_display::LABEL_MAX_LEN;

use crate::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Current configuration format version
pub const CONFIG_VERSION: u8 = 1;

/// Text shown by the address screen on idle
pub const DEFAULT_IDLE_LABEL: &str = "WORLD!";

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Deserialization failed
    Deserialize,
    /// Serialization failed (buffer too small)
    Serialize,
    /// Config version mismatch
    VersionMismatch { found: u8 },
    /// A value is out of range
    Invalid,
}

/// UX timing and layout configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UxConfig {
    /// Format version
    pub version: u8,
    /// Minimum OS API level the app requires
    pub api_level: u32,
    /// Time between two ticker events
    pub ticker_period: Duration,
    /// Lower bound of the label refresh interval
    pub min_refresh: Duration,
    /// Pause added after a label scroll round trip
    pub refresh_margin: Duration,
    /// Average glyph width used to estimate label widths, in pixels
    pub average_char_width: u32,
    /// Button repeats before fast events start
    pub fast_threshold: u32,
    /// Button repeats between two fast events
    pub fast_action_period: u32,
    /// Text written to the address label on idle
    pub idle_label: String<LABEL_MAX_LEN>,
}

impl Default for UxConfig {
    fn default() -> Self {
        let mut idle_label = String::new();
        let _ = idle_label.push_str(DEFAULT_IDLE_LABEL);
        Self {
            version: CONFIG_VERSION,
            api_level: 8,
            ticker_period: Duration::from_millis(100),
            min_refresh: Duration::from_millis(3000),
            refresh_margin: Duration::from_millis(1000),
            average_char_width: 7,
            fast_threshold: 8,
            fast_action_period: 3,
            idle_label,
        }
    }
}

impl UxConfig {
    /// Check version and ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != CONFIG_VERSION {
            return Err(ConfigError::VersionMismatch {
                found: self.version,
            });
        }
        if self.ticker_period.is_zero() || self.average_char_width == 0 {
            return Err(ConfigError::Invalid);
        }
        if self.fast_action_period == 0 {
            return Err(ConfigError::Invalid);
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl UxConfig {
    /// Load a configuration from postcard binary data
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: UxConfig =
            postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize into `buf`, returning the number of bytes written
    pub fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ConfigError> {
        postcard::to_slice(self, buf)
            .map(|used| used.len())
            .map_err(|_| ConfigError::Serialize)
    }

    /// Load provisioned data, falling back to the defaults
    pub fn load_or_default(bytes: Option<&[u8]>) -> Self {
        let Some(bytes) = bytes else {
            #[cfg(feature = "defmt")]
            defmt::debug!("No UX config provisioned, using defaults");
            return Self::default();
        };

        match Self::from_bytes(bytes) {
            Ok(config) => {
                #[cfg(feature = "defmt")]
                defmt::info!("Loaded UX config ({} bytes)", bytes.len());
                config
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Invalid UX config: {:?}, using defaults", _e);
                Self::default()
            }
        }
    }
}
