//! Application logic for the Nanowallet address display
//!
//! Everything here talks to the OS through the [`Supervisor`] trait, so
//! the whole application runs on the host against a mock supervisor:
//!
//! - SE proxy HAL message loop (`seph`)
//! - UX dispatcher walking a screen's layout (`ux`)
//! - The address screen (`screens`)
//! - UX configuration and its postcard encoding (`config`)
//!
//! [`Supervisor`]: nanowallet_hal::Supervisor

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod app;
pub mod config;
pub mod screens;
pub mod seph;
pub mod time;
pub mod ux;

pub use app::{run, AppError};
pub use config::{ConfigError, UxConfig};
pub use screens::AddressScreen;
pub use seph::{Channel, MessageLoop, SephError};
pub use time::Duration;
pub use ux::Ux;
