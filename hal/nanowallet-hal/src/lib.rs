//! Nanowallet Hardware Abstraction Layer
//!
//! The application never touches the secure element directly. Every
//! interaction with the OS goes through the [`Supervisor`] trait, which
//! mirrors the handful of supervisor calls the app needs. The device
//! implementation wraps the `svc` trampoline; host builds use
//! [`mock::MockSupervisor`] (feature `mock`).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (nanowallet-core)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nanowallet-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  device svc   │       │     mock      │
//! │  trampoline   │       │  supervisor   │
//! └───────────────┘       └───────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod error;
pub mod supervisor;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key types at crate root for convenience
pub use error::SystemError;
pub use supervisor::{Supervisor, UxResponse};
