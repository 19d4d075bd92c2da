//! Display model and screen traits for Nanowallet
//!
//! This crate provides:
//! - `Element` descriptors mirroring the OS BAGL component record
//! - Label scroll timing (`roundtrip_duration_ms`)
//! - `ButtonMask` and the `ButtonTracker` turning raw pushes into masks
//! - `ButtonAction` maps and the `Store` trait receiving screen actions
//! - The `Screen` trait implemented by every application screen
//!
//! # Architecture
//!
//! A screen is a fixed layout table plus two callbacks. The UX dispatcher
//! in `nanowallet-core` walks the table one element per display round
//! trip, passing each element through `Screen::prepro` before encoding it
//! as a screen display status. Button masks are routed to
//! `Screen::button`.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod action;
pub mod element;
pub mod input;
pub mod label;
pub mod screen;

// Re-export key types
pub use action::{ButtonAction, Store};
pub use element::{Color, Component, Element, ElementKind, Fill, Font, Glyph, ScrollMode};
pub use input::{ButtonMask, ButtonPress, ButtonTracker};
pub use label::roundtrip_duration_ms;
pub use screen::{
    LabelBuffer, Layout, Screen, UxTimer, LABEL_BUFFER_SIZE, LABEL_MAX_LEN, MAX_ELEMENTS,
};
