//! SE proxy HAL protocol
//!
//! This crate defines the packet exchange between the application and the
//! secure-element OS. The OS forwards hardware events (buttons, ticker,
//! display completion) and the application answers every event with
//! exactly one status packet.
//!
//! # Protocol Overview
//!
//! All packets share the same header:
//! ```text
//! ┌──────┬─────────────┬─────────────┐
//! │ TAG  │ LENGTH (BE) │ PAYLOAD     │
//! │ 1B   │ 2B          │ 0–125B      │
//! └──────┴─────────────┴─────────────┘
//! ```
//!
//! Tags below 0x40 are events, 0x60..=0x6F are statuses.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod events;
pub mod packet;
pub mod status;

pub use events::SeEvent;
pub use packet::{Packet, PacketError, PacketParser, MAX_PACKET_SIZE, MAX_PAYLOAD_SIZE};
pub use status::{ComponentHeader, DisplayBody, Status, COMPONENT_HEADER_SIZE};
