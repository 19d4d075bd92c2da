//! Events forwarded by the OS to the application

use crate::packet::{Packet, PacketError};

// Wire format tags
pub const TAG_BUTTON_PUSH: u8 = 0x05;
pub const TAG_DISPLAY_PROCESSED: u8 = 0x0D;
pub const TAG_TICKER: u8 = 0x0E;

/// Event received from the SE proxy HAL link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SeEvent {
    /// First loop iteration, before the OS has sent anything
    ///
    /// Never on the wire.
    StartLoop,
    /// Button state changed or is still held (sent every ~100 ms)
    ButtonPush {
        /// Raw flags byte, button bits start at bit 1
        flags: u8,
    },
    /// The last display status has been drawn
    DisplayProcessed,
    /// Periodic tick (every ~100 ms)
    Ticker,
}

impl SeEvent {
    /// Parse an event from a packet
    pub fn from_packet(packet: &Packet) -> Result<Self, PacketError> {
        match packet.tag {
            TAG_BUTTON_PUSH => match packet.payload.as_slice() {
                [flags] => Ok(SeEvent::ButtonPush { flags: *flags }),
                _ => Err(PacketError::InvalidPacket),
            },
            TAG_DISPLAY_PROCESSED => Self::expect_empty(packet, SeEvent::DisplayProcessed),
            TAG_TICKER => Self::expect_empty(packet, SeEvent::Ticker),
            tag => Err(PacketError::UnknownTag(tag)),
        }
    }

    /// Parse an event straight from received bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PacketError> {
        Self::from_packet(&Packet::decode(bytes)?)
    }

    /// Encode this event into a packet (for testing or simulation)
    ///
    /// [`SeEvent::StartLoop`] has no wire form.
    pub fn to_packet(&self) -> Option<Packet> {
        match self {
            SeEvent::StartLoop => None,
            SeEvent::ButtonPush { flags } => Packet::new(TAG_BUTTON_PUSH, &[*flags]).ok(),
            SeEvent::DisplayProcessed => Some(Packet::empty(TAG_DISPLAY_PROCESSED)),
            SeEvent::Ticker => Some(Packet::empty(TAG_TICKER)),
        }
    }

    /// Pressed button bits of a button push event
    pub fn buttons(&self) -> Option<u8> {
        match self {
            SeEvent::ButtonPush { flags } => Some(flags >> 1),
            _ => None,
        }
    }

    fn expect_empty(packet: &Packet, event: SeEvent) -> Result<Self, PacketError> {
        if packet.payload.is_empty() {
            Ok(event)
        } else {
            Err(PacketError::InvalidPacket)
        }
    }
}
