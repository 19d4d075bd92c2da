//! Status packets sent by the application
//!
//! Every received event is answered by exactly one status. A general
//! status just acknowledges the event; a screen display status carries
//! one UI element for the OS to draw.

use heapless::Vec;

use crate::packet::{Packet, PacketError, MAX_PAYLOAD_SIZE};

// Status tags
pub const TAG_GENERAL_STATUS: u8 = 0x60;
pub const TAG_SCREEN_DISPLAY_STATUS: u8 = 0x65;

/// Size of the serialized component record
pub const COMPONENT_HEADER_SIZE: usize = 28;

/// Geometry and styling record shared by every drawable element
///
/// Multi-byte fields are little-endian on the wire, matching the OS
/// in-memory layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComponentHeader {
    pub type_id: u8,
    pub user_id: u8,
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
    /// Stroke width, or scroll delay for labels
    pub stroke: u8,
    pub radius: u8,
    pub fill: u8,
    pub foreground_color: u32,
    pub background_color: u32,
    pub font_id: u16,
    /// Icon id, or scroll speed for labels
    pub icon_id: u8,
}

impl ComponentHeader {
    /// Serialize to the 28-byte wire record
    pub fn to_bytes(&self) -> [u8; COMPONENT_HEADER_SIZE] {
        let mut hdr = [0u8; COMPONENT_HEADER_SIZE];
        hdr[0] = self.type_id;
        hdr[1] = self.user_id;
        hdr[2..4].copy_from_slice(&self.x.to_le_bytes());
        hdr[4..6].copy_from_slice(&self.y.to_le_bytes());
        hdr[6..8].copy_from_slice(&self.width.to_le_bytes());
        hdr[8..10].copy_from_slice(&self.height.to_le_bytes());
        hdr[10] = self.stroke;
        hdr[11] = self.radius;
        hdr[12] = self.fill;
        // 13..16: alignment gap
        hdr[16..20].copy_from_slice(&self.foreground_color.to_le_bytes());
        hdr[20..24].copy_from_slice(&self.background_color.to_le_bytes());
        hdr[24..26].copy_from_slice(&self.font_id.to_le_bytes());
        hdr[26] = self.icon_id;
        // 27: alignment gap
        hdr
    }
}

/// Data following the component record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayBody<'a> {
    /// Shapes and system icons
    None,
    /// Label text
    Text(&'a str),
    /// Application-provided bitmap icon
    Bitmap {
        bits_per_pixel: u8,
        colors: &'a [u32],
        bitmap: &'a [u8],
    },
}

/// Status sent in answer to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status<'a> {
    /// Acknowledge the event, nothing to draw
    General,
    /// Draw one element
    ScreenDisplay {
        header: ComponentHeader,
        body: DisplayBody<'a>,
    },
}

impl<'a> Status<'a> {
    /// Encode this status into a packet
    pub fn to_packet(&self) -> Result<Packet, PacketError> {
        match self {
            // Payload: [last command status (2B)]
            Status::General => Packet::new(TAG_GENERAL_STATUS, &[0x00, 0x00]),
            Status::ScreenDisplay { header, body } => {
                let mut payload = Vec::<u8, MAX_PAYLOAD_SIZE>::new();
                payload
                    .extend_from_slice(&header.to_bytes())
                    .map_err(|_| PacketError::PayloadTooLarge)?;

                match body {
                    DisplayBody::None => {}
                    DisplayBody::Text(text) => payload
                        .extend_from_slice(text.as_bytes())
                        .map_err(|_| PacketError::PayloadTooLarge)?,
                    DisplayBody::Bitmap {
                        bits_per_pixel,
                        colors,
                        bitmap,
                    } => {
                        payload
                            .push(*bits_per_pixel)
                            .map_err(|_| PacketError::PayloadTooLarge)?;
                        for color in colors.iter() {
                            payload
                                .extend_from_slice(&color.to_le_bytes())
                                .map_err(|_| PacketError::PayloadTooLarge)?;
                        }
                        payload
                            .extend_from_slice(bitmap)
                            .map_err(|_| PacketError::PayloadTooLarge)?;
                    }
                }

                Packet::new(TAG_SCREEN_DISPLAY_STATUS, &payload)
            }
        }
    }
}
