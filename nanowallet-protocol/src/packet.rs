//! Packet encoding and decoding for the SE proxy HAL link.
//!
//! Packet format:
//! - TAG (1 byte): event, command or status identifier
//! - LENGTH (2 bytes, big-endian): payload length
//! - PAYLOAD (0-125 bytes): tag-specific data

use heapless::Vec;

/// Size of the TAG + LENGTH header
pub const HEADER_SIZE: usize = 3;

/// Maximum complete packet size (the OS I/O buffer)
pub const MAX_PACKET_SIZE: usize = 128;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE - HEADER_SIZE;

/// Errors that can occur during packet parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Packet is shorter than its header announces
    Incomplete,
    /// Length field or payload contents do not match the tag
    InvalidPacket,
    /// Tag is not known to this side of the link
    UnknownTag(u8),
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Packet tag
    pub tag: u8,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Packet {
    /// Create a new packet with the given tag and payload
    pub fn new(tag: u8, payload: &[u8]) -> Result<Self, PacketError> {
        let payload = Vec::from_slice(payload).map_err(|_| PacketError::PayloadTooLarge)?;
        Ok(Self { tag, payload })
    }

    /// Create a packet with no payload
    pub fn empty(tag: u8) -> Self {
        Self {
            tag,
            payload: Vec::new(),
        }
    }

    /// Total encoded size of this packet
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len()
    }

    /// Encode this packet into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let len = self.encoded_len();
        if buffer.len() < len {
            return Err(PacketError::BufferTooSmall);
        }

        let length = self.payload.len() as u16;
        buffer[0] = self.tag;
        buffer[1..3].copy_from_slice(&length.to_be_bytes());
        buffer[3..len].copy_from_slice(&self.payload);

        Ok(len)
    }

    /// Encode this packet into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_PACKET_SIZE>, PacketError> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        let len = self.encode(&mut buffer)?;
        Vec::from_slice(&buffer[..len]).map_err(|_| PacketError::BufferTooSmall)
    }

    /// Decode one complete packet
    ///
    /// The OS delivers whole packets, so the buffer must hold exactly one.
    pub fn decode(bytes: &[u8]) -> Result<Self, PacketError> {
        let mut parser = PacketParser::new();
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(packet) = parser.feed(byte)? {
                if i + 1 != bytes.len() {
                    return Err(PacketError::InvalidPacket);
                }
                return Ok(packet);
            }
        }
        Err(PacketError::Incomplete)
    }
}

/// Incremental packet parser
///
/// Fed one byte at a time, for links that deliver a byte stream rather
/// than whole packets. After an error the parser starts over with the
/// next byte as a new tag.
#[derive(Debug, Clone)]
pub struct PacketParser {
    state: ParseState,
    tag: u8,
    length_high: u8,
    expected_length: usize,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    WaitingForTag,
    WaitingForLengthHigh,
    WaitingForLengthLow,
    ReadingPayload,
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PacketParser {
    /// Create a new packet parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForTag,
            tag: 0,
            length_high: 0,
            expected_length: 0,
            buffer: Vec::new(),
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForTag;
        self.tag = 0;
        self.length_high = 0;
        self.expected_length = 0;
        self.buffer.clear();
    }

    /// Feed a single byte
    ///
    /// Returns `Ok(Some(packet))` when a packet completes, `Ok(None)` when
    /// more bytes are needed.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Packet>, PacketError> {
        match self.state {
            ParseState::WaitingForTag => {
                self.tag = byte;
                self.state = ParseState::WaitingForLengthHigh;
                Ok(None)
            }
            ParseState::WaitingForLengthHigh => {
                self.length_high = byte;
                self.state = ParseState::WaitingForLengthLow;
                Ok(None)
            }
            ParseState::WaitingForLengthLow => {
                let length = u16::from_be_bytes([self.length_high, byte]) as usize;
                if length > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(PacketError::PayloadTooLarge);
                }
                if length == 0 {
                    let packet = Packet::empty(self.tag);
                    self.reset();
                    return Ok(Some(packet));
                }
                self.expected_length = length;
                self.buffer.clear();
                self.state = ParseState::ReadingPayload;
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Cannot overflow, the length was checked above
                let _ = self.buffer.push(byte);
                if self.buffer.len() < self.expected_length {
                    return Ok(None);
                }
                let packet = Packet {
                    tag: self.tag,
                    payload: self.buffer.clone(),
                };
                self.reset();
                Ok(Some(packet))
            }
        }
    }
}
