//! Scripted in-memory supervisor for host tests
//!
//! Inbound packets are queued up front, outbound packets are recorded.
//! Status bookkeeping follows the OS rule that exactly one status answers
//! each received packet.

use heapless::{Deque, Vec};

use crate::error::SystemError;
use crate::supervisor::{Supervisor, UxResponse};

/// Largest packet the mock stores
pub const MOCK_PACKET_SIZE: usize = 128;

/// Maximum number of scripted inbound packets
pub const MOCK_INBOUND_DEPTH: usize = 64;

/// Maximum number of recorded outbound packets
pub const MOCK_SENT_DEPTH: usize = 64;

/// Tags 0x60..=0x6F are statuses
const STATUS_TAG_MASK: u8 = 0xF0;
const STATUS_TAG: u8 = 0x60;

/// A raw packet as seen on the SE proxy HAL link
pub type MockPacket = Vec<u8, MOCK_PACKET_SIZE>;

/// In-memory [`Supervisor`]
#[derive(Debug, Clone)]
pub struct MockSupervisor {
    api_level: u32,
    inbound: Deque<MockPacket, MOCK_INBOUND_DEPTH>,
    sent: Vec<MockPacket, MOCK_SENT_DEPTH>,
    exits: Vec<u32, 8>,
    status_sent: bool,
    os_answers: bool,
    ux_replies: Deque<UxResponse, 16>,
    default_ux_reply: UxResponse,
    wake_ups: u32,
    rng_state: u8,
}

impl Default for MockSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSupervisor {
    /// Create a supervisor with an empty script
    ///
    /// Reports API level 8, and no status sent yet so the first loop
    /// iteration is a start event.
    pub fn new() -> Self {
        Self {
            api_level: 8,
            inbound: Deque::new(),
            sent: Vec::new(),
            exits: Vec::new(),
            status_sent: false,
            os_answers: false,
            ux_replies: Deque::new(),
            default_ux_reply: UxResponse::Ok,
            wake_ups: 0,
            rng_state: 0x5A,
        }
    }

    /// Set the API level the OS claims to support
    pub fn with_api_level(mut self, level: u32) -> Self {
        self.api_level = level;
        self
    }

    /// Pretend the OS already answered the pending turn
    pub fn with_status_sent(mut self, sent: bool) -> Self {
        self.status_sent = sent;
        self
    }

    /// Make the OS answer every turn itself
    pub fn with_os_answering(mut self, answers: bool) -> Self {
        self.os_answers = answers;
        self
    }

    /// Set the reply of `os_ux` once the scripted replies run out
    pub fn with_ux_reply(mut self, reply: UxResponse) -> Self {
        self.default_ux_reply = reply;
        self
    }

    /// Queue a one-shot `os_ux` reply
    pub fn push_ux_reply(&mut self, reply: UxResponse) {
        let _ = self.ux_replies.push_back(reply);
    }

    /// Queue a raw inbound packet
    ///
    /// Returns false if the packet or the queue is too large.
    pub fn push_packet(&mut self, bytes: &[u8]) -> bool {
        let Ok(packet) = MockPacket::from_slice(bytes) else {
            return false;
        };
        self.inbound.push_back(packet).is_ok()
    }

    /// Queue a button push event with the given button bits
    pub fn push_button(&mut self, buttons: u8) -> bool {
        self.push_packet(&[0x05, 0x00, 0x01, buttons << 1])
    }

    /// Queue a display processed event
    pub fn push_display_processed(&mut self) -> bool {
        self.push_packet(&[0x0D, 0x00, 0x00])
    }

    /// Queue a ticker event
    pub fn push_ticker(&mut self) -> bool {
        self.push_packet(&[0x0E, 0x00, 0x00])
    }

    /// Number of inbound packets still queued
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    /// Every packet sent so far, oldest first
    pub fn sent(&self) -> &[MockPacket] {
        &self.sent
    }

    /// Exit codes requested so far
    pub fn exits(&self) -> &[u32] {
        &self.exits
    }

    /// Whether the application asked to terminate
    pub fn exit_requested(&self) -> bool {
        !self.exits.is_empty()
    }

    /// Number of `os_ux` wake up calls
    pub fn wake_ups(&self) -> u32 {
        self.wake_ups
    }

    fn next_ux_reply(&mut self) -> UxResponse {
        self.ux_replies
            .pop_front()
            .unwrap_or(self.default_ux_reply)
    }
}

impl Supervisor for MockSupervisor {
    fn check_api_level(&mut self, level: u32) -> Result<(), SystemError> {
        if level > self.api_level {
            return Err(SystemError::NotSupported);
        }
        Ok(())
    }

    fn exit(&mut self, code: u32) {
        let _ = self.exits.push(code);
    }

    fn ux_event(&mut self) -> UxResponse {
        self.next_ux_reply()
    }

    fn ux_wake_up(&mut self) -> UxResponse {
        self.wake_ups += 1;
        self.next_ux_reply()
    }

    fn is_status_sent(&mut self) -> Result<bool, SystemError> {
        Ok(self.status_sent || self.os_answers)
    }

    fn seph_send(&mut self, packet: &[u8]) -> Result<(), SystemError> {
        if self.exit_requested() {
            return Err(SystemError::AppExit);
        }
        let is_status = packet
            .first()
            .is_some_and(|tag| tag & STATUS_TAG_MASK == STATUS_TAG);
        if is_status {
            if self.status_sent {
                return Err(SystemError::IoState);
            }
            self.status_sent = true;
        }
        let packet = MockPacket::from_slice(packet).map_err(|_| SystemError::IoOverflow)?;
        self.sent.push(packet).map_err(|_| SystemError::IoOverflow)
    }

    fn seph_recv(&mut self, buf: &mut [u8], _flags: u32) -> Result<usize, SystemError> {
        if self.exit_requested() {
            return Err(SystemError::AppExit);
        }
        if !self.status_sent && !self.os_answers {
            return Err(SystemError::IoState);
        }
        let packet = self.inbound.pop_front().ok_or(SystemError::AppExit)?;
        if packet.len() > buf.len() {
            return Err(SystemError::IoOverflow);
        }
        buf[..packet.len()].copy_from_slice(&packet);
        self.status_sent = false;
        Ok(packet.len())
    }

    fn random(&mut self, buf: &mut [u8]) -> Result<(), SystemError> {
        // xorshift8
        for byte in buf.iter_mut() {
            self.rng_state ^= self.rng_state << 3;
            self.rng_state ^= self.rng_state >> 5;
            self.rng_state ^= self.rng_state << 1;
            *byte = self.rng_state;
        }
        Ok(())
    }
}
