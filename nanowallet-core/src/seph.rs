//! SE proxy HAL message loop
//!
//! Each received event opens a turn that must be closed by exactly one
//! status. A [`Channel`] represents that turn: sending a status through it
//! closes the turn, and dropping it unanswered sends a general status on
//! the application's behalf.

use nanowallet_hal::{Supervisor, SystemError};
use nanowallet_protocol::{Packet, PacketError, SeEvent, Status, MAX_PACKET_SIZE};

/// Errors raised while exchanging packets with the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SephError {
    /// Supervisor call failed
    System(SystemError),
    /// Packet could not be encoded
    Packet(PacketError),
    /// A status has already been sent for this turn
    StatusAlreadySent,
}

impl From<SystemError> for SephError {
    fn from(e: SystemError) -> Self {
        SephError::System(e)
    }
}

impl From<PacketError> for SephError {
    fn from(e: PacketError) -> Self {
        SephError::Packet(e)
    }
}

impl SephError {
    /// Returns true if the OS refused I/O because the app is exiting
    pub fn is_app_exit(&self) -> bool {
        matches!(self, SephError::System(SystemError::AppExit))
    }
}

fn send_packet<S: Supervisor>(supervisor: &mut S, packet: &Packet) -> Result<(), SephError> {
    let mut buf = [0u8; MAX_PACKET_SIZE];
    let len = packet.encode(&mut buf)?;
    supervisor.seph_send(&buf[..len])?;
    Ok(())
}

/// Source of event turns
#[derive(Debug)]
pub struct MessageLoop {
    running: bool,
}

impl MessageLoop {
    /// Create the loop after checking the OS API level
    pub fn new<S: Supervisor>(supervisor: &mut S, api_level: u32) -> Result<Self, SystemError> {
        supervisor.check_api_level(api_level)?;
        Ok(Self { running: false })
    }

    /// Wait for the next event
    ///
    /// The first call yields [`SeEvent::StartLoop`] if the OS is still
    /// waiting for the application's first status. Packets that do not
    /// decode are acknowledged and skipped.
    pub fn next<'s, S: Supervisor>(
        &mut self,
        supervisor: &'s mut S,
    ) -> Result<Channel<'s, S>, SephError> {
        if !self.running {
            self.running = true;
            if !supervisor.is_status_sent()? {
                return Ok(Channel::new(SeEvent::StartLoop, supervisor));
            }
        }

        let mut buf = [0u8; MAX_PACKET_SIZE];
        loop {
            let len = supervisor.seph_recv(&mut buf, 0)?;
            match SeEvent::from_bytes(&buf[..len]) {
                Ok(event) => return Ok(Channel::new(event, supervisor)),
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Dropping undecodable SEPH packet: {:?}", _e);
                    if !supervisor.is_status_sent()? {
                        send_packet(supervisor, &Status::General.to_packet()?)?;
                    }
                }
            }
        }
    }
}

/// One event turn
pub struct Channel<'s, S: Supervisor> {
    /// Event that opened this turn
    pub event: SeEvent,
    supervisor: &'s mut S,
    status_sent: bool,
}

impl<'s, S: Supervisor> Channel<'s, S> {
    fn new(event: SeEvent, supervisor: &'s mut S) -> Self {
        Self {
            event,
            supervisor,
            status_sent: false,
        }
    }

    /// Supervisor for syscalls issued while handling the event
    pub fn supervisor(&mut self) -> &mut S {
        self.supervisor
    }

    /// Whether this turn has been answered by the application
    pub fn status_sent(&self) -> bool {
        self.status_sent
    }

    /// Send a command packet; does not close the turn
    pub fn send_command(&mut self, packet: &Packet) -> Result<(), SephError> {
        send_packet(self.supervisor, packet)
    }

    /// Answer the turn with `status`
    pub fn send_status(&mut self, status: &Status<'_>) -> Result<(), SephError> {
        if self.status_sent {
            return Err(SephError::StatusAlreadySent);
        }
        let packet = status.to_packet()?;
        // The turn counts as answered even if the link fails
        self.status_sent = true;
        send_packet(self.supervisor, &packet)
    }

    /// Close the turn, sending a general status if nobody answered it
    pub fn finish(mut self) -> Result<(), SephError> {
        self.acknowledge()
    }

    fn acknowledge(&mut self) -> Result<(), SephError> {
        if self.status_sent {
            return Ok(());
        }
        self.status_sent = true;
        if self.supervisor.is_status_sent()? {
            return Ok(());
        }
        send_packet(self.supervisor, &Status::General.to_packet()?)
    }
}

impl<'s, S: Supervisor> Drop for Channel<'s, S> {
    fn drop(&mut self) {
        if let Err(_e) = self.acknowledge() {
            #[cfg(feature = "defmt")]
            defmt::debug!("General status not sent: {:?}", _e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nanowallet_hal::mock::MockSupervisor;

    #[test]
    fn test_api_level_checked() {
        let mut sup = MockSupervisor::new().with_api_level(7);
        assert_eq!(
            MessageLoop::new(&mut sup, 8).unwrap_err(),
            SystemError::NotSupported
        );
    }

    #[test]
    fn test_start_loop_then_events() {
        let mut sup = MockSupervisor::new();
        sup.push_ticker();
        let mut messages = MessageLoop::new(&mut sup, 8).unwrap();

        let ch = messages.next(&mut sup).unwrap();
        assert_eq!(ch.event, SeEvent::StartLoop);
        drop(ch);

        let ch = messages.next(&mut sup).unwrap();
        assert_eq!(ch.event, SeEvent::Ticker);
        drop(ch);

        assert_eq!(sup.sent().len(), 2);
        assert_eq!(&sup.sent()[0][..], &[0x60, 0x00, 0x02, 0x00, 0x00]);
    }

    #[test]
    fn test_no_start_loop_when_os_answered() {
        let mut sup = MockSupervisor::new().with_status_sent(true);
        sup.push_display_processed();
        let mut messages = MessageLoop::new(&mut sup, 8).unwrap();
        let ch = messages.next(&mut sup).unwrap();
        assert_eq!(ch.event, SeEvent::DisplayProcessed);
    }

    #[test]
    fn test_send_status_closes_turn() {
        let mut sup = MockSupervisor::new();
        let mut messages = MessageLoop::new(&mut sup, 8).unwrap();
        let mut ch = messages.next(&mut sup).unwrap();
        ch.send_status(&Status::General).unwrap();
        assert!(ch.status_sent());
        assert_eq!(
            ch.send_status(&Status::General),
            Err(SephError::StatusAlreadySent)
        );
        drop(ch);
        // No extra general status from the drop
        assert_eq!(sup.sent().len(), 1);
    }

    #[test]
    fn test_commands_do_not_close_turn() {
        let mut sup = MockSupervisor::new();
        let mut messages = MessageLoop::new(&mut sup, 8).unwrap();
        let mut ch = messages.next(&mut sup).unwrap();
        ch.send_command(&Packet::empty(0x4F)).unwrap();
        assert!(!ch.status_sent());
        ch.finish().unwrap();
        assert_eq!(sup.sent().len(), 2);
        assert_eq!(sup.sent()[1][0], 0x60);
    }

    #[test]
    fn test_os_answer_suppresses_general_status() {
        let mut sup = MockSupervisor::new().with_os_answering(true);
        sup.push_ticker();
        let mut messages = MessageLoop::new(&mut sup, 8).unwrap();
        let ch = messages.next(&mut sup).unwrap();
        assert_eq!(ch.event, SeEvent::Ticker);
        ch.finish().unwrap();
        assert!(sup.sent().is_empty());
    }

    #[test]
    fn test_undecodable_packet_skipped() {
        let mut sup = MockSupervisor::new().with_status_sent(true);
        sup.push_packet(&[0x42, 0x00, 0x00]);
        sup.push_ticker();
        let mut messages = MessageLoop::new(&mut sup, 8).unwrap();
        let ch = messages.next(&mut sup).unwrap();
        assert_eq!(ch.event, SeEvent::Ticker);
        drop(ch);
        // One acknowledgement for the unknown packet, one for the ticker
        assert_eq!(sup.sent().len(), 2);
    }

    #[test]
    fn test_exhausted_script() {
        let mut sup = MockSupervisor::new().with_status_sent(true);
        let mut messages = MessageLoop::new(&mut sup, 8).unwrap();
        assert!(messages.next(&mut sup).err().is_some_and(|e| e.is_app_exit()));
    }
}
