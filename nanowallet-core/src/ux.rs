//! UX dispatcher
//!
//! Drives one [`Screen`] over the SE proxy HAL link. Elements are sent one
//! per turn: the first in answer to the current event, the next one when
//! the OS reports the previous element as drawn. Button reports and ticks
//! are routed to the screen in between.

use nanowallet_display::{ButtonTracker, Screen, UxTimer};
use nanowallet_hal::{Supervisor, UxResponse};
use nanowallet_protocol::SeEvent;

use crate::config::UxConfig;
use crate::seph::{Channel, SephError};

/// Display and input state of the active screen
#[derive(Debug, Clone)]
pub struct Ux {
    timer: UxTimer,
    buttons: ButtonTracker,
    ticker_period_ms: u32,
    next_element: usize,
    element_count: usize,
}

impl Ux {
    /// Create an idle dispatcher
    pub fn new(config: &UxConfig) -> Self {
        Self {
            timer: UxTimer::default(),
            buttons: ButtonTracker::new(config.fast_threshold, config.fast_action_period),
            ticker_period_ms: config.ticker_period.as_millis(),
            next_element: 0,
            element_count: 0,
        }
    }

    /// Make `screen` the active screen
    ///
    /// Drawing starts with the next event turn. Buttons held across the
    /// switch are forgotten, so their release does not reach the new screen.
    pub fn display<C: Screen, S: Supervisor>(&mut self, screen: &C, supervisor: &mut S) {
        supervisor.ux_wake_up();
        self.buttons.reset();
        self.restart(screen);
        #[cfg(feature = "defmt")]
        defmt::debug!("Displaying screen with {} elements", self.element_count);
    }

    /// Whether every element of the active screen has been sent
    pub fn is_displayed(&self) -> bool {
        self.next_element >= self.element_count
    }

    /// Refresh timer set by the screen preprocessor
    pub fn timer(&self) -> &UxTimer {
        &self.timer
    }

    /// Handle one event turn
    pub fn process<S: Supervisor, C: Screen>(
        &mut self,
        channel: &mut Channel<'_, S>,
        screen: &mut C,
    ) -> Result<(), SephError> {
        let event = channel.event;
        if event != SeEvent::StartLoop {
            match channel.supervisor().ux_event() {
                UxResponse::Redraw => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("OS requested a redraw");
                    self.restart(&*screen);
                    return self.display_next(channel, &*screen);
                }
                reply if reply.defers_drawing() => return Ok(()),
                _ => {}
            }
        }

        match event {
            SeEvent::ButtonPush { .. } => {
                let buttons = event.buttons().unwrap_or(0);
                let press = self.buttons.push(buttons);
                #[cfg(feature = "defmt")]
                defmt::trace!("Button mask {:#x} counter {}", press.mask.bits(), press.counter);
                screen.button(press.mask, press.counter, channel.supervisor());
            }
            SeEvent::Ticker => {
                if self.timer.tick(self.ticker_period_ms) {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Refresh interval elapsed, redrawing");
                    self.restart(&*screen);
                }
            }
            SeEvent::DisplayProcessed | SeEvent::StartLoop => {}
        }

        self.display_next(channel, &*screen)
    }

    fn restart<C: Screen>(&mut self, screen: &C) {
        self.timer.clear();
        self.next_element = 0;
        self.element_count = screen.elements().len();
    }

    /// Send the next element that survives preprocessing, if any
    fn display_next<S: Supervisor, C: Screen>(
        &mut self,
        channel: &mut Channel<'_, S>,
        screen: &C,
    ) -> Result<(), SephError> {
        if self.is_displayed() || channel.status_sent() {
            return Ok(());
        }

        let elements = screen.elements();
        while let Some(element) = elements.get(self.next_element).copied() {
            self.next_element += 1;
            if let Some(element) = screen.prepro(element, &mut self.timer) {
                return channel.send_status(&element.to_status());
            }
        }
        self.next_element = self.element_count;
        Ok(())
    }
}
