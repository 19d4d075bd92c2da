//! Application entry point

use nanowallet_hal::Supervisor;

use crate::config::{ConfigError, UxConfig};
use crate::screens::AddressScreen;
use crate::seph::{MessageLoop, SephError};
use crate::ux::Ux;

/// Errors that stop the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppError {
    /// Configuration rejected before start
    Config(ConfigError),
    /// Link with the OS failed
    Seph(SephError),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<SephError> for AppError {
    fn from(e: SephError) -> Self {
        AppError::Seph(e)
    }
}

/// Run the address screen until the OS ends the application
///
/// Returns `Ok(())` once the OS refuses further I/O because the
/// application exited.
pub fn run<S: Supervisor>(supervisor: &mut S, config: &UxConfig) -> Result<(), AppError> {
    config.validate()?;
    let mut messages = MessageLoop::new(supervisor, config.api_level).map_err(SephError::from)?;

    let mut screen = AddressScreen::new(config);
    screen.activate(&config.idle_label);
    let mut ux = Ux::new(config);
    ux.display(&screen, supervisor);

    #[cfg(feature = "defmt")]
    defmt::info!("Application started");

    loop {
        let turn = match messages.next(supervisor) {
            Ok(mut channel) => match ux.process(&mut channel, &mut screen) {
                Ok(()) => channel.finish(),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match turn {
            Ok(()) => {}
            Err(e) if e.is_app_exit() => {
                #[cfg(feature = "defmt")]
                defmt::info!("Application exited");
                return Ok(());
            }
            Err(e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Event loop failed: {:?}", e);
                return Err(e.into());
            }
        }
    }
}
