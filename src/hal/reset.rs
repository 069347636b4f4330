//! Reset HAL
//!
//! Hardware reset through the optional nRST line, the self-clearing digital
//! reset in `RESET_CTL`, and the ready flags that gate register access after
//! either one.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::spi::SpiDevice;

use super::bus::ChipBus;
use crate::driver::error::{ConfigError, ConfigResult, IoResult};
use crate::internal::constants::{RESET_POLL_INTERVAL_US, RESET_TIMEOUT};
use crate::internal::register::{HwCfg, PmtCtrl, ResetCtl, addr};

// =============================================================================
// Hardware reset line
// =============================================================================

/// Placeholder for boards without a reset line wired to the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResetPin;

impl ErrorType for NoResetPin {
    type Error = Infallible;
}

impl OutputPin for NoResetPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Drive the active-low reset line low.
///
/// Hold it for `RESET_PULSE_US` before calling [`release_reset`].
pub fn assert_reset<P: OutputPin>(pin: &mut P) -> ConfigResult<()> {
    pin.set_low().map_err(|_| ConfigError::GpioError)
}

/// Drive the reset line high again.
///
/// The chip needs `RESET_RECOVERY_US` before the first SPI access.
pub fn release_reset<P: OutputPin>(pin: &mut P) -> ConfigResult<()> {
    pin.set_high().map_err(|_| ConfigError::GpioError)
}

/// Run `check` up to [`RESET_TIMEOUT`] times, sleeping
/// [`RESET_POLL_INTERVAL_US`] before each call.
///
/// Returns `Ok(false)` once the budget is spent. `check` is expected to
/// take the bus lock itself, so nothing is held while sleeping.
pub fn poll_until_ready<D, E>(
    delay: &mut D,
    mut check: impl FnMut() -> core::result::Result<bool, E>,
) -> core::result::Result<bool, E>
where
    D: DelayNs,
{
    for _ in 0..RESET_TIMEOUT {
        delay.delay_us(RESET_POLL_INTERVAL_US);
        if check()? {
            return Ok(true);
        }
    }
    Ok(false)
}

// =============================================================================
// Digital reset
// =============================================================================

impl<SPI: SpiDevice> ChipBus<SPI> {
    /// Start a digital reset through `RESET_CTL`.
    pub fn start_digital_reset(&mut self) -> IoResult<()> {
        self.write32(addr::RESET_CTL, ResetCtl::DIGITAL_RST.bits())
    }

    /// Whether a digital reset has finished.
    ///
    /// Requires `RESET_CTL.DIGITAL_RST` to have self-cleared and
    /// `PMT_CTRL.READY` to be set.
    pub fn reset_complete(&mut self) -> IoResult<bool> {
        let reset = ResetCtl::from_bits_retain(self.read32(addr::RESET_CTL)?);
        if reset.contains(ResetCtl::DIGITAL_RST) {
            return Ok(false);
        }
        let pmt = PmtCtrl::from_bits_retain(self.read32(addr::PMT_CTRL)?);
        Ok(pmt.contains(PmtCtrl::READY))
    }

    /// Whether `HW_CFG.DEVICE_READY` is set after reconfiguring the FIFOs.
    pub fn device_ready(&mut self) -> IoResult<bool> {
        let hw_cfg = HwCfg::from_bits_retain(self.read32(addr::HW_CFG)?);
        Ok(hw_cfg.contains(HwCfg::DEVICE_READY))
    }
}
