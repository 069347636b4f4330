//! Reset and link bring-up.
//!
//! ```text
//! PowerOnReset -> DigitalReset -> ByteOrderCheck -> FifoConfigured
//!   -> MacConfigured -> PhyReset -> AutoNegotiating -> LinkUp
//!                                                   \-> LinkDown (retry)
//! ```
//!
//! Each step runs in its own locked section. Every wait (the reset pulse,
//! reset and ready polling, link polling) sleeps with the lock released, so
//! the transmit path and interrupt worker are never starved by a slow chip.
//!
//! Poll expiries ([`IoError::Timeout`], [`IoError::LinkTimeout`]) restart
//! the whole sequence, up to `retry_count` attempts in total. Anything else
//! ends bring-up immediately.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::config::{Duplex, Lan9250Config};
use super::error::{ConfigError, IoError, Result};
use super::interrupt::ENABLED_INTERRUPTS;
use super::lan9250::{ChipId, Hardware, Lan9250, bump};
use crate::hal::mdio::MdioController;
use crate::hal::reset::{assert_reset, poll_until_ready, release_reset};
use crate::internal::constants::{
    BYTE_TEST_PATTERN, LAN9250_CHIP_ID, LINK_POLL_INTERVAL_MS, RESET_PULSE_US, RESET_RECOVERY_US,
};
use crate::internal::register::mac::{HmacCr, mac_address_words, reg};
use crate::internal::register::{FIFO_INT_RX_STATUS_LEVEL, HwCfg, Interrupts, TxCfg, addr};
use crate::phy::{InternalPhy, LINK_EVENTS, LinkStatus};

/// Bring-up progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpState {
    /// Hardware reset line pulsed (or nothing done yet)
    #[default]
    PowerOnReset,
    /// Digital reset issued and completed
    DigitalReset,
    /// Byte order and chip ID verified
    ByteOrderCheck,
    /// FIFO sizes, interrupt pin and FIFO levels programmed
    FifoConfigured,
    /// Host MAC control and address programmed
    MacConfigured,
    /// PHY soft reset done
    PhyReset,
    /// Waiting for auto-negotiation
    AutoNegotiating,
    /// Link established
    LinkUp,
    /// Attempt failed or link lost
    LinkDown,
}

/// HMAC_CR value for a configuration
pub(crate) const fn mac_control(config: &Lan9250Config) -> HmacCr {
    let mut cr = HmacCr::TXEN.union(HmacCr::RXEN);
    if matches!(config.duplex, Duplex::Full) {
        cr = cr.union(HmacCr::FDPX);
    }
    if config.promiscuous {
        cr = cr.union(HmacCr::PRMS);
    }
    if config.pass_all_multicast {
        cr = cr.union(HmacCr::MCPAS);
    }
    if !config.accept_broadcast {
        cr = cr.union(HmacCr::BCAST);
    }
    cr
}

impl<SPI: SpiDevice, RST: OutputPin> Lan9250<SPI, RST> {
    /// Reset the chip and bring the link up.
    ///
    /// Returns the negotiated link. Exhausting every attempt yields
    /// [`ConfigError::BringUpFailed`].
    ///
    /// # Errors
    /// - `BringUpFailed` - every attempt ended in a poll expiry
    /// - `ResetFailed` - digital reset never completed
    /// - `EndiannessMismatch` - BYTE_TEST did not read back the sentinel
    /// - `UnsupportedChip` - ID_REV is not a LAN9250
    /// - `GpioError` - the reset line could not be driven
    /// - `Bus` - SPI transport failure
    pub fn init<D: DelayNs>(&self, delay: &mut D) -> Result<LinkStatus> {
        for _attempt in 1..=self.config().retry_count {
            self.lock(|hw| {
                bump(&mut hw.stats.bring_up_attempts);
                hw.ready = false;
                hw.link = None;
            });

            match self.bring_up_attempt(delay) {
                Ok(link) => {
                    #[cfg(feature = "defmt")]
                    defmt::info!("link up: {}", link);
                    return Ok(link);
                }
                Err(e) if e.is_retryable() => {
                    self.lock(|hw| hw.enter(BringUpState::LinkDown));
                    #[cfg(feature = "defmt")]
                    defmt::warn!("bring-up attempt {} failed: {}", _attempt, e);
                }
                Err(e) => {
                    #[cfg(feature = "defmt")]
                    defmt::error!("bring-up aborted: {}", e);
                    return Err(e);
                }
            }
        }

        Err(ConfigError::BringUpFailed.into())
    }

    fn bring_up_attempt<D: DelayNs>(&self, delay: &mut D) -> Result<LinkStatus> {
        let config = *self.config();
        self.reset_chip(delay)?;
        self.lock(|hw| hw.check_identity())?;
        self.configure_fifos(&config, delay)?;
        self.lock(|hw| hw.configure_mac(&config, delay))?;
        self.lock(|hw| hw.configure_phy(&config, delay))?;
        self.wait_for_link(delay)
    }

    /// Pulse the reset line, then run a digital reset and wait it out.
    fn reset_chip<D: DelayNs>(&self, delay: &mut D) -> Result<()> {
        let has_pin = self.lock(|hw| -> Result<bool> {
            hw.enter(BringUpState::PowerOnReset);
            match hw.reset_pin.as_mut() {
                Some(pin) => {
                    assert_reset(pin)?;
                    Ok(true)
                }
                None => Ok(false),
            }
        })?;
        if has_pin {
            delay.delay_us(RESET_PULSE_US);
            self.lock(|hw| hw.reset_pin.as_mut().map_or(Ok(()), release_reset))?;
            delay.delay_us(RESET_RECOVERY_US);
        }

        self.lock(|hw| hw.bus.start_digital_reset())?;
        if !poll_until_ready(delay, || self.lock(|hw| hw.bus.reset_complete()))? {
            return Err(ConfigError::ResetFailed.into());
        }
        self.lock(|hw| hw.enter(BringUpState::DigitalReset));
        Ok(())
    }

    fn configure_fifos<D: DelayNs>(&self, config: &Lan9250Config, delay: &mut D) -> Result<()> {
        self.lock(|hw| {
            hw.bus.write32(
                addr::HW_CFG,
                HwCfg::MBO.bits() | config.tx_fifo_size.to_reg_value(),
            )
        })?;
        if !poll_until_ready(delay, || self.lock(|hw| hw.bus.device_ready()))? {
            return Err(IoError::Timeout.into());
        }
        self.lock(|hw| hw.configure_interrupts(config))
    }

    fn wait_for_link<D: DelayNs>(&self, delay: &mut D) -> Result<LinkStatus> {
        let timeout_ms = self.config().link_timeout_ms;
        let mut waited_ms = 0u32;

        loop {
            if let Some(link) = self.lock(|hw| hw.poll_link(delay))? {
                self.lock(|hw| {
                    hw.link = Some(link);
                    hw.ready = true;
                    hw.enter(BringUpState::LinkUp);
                });
                return Ok(link);
            }
            if waited_ms >= timeout_ms {
                return Err(IoError::LinkTimeout.into());
            }
            delay.delay_ms(LINK_POLL_INTERVAL_MS);
            waited_ms = waited_ms.saturating_add(LINK_POLL_INTERVAL_MS);
        }
    }
}

impl<SPI: SpiDevice, RST: OutputPin> Hardware<SPI, RST> {
    pub(crate) fn enter(&mut self, state: BringUpState) {
        #[cfg(feature = "defmt")]
        defmt::debug!("bring-up: {} -> {}", self.state, state);
        self.state = state;
    }

    fn check_identity(&mut self) -> Result<()> {
        let pattern = self.bus.read32(addr::BYTE_TEST)?;
        if pattern != BYTE_TEST_PATTERN {
            #[cfg(feature = "defmt")]
            defmt::error!("BYTE_TEST read {=u32:#x}", pattern);
            return Err(ConfigError::EndiannessMismatch.into());
        }

        let chip = ChipId::from_raw(self.bus.read32(addr::ID_REV)?);
        if chip.id != LAN9250_CHIP_ID {
            return Err(ConfigError::UnsupportedChip.into());
        }
        self.enter(BringUpState::ByteOrderCheck);
        Ok(())
    }

    fn configure_interrupts(&mut self, config: &Lan9250Config) -> Result<()> {
        self.bus.write32(addr::INT_EN, 0)?;
        self.bus.write32(addr::INT_STS, Interrupts::all().bits())?;
        self.bus.write32(addr::IRQ_CFG, config.irq.to_reg_value())?;
        // Interrupt as soon as one RX status word is waiting
        self.bus
            .modify32(addr::FIFO_INT, |v| v & !FIFO_INT_RX_STATUS_LEVEL)?;
        self.enter(BringUpState::FifoConfigured);
        Ok(())
    }

    fn configure_mac<D: DelayNs>(&mut self, config: &Lan9250Config, delay: &mut D) -> Result<()> {
        let (low, high) = mac_address_words(&config.mac_address);
        self.bus.write_mac(reg::HMAC_ADDRL, low, delay)?;
        self.bus.write_mac(reg::HMAC_ADDRH, high, delay)?;
        self.bus
            .write_mac(reg::HMAC_CR, mac_control(config).bits(), delay)?;
        self.bus.write32(addr::TX_CFG, TxCfg::TX_ON.bits())?;
        self.enter(BringUpState::MacConfigured);
        Ok(())
    }

    fn configure_phy<D: DelayNs>(&mut self, config: &Lan9250Config, delay: &mut D) -> Result<()> {
        let phy = InternalPhy::new();
        {
            let mut mdio = MdioController::new(&mut self.bus, delay);
            phy.soft_reset(&mut mdio)?;
        }
        self.enter(BringUpState::PhyReset);

        {
            let mut mdio = MdioController::new(&mut self.bus, delay);
            phy.configure_advertisement(&mut mdio, config.duplex)?;
            phy.set_interrupt_mask(&mut mdio, LINK_EVENTS)?;
            // Discard events latched before the mask was set
            phy.read_interrupt_source(&mut mdio)?;
            phy.restart_auto_negotiation(&mut mdio)?;
        }

        self.bus.write32(addr::INT_EN, ENABLED_INTERRUPTS.bits())?;
        self.enter(BringUpState::AutoNegotiating);
        Ok(())
    }

    /// Current PHY link, read through the MII bridge.
    pub(crate) fn poll_link<D: DelayNs>(&mut self, delay: &mut D) -> Result<Option<LinkStatus>> {
        let mut mdio = MdioController::new(&mut self.bus, delay);
        InternalPhy::new().link_status(&mut mdio)
    }
}
