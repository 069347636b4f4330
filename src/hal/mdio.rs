//! PHY register access over the host MAC MII bridge
//!
//! The integrated PHY is reached through `HMAC_MII_ACC` / `HMAC_MII_DATA`,
//! which are themselves host MAC CSRs. Each PHY access is therefore a short
//! sequence of CSR handshakes layered on [`crate::hal::csr`].
//!
//! [`MdioBus`] abstracts the transport so PHY logic can be tested against a
//! plain register map.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use super::bus::ChipBus;
use crate::driver::error::{ConfigError, IoError, IoResult, Result};
use crate::internal::constants::{BUSY_POLL_INTERVAL_US, INTERNAL_PHY_ADDR, MII_BUSY_TIMEOUT};
use crate::internal::register::mac::{MiiAcc, reg};

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;
}

// =============================================================================
// MII bridge on the chip bus
// =============================================================================

impl<SPI: SpiDevice> ChipBus<SPI> {
    /// Read a register of the integrated PHY.
    pub fn read_phy<D: DelayNs>(&mut self, reg_addr: u8, delay: &mut D) -> IoResult<u16> {
        self.mii_read(INTERNAL_PHY_ADDR, reg_addr, delay, MII_BUSY_TIMEOUT)
    }

    /// Write a register of the integrated PHY.
    pub fn write_phy<D: DelayNs>(&mut self, reg_addr: u8, value: u16, delay: &mut D) -> IoResult<()> {
        self.mii_write(INTERNAL_PHY_ADDR, reg_addr, value, delay, MII_BUSY_TIMEOUT)
    }

    fn mii_read<D: DelayNs>(
        &mut self,
        phy_addr: u8,
        reg_addr: u8,
        delay: &mut D,
        budget: u32,
    ) -> IoResult<u16> {
        self.wait_mii_idle(delay, budget)?;
        self.write_mac(reg::HMAC_MII_ACC, MiiAcc::command(phy_addr, reg_addr, false), delay)?;
        self.wait_mii_idle(delay, budget)?;
        let data = self.read_mac(reg::HMAC_MII_DATA, delay)?;
        Ok((data & 0xFFFF) as u16)
    }

    fn mii_write<D: DelayNs>(
        &mut self,
        phy_addr: u8,
        reg_addr: u8,
        value: u16,
        delay: &mut D,
        budget: u32,
    ) -> IoResult<()> {
        self.wait_mii_idle(delay, budget)?;
        self.write_mac(reg::HMAC_MII_DATA, u32::from(value), delay)?;
        self.write_mac(reg::HMAC_MII_ACC, MiiAcc::command(phy_addr, reg_addr, true), delay)?;
        self.wait_mii_idle(delay, budget)
    }

    fn wait_mii_idle<D: DelayNs>(&mut self, delay: &mut D, budget: u32) -> IoResult<()> {
        for _ in 0..=budget {
            let acc = MiiAcc::from_bits_retain(self.read_mac(reg::HMAC_MII_ACC, delay)?);
            if !acc.contains(MiiAcc::MIIBZY) {
                return Ok(());
            }
            delay.delay_us(BUSY_POLL_INTERVAL_US);
        }
        Err(IoError::Timeout)
    }
}

// =============================================================================
// MDIO Controller
// =============================================================================

/// MDIO controller for PHY register access
///
/// Borrows the chip bus and a delay for the duration of one locked section.
#[derive(Debug)]
pub struct MdioController<'a, SPI, D> {
    bus: &'a mut ChipBus<SPI>,
    delay: &'a mut D,
    /// MII busy poll budget in iterations
    budget: u32,
}

impl<'a, SPI: SpiDevice, D: DelayNs> MdioController<'a, SPI, D> {
    /// Create a new MDIO controller over a locked chip bus
    pub fn new(bus: &'a mut ChipBus<SPI>, delay: &'a mut D) -> Self {
        Self {
            bus,
            delay,
            budget: MII_BUSY_TIMEOUT,
        }
    }

    /// Set the MII busy poll budget
    pub fn set_budget(&mut self, iterations: u32) {
        self.budget = iterations;
    }

    /// Delay provider shared with the bridge
    pub fn delay(&mut self) -> &mut D {
        &mut *self.delay
    }
}

impl<SPI: SpiDevice, D: DelayNs> MdioBus for MdioController<'_, SPI, D> {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        if phy_addr > MAX_PHY_ADDR || reg_addr > MAX_REG_ADDR {
            return Err(ConfigError::InvalidConfig.into());
        }
        Ok(self
            .bus
            .mii_read(phy_addr, reg_addr, &mut *self.delay, self.budget)?)
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        if phy_addr > MAX_PHY_ADDR || reg_addr > MAX_REG_ADDR {
            return Err(ConfigError::InvalidConfig.into());
        }
        Ok(self
            .bus
            .mii_write(phy_addr, reg_addr, value, &mut *self.delay, self.budget)?)
    }
}
