//! Indirect host MAC CSR access
//!
//! Host MAC registers are reached through a command/data register pair:
//!
//! 1. Wait until `MAC_CSR_CMD.BUSY` is clear
//! 2. For writes, load `MAC_CSR_DATA`
//! 3. Write `BUSY | R/nW | index` to `MAC_CSR_CMD`
//! 4. Poll `BUSY` until the chip clears it
//! 5. For reads, fetch `MAC_CSR_DATA`
//!
//! Polling is bounded by [`CSR_BUSY_TIMEOUT`] iterations; expiry is reported
//! as [`IoError::Timeout`] and the caller decides whether to retry.

use embedded_hal::delay::DelayNs;
use embedded_hal::spi::SpiDevice;

use super::bus::ChipBus;
use crate::driver::error::{IoError, IoResult};
use crate::internal::constants::{BUSY_POLL_INTERVAL_US, CSR_BUSY_TIMEOUT};
use crate::internal::register::{MacCsrCmd, addr};

impl<SPI: SpiDevice> ChipBus<SPI> {
    /// Read a host MAC register.
    pub fn read_mac<D: DelayNs>(&mut self, index: u8, delay: &mut D) -> IoResult<u32> {
        self.read_mac_with_budget(index, delay, CSR_BUSY_TIMEOUT)
    }

    /// Write a host MAC register.
    pub fn write_mac<D: DelayNs>(&mut self, index: u8, value: u32, delay: &mut D) -> IoResult<()> {
        self.write_mac_with_budget(index, value, delay, CSR_BUSY_TIMEOUT)
    }

    /// [`read_mac`](Self::read_mac) with an explicit poll budget.
    pub fn read_mac_with_budget<D: DelayNs>(
        &mut self,
        index: u8,
        delay: &mut D,
        budget: u32,
    ) -> IoResult<u32> {
        self.wait_csr_idle(delay, budget)?;
        self.write32(addr::MAC_CSR_CMD, MacCsrCmd::command(index, true))?;
        self.wait_csr_idle(delay, budget)?;
        self.read32(addr::MAC_CSR_DATA)
    }

    /// [`write_mac`](Self::write_mac) with an explicit poll budget.
    pub fn write_mac_with_budget<D: DelayNs>(
        &mut self,
        index: u8,
        value: u32,
        delay: &mut D,
        budget: u32,
    ) -> IoResult<()> {
        self.wait_csr_idle(delay, budget)?;
        self.write32(addr::MAC_CSR_DATA, value)?;
        self.write32(addr::MAC_CSR_CMD, MacCsrCmd::command(index, false))?;
        self.wait_csr_idle(delay, budget)
    }

    fn wait_csr_idle<D: DelayNs>(&mut self, delay: &mut D, budget: u32) -> IoResult<()> {
        for _ in 0..=budget {
            let cmd = MacCsrCmd::from_bits_retain(self.read32(addr::MAC_CSR_CMD)?);
            if !cmd.contains(MacCsrCmd::BUSY) {
                return Ok(());
            }
            delay.delay_us(BUSY_POLL_INTERVAL_US);
        }
        Err(IoError::Timeout)
    }
}
