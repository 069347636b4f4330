//! Interrupt status handling.
//!
//! [`InterruptStatus`] wraps one INT_STS snapshot. The worker reads it once
//! per pass, services what it names, and writes the same bits back to clear
//! them (write-1-to-clear).

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::error::Result;
use super::lan9250::Lan9250;
use crate::internal::register::{Interrupts, addr};

/// Causes unmasked in INT_EN once bring-up has configured the chip
pub const ENABLED_INTERRUPTS: Interrupts = Interrupts::RSFL
    .union(Interrupts::PHY_INT)
    .union(Interrupts::RXDF_INT)
    .union(Interrupts::RXE)
    .union(Interrupts::TXE);

/// Snapshot of INT_STS
///
/// # Example
///
/// ```ignore
/// let status = lan.interrupt_status()?;
/// if status.rx_pending() {
///     // drain the RX FIFOs
/// }
/// lan.clear_interrupts(status)?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterruptStatus(Interrupts);

impl InterruptStatus {
    /// Create from a raw INT_STS value
    #[inline]
    pub const fn from_raw(status: u32) -> Self {
        Self(Interrupts::from_bits_retain(status))
    }

    /// Raw value, suitable for the write-1-to-clear acknowledge
    #[inline]
    pub const fn to_raw(&self) -> u32 {
        self.0.bits()
    }

    /// Typed flags
    #[inline]
    pub const fn flags(&self) -> Interrupts {
        self.0
    }

    /// Any cause the driver services is set
    #[inline]
    pub const fn any(&self) -> bool {
        self.0
            .intersects(ENABLED_INTERRUPTS.union(Interrupts::TSFL).union(Interrupts::RXD_INT))
    }

    /// RX status words are waiting
    #[inline]
    pub const fn rx_pending(&self) -> bool {
        self.0
            .intersects(Interrupts::RSFL.union(Interrupts::RSFF).union(Interrupts::RXD_INT))
    }

    /// TX status words are waiting
    #[inline]
    pub const fn tx_status_pending(&self) -> bool {
        self.0
            .intersects(Interrupts::TSFL.union(Interrupts::TSFF).union(Interrupts::TX_IOC))
    }

    /// The PHY raised an interrupt
    #[inline]
    pub const fn phy_event(&self) -> bool {
        self.0.contains(Interrupts::PHY_INT)
    }

    /// The receiver dropped a frame for lack of FIFO space
    #[inline]
    pub const fn rx_overrun(&self) -> bool {
        self.0.contains(Interrupts::RXDF_INT)
    }

    /// Receiver or transmitter error, or a status FIFO overrun
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.0.intersects(
            Interrupts::RXE
                .union(Interrupts::TXE)
                .union(Interrupts::TXSO)
                .union(Interrupts::TDFO)
                .union(Interrupts::RWT),
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterruptStatus {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(f, "InterruptStatus({=u32:#x})", self.to_raw());
    }
}

impl<SPI: SpiDevice, RST: OutputPin> Lan9250<SPI, RST> {
    /// Read INT_STS without clearing it.
    pub fn interrupt_status(&self) -> Result<InterruptStatus> {
        let raw = self.lock(|hw| hw.bus.read32(addr::INT_STS))?;
        Ok(InterruptStatus::from_raw(raw))
    }

    /// Acknowledge the causes in `status`.
    pub fn clear_interrupts(&self, status: InterruptStatus) -> Result<()> {
        Ok(self.lock(|hw| hw.bus.write32(addr::INT_STS, status.to_raw()))?)
    }
}
