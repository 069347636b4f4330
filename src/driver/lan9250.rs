//! Core LAN9250 device instance.
//!
//! [`Lan9250`] owns the SPI device, the optional reset line and the runtime
//! bookkeeping, all behind one critical-section lock. Every path that talks
//! to the chip goes through [`Lan9250::lock`], so two register or FIFO
//! sequences never interleave on the bus.
//!
//! The operations are split across modules:
//! - [`bringup`](super::bringup): reset and link bring-up
//! - [`tx`](super::tx): frame transmission
//! - [`rx`](super::rx): frame reception and the interrupt worker

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::bringup::BringUpState;
use super::config::Lan9250Config;
use super::error::Result;
use crate::hal::bus::ChipBus;
use crate::hal::reset::NoResetPin;
use crate::internal::register::{ID_REV_CHIP_ID_MASK, ID_REV_CHIP_REV_MASK, addr};
use crate::phy::LinkStatus;
use crate::sync::CriticalSectionCell;

// =============================================================================
// Statistics
// =============================================================================

/// Driver counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Statistics {
    /// Frames written to the TX FIFO
    pub tx_frames: u32,
    /// TX status words without the error bit
    pub tx_completed: u32,
    /// TX status words with the error bit
    pub tx_errors: u32,
    /// Transmits refused for lack of FIFO space
    pub tx_backpressure: u32,
    /// Frames delivered to the stack
    pub rx_frames: u32,
    /// RX status words with an implausible length
    pub rx_errors: u32,
    /// Frames read out and discarded because of a receive error
    pub rx_dropped: u32,
    /// RX dropped-frame interrupts (FIFO overrun)
    pub rx_overruns: u32,
    /// Link up/down transitions seen by the worker
    pub link_changes: u32,
    /// Bring-up attempts started
    pub bring_up_attempts: u32,
}

/// Chip identification from ID_REV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipId {
    /// Chip ID (0x9250)
    pub id: u16,
    /// Silicon revision
    pub revision: u16,
}

impl ChipId {
    /// Split a raw ID_REV value
    pub const fn from_raw(value: u32) -> Self {
        Self {
            id: ((value & ID_REV_CHIP_ID_MASK) >> 16) as u16,
            revision: (value & ID_REV_CHIP_REV_MASK) as u16,
        }
    }
}

/// Increment a counter, wrapping on overflow.
#[inline]
pub(crate) fn bump(counter: &mut u32) {
    *counter = counter.wrapping_add(1);
}

// =============================================================================
// Locked hardware state
// =============================================================================

/// Everything reachable under the device lock.
pub(crate) struct Hardware<SPI, RST> {
    pub(crate) bus: ChipBus<SPI>,
    pub(crate) reset_pin: Option<RST>,
    pub(crate) stats: Statistics,
    pub(crate) link: Option<LinkStatus>,
    pub(crate) state: BringUpState,
    /// Set once the link is up; cleared for the duration of a bring-up
    pub(crate) ready: bool,
    pub(crate) next_tag: u16,
}

// =============================================================================
// Device
// =============================================================================

/// LAN9250 device instance
///
/// Created once at attach and shared by reference between the transmit
/// caller and the [`RxWorker`](super::rx::RxWorker).
///
/// # Example
/// ```ignore
/// let config = Lan9250Config::new().with_mac_address(mac);
/// let lan = Lan9250::new(spi, Some(reset_pin), config)?;
///
/// let link = lan.init(&mut delay)?;
/// lan.transmit(&frame)?;
/// ```
pub struct Lan9250<SPI, RST = NoResetPin> {
    hw: CriticalSectionCell<Hardware<SPI, RST>>,
    config: Lan9250Config,
}

impl<SPI: SpiDevice, RST: OutputPin> Lan9250<SPI, RST> {
    /// Create a device instance.
    ///
    /// Validates `config`; touches no hardware. Call
    /// [`init`](Self::init) to bring the chip up.
    pub fn new(spi: SPI, reset_pin: Option<RST>, config: Lan9250Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            hw: CriticalSectionCell::new(Hardware {
                bus: ChipBus::new(spi),
                reset_pin,
                stats: Statistics::default(),
                link: None,
                state: BringUpState::PowerOnReset,
                ready: false,
                next_tag: 1,
            }),
            config,
        })
    }

    /// Run `f` with exclusive access to the bus and device state.
    #[inline]
    pub(crate) fn lock<R>(&self, f: impl FnOnce(&mut Hardware<SPI, RST>) -> R) -> R {
        self.hw.with(f)
    }

    /// Whether nothing currently holds the device lock.
    #[cfg(test)]
    pub(crate) fn lock_is_free(&self) -> bool {
        self.hw.try_with(|_| ()).is_some()
    }

    /// Configuration supplied at construction
    pub fn config(&self) -> &Lan9250Config {
        &self.config
    }

    /// Station MAC address
    pub fn mac_address(&self) -> [u8; 6] {
        self.config.mac_address
    }

    /// Snapshot of the driver counters
    pub fn stats(&self) -> Statistics {
        self.lock(|hw| hw.stats)
    }

    /// Last known link, `None` while down
    pub fn link_status(&self) -> Option<LinkStatus> {
        self.lock(|hw| hw.link)
    }

    /// Whether bring-up has completed and the link is up
    pub fn is_ready(&self) -> bool {
        self.lock(|hw| hw.ready)
    }

    /// Last bring-up state reached
    pub fn bring_up_state(&self) -> BringUpState {
        self.lock(|hw| hw.state)
    }

    /// Read the chip ID and revision.
    pub fn chip_id(&self) -> Result<ChipId> {
        let raw = self.lock(|hw| hw.bus.read32(addr::ID_REV))?;
        Ok(ChipId::from_raw(raw))
    }

    /// Give back the SPI device and reset line.
    pub fn release(self) -> (SPI, Option<RST>) {
        let hw = self.hw.into_inner();
        (hw.bus.free(), hw.reset_pin)
    }
}

impl<SPI: SpiDevice> Lan9250<SPI, NoResetPin> {
    /// Create a device instance for a board without a reset line.
    pub fn without_reset_pin(spi: SPI, config: Lan9250Config) -> Result<Self> {
        Self::new(spi, None, config)
    }
}
