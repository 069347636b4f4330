//! LAN9250 SPI Ethernet Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Microchip LAN9250, a 10/100
//! Ethernet MAC with an integrated PHY reached over SPI.
//!
//! # Architecture
//!
//! The driver is organized into layers:
//!
//! 1. **Driver** ([`driver`]): device instance, bring-up, TX path, RX worker
//! 2. **PHY** ([`phy`]): the integrated PHY behind the MII bridge
//! 3. **HAL** ([`hal`]): SPI register access, the MAC CSR and MII bridges, resets
//! 4. **Sync** ([`sync`]): the device lock and the interrupt signal
//!
//! All chip access goes through one critical-section lock owned by
//! [`Lan9250`]. Transmit can be called from any context while an
//! [`RxWorker`] services interrupts; their SPI sequences never interleave.
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for driver types
//! - `smoltcp`: Enable smoltcp network stack integration
//! - `async`: Enable async waiting on the interrupt signal
//!
//! # Example
//!
//! ```ignore
//! use ph_lan9250::{InterruptSignal, Lan9250, Lan9250Config, RxWorker};
//!
//! static SIGNAL: InterruptSignal = InterruptSignal::new();
//!
//! // In the IRQ pin handler:
//! SIGNAL.signal();
//!
//! let lan = Lan9250::new(spi, Some(reset_pin), Lan9250Config::new())?;
//! let link = lan.init(&mut delay)?;
//!
//! let mut worker = RxWorker::new(&lan, &SIGNAL, delay);
//! worker.run(&mut |frame: &[u8]| stack.ingest(frame))?;
//! ```
//!
//! The SPI device must be an `embedded_hal::spi::SpiDevice` that manages
//! chip select. The target HAL provides the `critical-section` implementation.

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
// Clippy lint levels live here; Cargo.toml carries the workspace-wide lints.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;
pub mod phy;
pub mod sync;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub mod integration;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::bringup::BringUpState;
pub use driver::config::{
    Duplex, IrqBuffer, IrqConfig, IrqPolarity, Lan9250Config, Speed, TxFifoSize,
};
pub use driver::error::{
    ConfigError, ConfigResult, Error, FifoError, FifoResult, IoError, IoResult, Result,
};
pub use driver::interrupt::InterruptStatus;
pub use driver::lan9250::{ChipId, Lan9250, Statistics};
pub use driver::rx::{FrameBuffer, FrameSink, RxPoll, RxStatus, RxWorker, ServiceReport};
pub use hal::reset::NoResetPin;

// Re-export PHY types
pub use phy::{InternalPhy, LinkStatus};

// Re-export sync types
pub use sync::InterruptSignal;

#[cfg(feature = "smoltcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
pub use integration::smoltcp::Lan9250Interface;

/// Typed register definitions for diagnostics.
///
/// The driver programs these itself; they are exposed so applications can
/// decode values such as [`InterruptStatus::flags`] or dump registers.
pub mod registers {
    pub use crate::internal::phy_regs::lan9250::{
        PhyInterrupts, SpecialControlStatus, reg as phy_vendor_reg, speed_ind,
    };
    pub use crate::internal::phy_regs::standard::{Anar, Bmcr, Bmsr, phy_reg};
    pub use crate::internal::register::mac::{HmacCr, MiiAcc, reg as mac_reg};
    pub use crate::internal::register::{
        FifoInfo, HwCfg, Interrupts, IrqCfg, MacCsrCmd, PmtCtrl, ResetCtl, RxDpCtrl, TxCfg,
        TxCmdA, addr,
    };
}

/// Shared driver constants.
///
/// These are grouped into a dedicated module to keep the top-level facade
/// focused on driver types and integration points.
pub mod constants {
    pub use crate::internal::constants::{
        // Chip identity
        BYTE_TEST_PATTERN,
        // Frame sizes
        CRC_SIZE,
        // Polling budgets
        CSR_BUSY_TIMEOUT,
        // Bring-up
        DEFAULT_LINK_TIMEOUT_MS,
        // MAC address
        DEFAULT_MAC_ADDR,
        DEFAULT_RETRIES,
        ETH_HEADER_SIZE,
        FRAME_BUFFER_SIZE,
        INTERNAL_PHY_ADDR,
        LAN9250_CHIP_ID,
        LINK_POLL_INTERVAL_MS,
        MAC_ADDR_LEN,
        MAX_FRAME_SIZE,
        MAX_TX_FRAME_SIZE,
        MII_BUSY_TIMEOUT,
        MTU,
        RESET_TIMEOUT,
    };
}
