//! Core driver components for the LAN9250.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`lan9250`] - The device instance and its lock
//! - [`bringup`] - Reset and link bring-up
//! - [`tx`] - Frame transmission
//! - [`rx`] - Frame reception and the interrupt worker
//! - [`interrupt`] - Interrupt status decoding
//!
//! # Example
//!
//! ```ignore
//! use ph_lan9250::driver::{Lan9250, Lan9250Config};
//!
//! let config = Lan9250Config::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! let lan = Lan9250::without_reset_pin(spi, config)?;
//! let link = lan.init(&mut delay)?;
//! ```

// Submodules
pub mod bringup;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod lan9250;
pub mod rx;
pub mod tx;

// Re-exports for convenience
pub use bringup::BringUpState;
pub use config::{Duplex, IrqBuffer, IrqConfig, IrqPolarity, Lan9250Config, Speed, TxFifoSize};
pub use error::{
    ConfigError, ConfigResult, Error, FifoError, FifoResult, IoError, IoResult, Result,
};
pub use interrupt::{ENABLED_INTERRUPTS, InterruptStatus};
pub use lan9250::{ChipId, Lan9250, Statistics};
pub use rx::{FrameBuffer, FrameSink, RxPoll, RxStatus, RxWorker, ServiceReport};
pub use tx::{TxCommand, tx_fifo_footprint};
