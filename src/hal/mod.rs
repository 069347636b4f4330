//! Hardware Abstraction Layer
//!
//! Layers between the raw SPI transport and the driver state machine.
//!
//! # Modules
//!
//! - [`bus`]: SPI framing, direct register and FIFO access
//! - [`csr`]: Indirect host MAC CSR bridge
//! - [`mdio`]: PHY register access over the MAC MII bridge
//! - [`reset`]: Hardware reset line, digital reset and ready polling
//!
//! # Delay Integration
//!
//! Every bounded poll takes an `embedded_hal::delay::DelayNs` from the caller.
//! Nothing in this layer owns a delay or a lock.

pub mod bus;
pub mod csr;
pub mod mdio;
pub mod reset;

// Re-export commonly used types
pub use bus::ChipBus;
pub use mdio::{MdioBus, MdioController};
pub use reset::{NoResetPin, assert_reset, release_reset};
