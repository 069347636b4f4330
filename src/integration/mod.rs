//! External Stack Integrations
//!
//! - **smoltcp** (`smoltcp`): `smoltcp::phy::Device` over a shared device
//!   - RX/TX token support
//!   - Requires `smoltcp` feature
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::phy::Device;
//! use ph_lan9250::integration::Lan9250Interface;
//!
//! let mut device = Lan9250Interface::new(&lan);
//! let _ = device.capabilities();
//! ```

#[cfg(feature = "smoltcp")]
pub mod smoltcp;

#[cfg(feature = "smoltcp")]
pub use smoltcp::{Lan9250Interface, Lan9250RxToken, Lan9250TxToken, ethernet_address};
