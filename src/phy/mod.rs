//! Integrated PHY
//!
//! PHY logic is written against [`MdioBus`](crate::hal::MdioBus) only, so it
//! runs the same over the chip's MII bridge and over a plain register map in
//! tests.
//!
//! # Example
//!
//! ```ignore
//! use ph_lan9250::hal::MdioController;
//! use ph_lan9250::phy::InternalPhy;
//!
//! let mut mdio = MdioController::new(&mut bus, &mut delay);
//! let phy = InternalPhy::new();
//!
//! phy.soft_reset(&mut mdio)?;
//! phy.configure_advertisement(&mut mdio, Duplex::Full)?;
//! phy.restart_auto_negotiation(&mut mdio)?;
//!
//! if let Some(link) = phy.link_status(&mut mdio)? {
//!     // link.speed, link.duplex
//! }
//! ```

pub mod generic;
pub mod lan9250;

pub use generic::{LinkStatus, ieee802_3};
pub use lan9250::{InternalPhy, LINK_EVENTS};
