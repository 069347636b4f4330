//! PHY Register Definitions
//!
//! Registers of the integrated 10/100 PHY, reached through the MII bridge
//! in [`crate::hal::mdio`] rather than over SPI directly.
//!
//! # Module Organization
//!
//! - [`standard`] - IEEE 802.3 Clause 22 registers used by the driver
//! - [`lan9250`] - vendor-specific registers (17-31)

pub mod lan9250;
pub mod standard;
