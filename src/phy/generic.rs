//! Link status and IEEE 802.3 Clause 22 helpers

use crate::driver::config::{Duplex, Speed};
use crate::driver::error::{IoError, Result};
use crate::hal::mdio::MdioBus;

// =============================================================================
// Link Status
// =============================================================================

/// Negotiated link parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
}

impl LinkStatus {
    /// Create a new link status
    pub const fn new(speed: Speed, duplex: Duplex) -> Self {
        Self { speed, duplex }
    }

    /// 100 Mbps Full Duplex
    pub const fn fast_full() -> Self {
        Self::new(Speed::Mbps100, Duplex::Full)
    }

    /// 100 Mbps Half Duplex
    pub const fn fast_half() -> Self {
        Self::new(Speed::Mbps100, Duplex::Half)
    }

    /// 10 Mbps Full Duplex
    pub const fn slow_full() -> Self {
        Self::new(Speed::Mbps10, Duplex::Full)
    }

    /// 10 Mbps Half Duplex
    pub const fn slow_half() -> Self {
        Self::new(Speed::Mbps10, Duplex::Half)
    }
}

// =============================================================================
// Standard register helpers
// =============================================================================

/// Helpers over the standard basic control/status and advertisement registers
pub mod ieee802_3 {
    use super::*;
    use crate::internal::phy_regs::standard::{Anar, Bmcr, Bmsr, phy_reg};

    /// BMSR link status bit
    pub fn is_link_up<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<bool> {
        let bmsr = Bmsr::from_bits_retain(mdio.read(phy_addr, phy_reg::BMSR)?);
        Ok(bmsr.contains(Bmsr::LINK_STATUS))
    }

    /// Set BMCR.RESET and wait for it to self-clear.
    ///
    /// Gives up with [`IoError::Timeout`] after `max_attempts` reads.
    pub fn soft_reset<M: MdioBus>(mdio: &mut M, phy_addr: u8, max_attempts: u32) -> Result<()> {
        mdio.write(phy_addr, phy_reg::BMCR, Bmcr::RESET.bits())?;

        for _ in 0..max_attempts {
            let bmcr = Bmcr::from_bits_retain(mdio.read(phy_addr, phy_reg::BMCR)?);
            if !bmcr.contains(Bmcr::RESET) {
                return Ok(());
            }
        }
        Err(IoError::Timeout.into())
    }

    /// Enable auto-negotiation and restart it
    pub fn restart_auto_negotiation<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        let bmcr = Bmcr::from_bits_retain(mdio.read(phy_addr, phy_reg::BMCR)?);
        let bmcr = (bmcr | Bmcr::AN_ENABLE | Bmcr::AN_RESTART) & !Bmcr::POWER_DOWN;
        mdio.write(phy_addr, phy_reg::BMCR, bmcr.bits())
    }

    /// Advertisement for 10/100 at the requested duplex.
    ///
    /// Half duplex drops the full-duplex abilities; both speeds stay.
    pub const fn advertisement(duplex: Duplex) -> Anar {
        let half = Anar::SELECTOR_IEEE802_3.union(Anar::TX_HD).union(Anar::T10_HD);
        match duplex {
            Duplex::Full => half.union(Anar::TX_FD).union(Anar::T10_FD),
            Duplex::Half => half,
        }
    }

    /// Write the advertisement register
    pub fn configure_advertisement<M: MdioBus>(
        mdio: &mut M,
        phy_addr: u8,
        duplex: Duplex,
    ) -> Result<()> {
        mdio.write(phy_addr, phy_reg::ANAR, advertisement(duplex).bits())
    }

    /// Speed and duplex as programmed in BMCR
    pub fn link_from_bmcr<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<LinkStatus> {
        let bmcr = Bmcr::from_bits_retain(mdio.read(phy_addr, phy_reg::BMCR)?);
        let speed = if bmcr.contains(Bmcr::SPEED_100) {
            Speed::Mbps100
        } else {
            Speed::Mbps10
        };
        let duplex = if bmcr.contains(Bmcr::DUPLEX_FULL) {
            Duplex::Full
        } else {
            Duplex::Half
        };
        Ok(LinkStatus::new(speed, duplex))
    }

    /// PHY identifier: `(PHYIDR1 << 16) | PHYIDR2`
    pub fn read_phy_id<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
        let id1 = mdio.read(phy_addr, phy_reg::PHYIDR1)?;
        let id2 = mdio.read(phy_addr, phy_reg::PHYIDR2)?;
        Ok((u32::from(id1) << 16) | u32::from(id2))
    }
}
