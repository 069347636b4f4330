//! LAN9250 integrated 10/100 PHY
//!
//! The PHY sits behind the host MAC MII bridge at a fixed address. Beyond the
//! standard registers it reports the negotiated mode in register 31 and
//! raises link events through a clear-on-read source register (29) gated by
//! a mask register (30).

use super::generic::{LinkStatus, ieee802_3};
use crate::driver::config::Duplex;
use crate::driver::error::Result;
use crate::hal::mdio::MdioBus;
use crate::internal::constants::{INTERNAL_PHY_ADDR, PHY_RESET_MAX_ATTEMPTS};
use crate::internal::phy_regs::lan9250::{PhyInterrupts, SpecialControlStatus, reg, speed_ind};

/// PHY interrupt sources the driver listens to
pub const LINK_EVENTS: PhyInterrupts = PhyInterrupts::LINK_UP
    .union(PhyInterrupts::LINK_DOWN)
    .union(PhyInterrupts::AN_COMPLETE);

/// Integrated PHY driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InternalPhy {
    addr: u8,
}

impl Default for InternalPhy {
    fn default() -> Self {
        Self::new()
    }
}

impl InternalPhy {
    /// Driver for the PHY at its fixed MII address
    pub const fn new() -> Self {
        Self {
            addr: INTERNAL_PHY_ADDR,
        }
    }

    /// MII address of the PHY
    pub const fn address(&self) -> u8 {
        self.addr
    }

    /// Soft reset through BMCR.
    pub fn soft_reset<M: MdioBus>(&self, mdio: &mut M) -> Result<()> {
        ieee802_3::soft_reset(mdio, self.addr, PHY_RESET_MAX_ATTEMPTS)
    }

    /// Advertise 10/100 at the given duplex.
    pub fn configure_advertisement<M: MdioBus>(&self, mdio: &mut M, duplex: Duplex) -> Result<()> {
        ieee802_3::configure_advertisement(mdio, self.addr, duplex)
    }

    /// Enable and restart auto-negotiation.
    pub fn restart_auto_negotiation<M: MdioBus>(&self, mdio: &mut M) -> Result<()> {
        ieee802_3::restart_auto_negotiation(mdio, self.addr)
    }

    /// Program the interrupt mask register.
    pub fn set_interrupt_mask<M: MdioBus>(&self, mdio: &mut M, mask: PhyInterrupts) -> Result<()> {
        mdio.write(self.addr, reg::INTERRUPT_MASK, mask.bits())
    }

    /// Unmask [`LINK_EVENTS`].
    pub fn enable_link_interrupts<M: MdioBus>(&self, mdio: &mut M) -> Result<()> {
        self.set_interrupt_mask(mdio, LINK_EVENTS)
    }

    /// Read and clear the interrupt source register.
    pub fn read_interrupt_source<M: MdioBus>(&self, mdio: &mut M) -> Result<PhyInterrupts> {
        Ok(PhyInterrupts::from_bits_retain(
            mdio.read(self.addr, reg::INTERRUPT_SOURCE)?,
        ))
    }

    /// Negotiated mode from register 31, or `None` while negotiation is
    /// still running.
    pub fn read_speed_indication<M: MdioBus>(&self, mdio: &mut M) -> Result<Option<LinkStatus>> {
        let value = mdio.read(self.addr, reg::SPECIAL_CONTROL_STATUS)?;
        if !SpecialControlStatus::from_bits_retain(value).contains(SpecialControlStatus::AUTODONE) {
            return Ok(None);
        }

        let link = match value & speed_ind::MASK {
            speed_ind::FD_100 => LinkStatus::fast_full(),
            speed_ind::HD_100 => LinkStatus::fast_half(),
            speed_ind::FD_10 => LinkStatus::slow_full(),
            speed_ind::HD_10 => LinkStatus::slow_half(),
            _ => return Ok(None),
        };
        Ok(Some(link))
    }

    /// Current link, `None` when down.
    ///
    /// Falls back to the BMCR settings when register 31 has no negotiated
    /// result (forced mode or parallel detection).
    pub fn link_status<M: MdioBus>(&self, mdio: &mut M) -> Result<Option<LinkStatus>> {
        if !ieee802_3::is_link_up(mdio, self.addr)? {
            return Ok(None);
        }
        match self.read_speed_indication(mdio)? {
            Some(link) => Ok(Some(link)),
            None => ieee802_3::link_from_bmcr(mdio, self.addr).map(Some),
        }
    }

    /// PHY identifier (OUI, model, revision)
    pub fn phy_id<M: MdioBus>(&self, mdio: &mut M) -> Result<u32> {
        ieee802_3::read_phy_id(mdio, self.addr)
    }
}
