//! IEEE 802.3 PHY Register Definitions
//!
//! Only the Clause 22 registers the bring-up sequence touches are listed.
//!
//! | Register | Name | Description |
//! |----------|------|-------------|
//! | 0 | BMCR | Basic Mode Control |
//! | 1 | BMSR | Basic Mode Status |
//! | 2 | PHYIDR1 | PHY Identifier 1 |
//! | 3 | PHYIDR2 | PHY Identifier 2 |
//! | 4 | ANAR | Auto-Negotiation Advertisement |
//! | 5 | ANLPAR | Link Partner Ability |

use bitflags::bitflags;

/// Standard PHY register addresses (IEEE 802.3 Clause 22)
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 1;
    /// PHY Identifier 1
    pub const PHYIDR1: u8 = 2;
    /// PHY Identifier 2
    pub const PHYIDR2: u8 = 3;
    /// Auto-Negotiation Advertisement Register
    pub const ANAR: u8 = 4;
    /// Auto-Negotiation Link Partner Ability Register
    pub const ANLPAR: u8 = 5;
}

bitflags! {
    /// Basic Mode Control Register (0)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Bmcr: u16 {
        /// Soft reset (self-clearing)
        const RESET = 1 << 15;
        /// Loopback
        const LOOPBACK = 1 << 14;
        /// Speed select, 100 Mbps when set
        const SPEED_100 = 1 << 13;
        /// Auto-negotiation enable
        const AN_ENABLE = 1 << 12;
        /// Power down
        const POWER_DOWN = 1 << 11;
        /// Restart auto-negotiation (self-clearing)
        const AN_RESTART = 1 << 9;
        /// Full duplex
        const DUPLEX_FULL = 1 << 8;
        /// Collision test
        const COLLISION_TEST = 1 << 7;
    }
}

bitflags! {
    /// Basic Mode Status Register (1)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Bmsr: u16 {
        /// 100BASE-TX full duplex capable
        const TX_FD_CAPABLE = 1 << 14;
        /// 100BASE-TX half duplex capable
        const TX_HD_CAPABLE = 1 << 13;
        /// 10BASE-T full duplex capable
        const T10_FD_CAPABLE = 1 << 12;
        /// 10BASE-T half duplex capable
        const T10_HD_CAPABLE = 1 << 11;
        /// Auto-negotiation complete
        const AN_COMPLETE = 1 << 5;
        /// Remote fault
        const REMOTE_FAULT = 1 << 4;
        /// Auto-negotiation ability
        const AN_ABILITY = 1 << 3;
        /// Link status (latched low)
        const LINK_STATUS = 1 << 2;
        /// Jabber detect
        const JABBER_DETECT = 1 << 1;
        /// Extended capabilities
        const EXT_CAPABLE = 1 << 0;
    }
}

bitflags! {
    /// Auto-Negotiation Advertisement Register (4)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Anar: u16 {
        /// Next page capable
        const NEXT_PAGE = 1 << 15;
        /// Remote fault
        const REMOTE_FAULT = 1 << 13;
        /// Extended next page
        const EXT_NEXT_PAGE = 1 << 12;
        /// Asymmetric pause
        const ASYM_PAUSE = 1 << 11;
        /// Symmetric pause
        const SYM_PAUSE = 1 << 10;
        /// 100BASE-TX full duplex
        const TX_FD = 1 << 8;
        /// 100BASE-TX half duplex
        const TX_HD = 1 << 7;
        /// 10BASE-T full duplex
        const T10_FD = 1 << 6;
        /// 10BASE-T half duplex
        const T10_HD = 1 << 5;
        /// IEEE 802.3 selector field value
        const SELECTOR_IEEE802_3 = 0x0001;
    }
}
