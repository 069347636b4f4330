//! LAN9250 Integrated PHY Vendor Registers

use bitflags::bitflags;

/// Vendor-specific register addresses
pub mod reg {
    /// Mode Control/Status
    pub const MODE_CONTROL_STATUS: u8 = 17;
    /// Special Modes
    pub const SPECIAL_MODES: u8 = 18;
    /// Special Control/Status Indication
    pub const SPECIAL_CONTROL_STAT_IND: u8 = 27;
    /// Interrupt Source Flags (clear on read)
    pub const INTERRUPT_SOURCE: u8 = 29;
    /// Interrupt Mask
    pub const INTERRUPT_MASK: u8 = 30;
    /// PHY Special Control/Status
    pub const SPECIAL_CONTROL_STATUS: u8 = 31;
}

bitflags! {
    /// Mode Control/Status Register (17)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModeControlStatus: u16 {
        /// Energy detect power-down enable
        const EDPWRDOWN = 1 << 13;
        /// Alternate interrupt mode
        const ALTINT = 1 << 6;
        /// Energy detected on the line (read-only)
        const ENERGYON = 1 << 1;
    }
}

bitflags! {
    /// Special Control/Status Indication Register (27)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpecialControlStatInd: u16 {
        /// Manual MDIX control
        const AMDIXCTRL = 1 << 15;
        /// Auto-MDIX enable
        const AMDIXEN = 1 << 14;
        /// MDIX state
        const AMDIXSTATE = 1 << 13;
        /// SQE test disable
        const SQEOFF = 1 << 11;
        /// Far-end fault indication enable
        const FEFI_EN = 1 << 5;
        /// Reversed polarity (10BASE-T)
        const XPOL = 1 << 4;
    }
}

bitflags! {
    /// Interrupt Source (29) and Interrupt Mask (30) bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PhyInterrupts: u16 {
        /// Link up
        const LINK_UP = 1 << 9;
        /// Energy detected
        const ENERGYON = 1 << 7;
        /// Auto-negotiation complete
        const AN_COMPLETE = 1 << 6;
        /// Remote fault
        const REMOTE_FAULT = 1 << 5;
        /// Link down
        const LINK_DOWN = 1 << 4;
        /// Link partner acknowledge
        const AN_LP_ACK = 1 << 3;
        /// Parallel detection fault
        const PARALLEL_DETECT_FAULT = 1 << 2;
        /// Auto-negotiation page received
        const AN_PAGE_RECEIVED = 1 << 1;
    }
}

bitflags! {
    /// PHY Special Control/Status Register (31) flag bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SpecialControlStatus: u16 {
        /// Auto-negotiation done
        const AUTODONE = 1 << 12;
    }
}

/// Speed indication field of register 31 (bits 4:2)
pub mod speed_ind {
    /// Field mask
    pub const MASK: u16 = 0x7 << 2;
    /// 10BASE-T half duplex
    pub const HD_10: u16 = 0x1 << 2;
    /// 10BASE-T full duplex
    pub const FD_10: u16 = 0x5 << 2;
    /// 100BASE-TX half duplex
    pub const HD_100: u16 = 0x2 << 2;
    /// 100BASE-TX full duplex
    pub const FD_100: u16 = 0x6 << 2;
}
