//! Host MAC CSR definitions
//!
//! These registers are not addressable over SPI. They are reached through
//! the MAC_CSR_CMD / MAC_CSR_DATA handshake in [`crate::hal::csr`].

use bitflags::bitflags;

/// Host MAC register indices
pub mod reg {
    /// MAC control
    pub const HMAC_CR: u8 = 0x01;
    /// MAC address high (bytes 4..5)
    pub const HMAC_ADDRH: u8 = 0x02;
    /// MAC address low (bytes 0..3)
    pub const HMAC_ADDRL: u8 = 0x03;
    /// Multicast hash table high
    pub const HMAC_HASHH: u8 = 0x04;
    /// Multicast hash table low
    pub const HMAC_HASHL: u8 = 0x05;
    /// MII access
    pub const HMAC_MII_ACC: u8 = 0x06;
    /// MII data
    pub const HMAC_MII_DATA: u8 = 0x07;
}

bitflags! {
    /// MAC control register bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HmacCr: u32 {
        /// Receive all frames
        const RXALL = 1 << 31;
        /// Energy efficient ethernet
        const EEE = 1 << 25;
        /// Disable receive own
        const RCVOWN = 1 << 23;
        /// Internal loopback
        const LOOPBK = 1 << 21;
        /// Full duplex
        const FDPX = 1 << 20;
        /// Pass all multicast
        const MCPAS = 1 << 19;
        /// Promiscuous
        const PRMS = 1 << 18;
        /// Inverse filtering
        const INVFILT = 1 << 17;
        /// Pass bad frames
        const PASSBAD = 1 << 16;
        /// Hash only filtering
        const HO = 1 << 15;
        /// Hash/perfect filtering
        const HPFILT = 1 << 13;
        /// Disable broadcast frames
        const BCAST = 1 << 11;
        /// Disable retry
        const DISRTY = 1 << 10;
        /// Automatic pad stripping
        const PADSTR = 1 << 8;
        /// Deferral check
        const DFCHK = 1 << 5;
        /// Transmitter enable
        const TXEN = 1 << 3;
        /// Receiver enable
        const RXEN = 1 << 2;
    }
}

bitflags! {
    /// MII access register bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MiiAcc: u32 {
        /// Write when set, read when clear
        const MIIW_R = 1 << 1;
        /// MII busy
        const MIIBZY = 1 << 0;
    }
}

/// MII access PHY address field
pub const MII_ACC_PHY_ADDR_MASK: u32 = 0x0000_F800;
/// MII access PHY address shift
pub const MII_ACC_PHY_ADDR_SHIFT: u32 = 11;
/// MII access register index field
pub const MII_ACC_MIIRINDA_MASK: u32 = 0x0000_07C0;
/// MII access register index shift
pub const MII_ACC_MIIRINDA_SHIFT: u32 = 6;

impl MiiAcc {
    /// Build an MII access command word.
    #[inline]
    pub const fn command(phy_addr: u8, reg_addr: u8, write: bool) -> u32 {
        let mut cmd = ((phy_addr as u32) << MII_ACC_PHY_ADDR_SHIFT) & MII_ACC_PHY_ADDR_MASK;
        cmd |= ((reg_addr as u32) << MII_ACC_MIIRINDA_SHIFT) & MII_ACC_MIIRINDA_MASK;
        if write {
            cmd |= Self::MIIW_R.bits();
        }
        cmd | Self::MIIBZY.bits()
    }
}

/// Split a MAC address into the (ADDRL, ADDRH) register pair.
#[inline]
pub const fn mac_address_words(mac: &[u8; 6]) -> (u32, u32) {
    let low = u32::from_le_bytes([mac[0], mac[1], mac[2], mac[3]]);
    let high = u16::from_le_bytes([mac[4], mac[5]]) as u32;
    (low, high)
}
