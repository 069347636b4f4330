//! Driver-wide constants.
//!
//! Frame sizes, FIFO framing overheads, and the polling budgets used by the
//! bounded busy-wait loops of the register bridges and the bring-up sequence.

// =============================================================================
// Frame Sizes
// =============================================================================

/// Ethernet MAC address length
pub const MAC_ADDR_LEN: usize = 6;

/// Ethernet header size (dst + src + ethertype)
pub const ETH_HEADER_SIZE: usize = 14;

/// Ethernet frame check sequence size
pub const CRC_SIZE: usize = 4;

/// Standard Ethernet MTU (payload only)
pub const MTU: usize = 1500;

/// Largest frame accepted by `transmit` (header + payload, FCS added by the MAC)
pub const MAX_TX_FRAME_SIZE: usize = ETH_HEADER_SIZE + MTU;

/// Largest frame length an RX status word may report (FCS included)
pub const MAX_FRAME_SIZE: usize = MAX_TX_FRAME_SIZE + CRC_SIZE;

/// Receive frame buffer capacity (max frame rounded up to FIFO word size)
pub const FRAME_BUFFER_SIZE: usize = align4(MAX_FRAME_SIZE);

/// Default locally-administered MAC address
pub const DEFAULT_MAC_ADDR: [u8; 6] = [0x02, 0x00, 0x00, 0x92, 0x50, 0x01];

// =============================================================================
// FIFO Framing
// =============================================================================

/// FIFO word granularity in bytes
pub const FIFO_WORD_SIZE: usize = 4;

/// TX command A + command B words preceding each frame
pub const TX_COMMAND_OVERHEAD: usize = 2 * FIFO_WORD_SIZE;

/// Round a byte count up to the FIFO word size.
#[inline]
pub const fn align4(len: usize) -> usize {
    (len + 3) & !3
}

// =============================================================================
// Chip Identity
// =============================================================================

/// Byte order test register sentinel
pub const BYTE_TEST_PATTERN: u32 = 0x8765_4321;

/// Chip ID reported in the upper half of ID_REV
pub const LAN9250_CHIP_ID: u16 = 0x9250;

/// Address of the integrated PHY on the internal MII bus
pub const INTERNAL_PHY_ADDR: u8 = 1;

// =============================================================================
// Timing
// =============================================================================

/// Default number of bring-up attempts
pub const DEFAULT_RETRIES: u8 = 3;

/// MAC CSR busy poll budget (iterations of 1 µs)
pub const CSR_BUSY_TIMEOUT: u32 = 2_000;

/// MII busy poll budget (iterations of 1 µs)
pub const MII_BUSY_TIMEOUT: u32 = 2_000;

/// Delay between busy-bit polls of the indirect bridges in microseconds
pub const BUSY_POLL_INTERVAL_US: u32 = 1;

/// Reset / device-ready poll budget (iterations)
pub const RESET_TIMEOUT: u32 = 5_000;

/// Delay between reset polls in microseconds
pub const RESET_POLL_INTERVAL_US: u32 = 10;

/// PHY soft reset completion poll budget (BMCR reads)
pub const PHY_RESET_MAX_ATTEMPTS: u32 = 1_000;

/// RX fast-forward completion poll budget (iterations)
pub const RX_FFWD_TIMEOUT: u32 = 1_000;

/// Hardware reset pulse width in microseconds
pub const RESET_PULSE_US: u32 = 200;

/// Recovery time after releasing the reset line in microseconds
pub const RESET_RECOVERY_US: u32 = 1_000;

/// Default auto-negotiation / link timeout in milliseconds
pub const DEFAULT_LINK_TIMEOUT_MS: u32 = 5_000;

/// Interval between link polls during bring-up in milliseconds
pub const LINK_POLL_INTERVAL_MS: u32 = 10;

/// Interval between interrupt signal checks in the blocking worker loop
pub const SIGNAL_POLL_INTERVAL_US: u32 = 100;
