//! LAN9250 system control and status registers
//!
//! System registers are reached directly over SPI with the register access
//! layer in [`crate::hal::bus`]. Host MAC registers sit behind the indirect
//! CSR bridge and are defined in [`mac`].
//!
//! Each register that the driver reads or modifies gets a typed flag set so
//! read-modify-write sequences stay self-documenting. Multi-bit fields are
//! exposed as masks plus small accessor functions.

use bitflags::bitflags;

pub mod mac;

// =============================================================================
// Register Addresses
// =============================================================================

/// System register byte addresses
pub mod addr {
    /// RX data FIFO port
    pub const RX_DATA_FIFO: u16 = 0x00;
    /// TX data FIFO port
    pub const TX_DATA_FIFO: u16 = 0x20;
    /// RX status FIFO port
    pub const RX_STATUS_FIFO: u16 = 0x40;
    /// RX status FIFO peek
    pub const RX_STATUS_FIFO_PEEK: u16 = 0x44;
    /// TX status FIFO port
    pub const TX_STATUS_FIFO: u16 = 0x48;
    /// Chip ID and revision
    pub const ID_REV: u16 = 0x50;
    /// Interrupt pin configuration
    pub const IRQ_CFG: u16 = 0x54;
    /// Interrupt status
    pub const INT_STS: u16 = 0x58;
    /// Interrupt enable
    pub const INT_EN: u16 = 0x5C;
    /// Byte order test
    pub const BYTE_TEST: u16 = 0x64;
    /// FIFO level interrupts
    pub const FIFO_INT: u16 = 0x68;
    /// Receive configuration
    pub const RX_CFG: u16 = 0x6C;
    /// Transmit configuration
    pub const TX_CFG: u16 = 0x70;
    /// Hardware configuration
    pub const HW_CFG: u16 = 0x74;
    /// RX datapath control
    pub const RX_DP_CTRL: u16 = 0x78;
    /// RX FIFO information
    pub const RX_FIFO_INF: u16 = 0x7C;
    /// TX FIFO information
    pub const TX_FIFO_INF: u16 = 0x80;
    /// Power management control
    pub const PMT_CTRL: u16 = 0x84;
    /// Host MAC CSR interface command
    pub const MAC_CSR_CMD: u16 = 0xA4;
    /// Host MAC CSR interface data
    pub const MAC_CSR_DATA: u16 = 0xA8;
    /// Automatic flow control configuration
    pub const AFC_CFG: u16 = 0xAC;
    /// Reset control
    pub const RESET_CTL: u16 = 0x1F8;
}

// =============================================================================
// Interrupts (INT_STS / INT_EN)
// =============================================================================

bitflags! {
    /// Interrupt causes.
    ///
    /// INT_STS and INT_EN share this layout. Status bits are write-1-to-clear.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Interrupts: u32 {
        /// Software interrupt
        const SW_INT = 1 << 31;
        /// Device ready
        const READY = 1 << 30;
        /// 1588 event
        const EVENT_1588 = 1 << 29;
        /// PHY interrupt
        const PHY_INT = 1 << 26;
        /// Transmitter stopped
        const TXSTOP_INT = 1 << 25;
        /// Receiver stopped
        const RXSTOP_INT = 1 << 24;
        /// RX dropped frame counter halfway
        const RXDFH_INT = 1 << 23;
        /// TX on completion
        const TX_IOC = 1 << 21;
        /// RX DMA
        const RXD_INT = 1 << 20;
        /// General purpose timer
        const GPT_INT = 1 << 19;
        /// Power management event
        const PME_INT = 1 << 17;
        /// TX status FIFO overflow
        const TXSO = 1 << 16;
        /// Receive watchdog timeout
        const RWT = 1 << 15;
        /// Receiver error
        const RXE = 1 << 14;
        /// Transmitter error
        const TXE = 1 << 13;
        /// GPIO
        const GPIO = 1 << 12;
        /// TX data FIFO overrun
        const TDFO = 1 << 10;
        /// TX data FIFO available
        const TDFA = 1 << 9;
        /// TX status FIFO full
        const TSFF = 1 << 8;
        /// TX status FIFO level
        const TSFL = 1 << 7;
        /// RX dropped frame
        const RXDF_INT = 1 << 6;
        /// RX status FIFO full
        const RSFF = 1 << 4;
        /// RX status FIFO level
        const RSFL = 1 << 3;
    }
}

// =============================================================================
// IRQ_CFG
// =============================================================================

bitflags! {
    /// Interrupt pin configuration bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IrqCfg: u32 {
        /// Clear the de-assertion counter
        const INT_DEAS_CLR = 1 << 14;
        /// De-assertion interval active (read-only)
        const INT_DEAS_STS = 1 << 13;
        /// Master interrupt status (read-only)
        const IRQ_INT = 1 << 12;
        /// IRQ output enable
        const IRQ_EN = 1 << 8;
        /// IRQ active high
        const IRQ_POL = 1 << 4;
        /// IRQ clock select
        const IRQ_CLK_SELECT = 1 << 1;
        /// IRQ push-pull (open-drain when clear)
        const IRQ_TYPE = 1 << 0;
    }
}

/// IRQ_CFG de-assertion interval field (units of 10 µs)
pub const IRQ_CFG_INT_DEAS_MASK: u32 = 0xFF00_0000;
/// IRQ_CFG de-assertion interval shift
pub const IRQ_CFG_INT_DEAS_SHIFT: u32 = 24;

impl IrqCfg {
    /// Compose the raw register value with a de-assertion interval.
    #[inline]
    pub const fn with_deassertion(self, interval_10us: u8) -> u32 {
        self.bits() | (((interval_10us as u32) << IRQ_CFG_INT_DEAS_SHIFT) & IRQ_CFG_INT_DEAS_MASK)
    }
}

// =============================================================================
// FIFO_INT
// =============================================================================

/// RX status level field
pub const FIFO_INT_RX_STATUS_LEVEL: u32 = 0x0000_00FF;

// =============================================================================
// TX_CFG
// =============================================================================

bitflags! {
    /// Transmit configuration bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TxCfg: u32 {
        /// Dump the TX status FIFO
        const TXS_DUMP = 1 << 15;
        /// Dump the TX data FIFO
        const TXD_DUMP = 1 << 14;
        /// TX status allow overrun
        const TXSAO = 1 << 2;
        /// Transmitter enable
        const TX_ON = 1 << 1;
        /// Stop transmitter
        const STOP_TX = 1 << 0;
    }
}

// =============================================================================
// HW_CFG
// =============================================================================

bitflags! {
    /// Hardware configuration bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HwCfg: u32 {
        /// Device ready (read-only)
        const DEVICE_READY = 1 << 27;
        /// Auto-MDIX strap state
        const AMDIX_EN_STRAP = 1 << 25;
        /// Must be one
        const MBO = 1 << 20;
    }
}

/// HW_CFG TX FIFO size field (KiB)
pub const HW_CFG_TX_FIF_SZ_MASK: u32 = 0x000F_0000;
/// HW_CFG TX FIFO size shift
pub const HW_CFG_TX_FIF_SZ_SHIFT: u32 = 16;

// =============================================================================
// RX_DP_CTRL
// =============================================================================

bitflags! {
    /// RX datapath control bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RxDpCtrl: u32 {
        /// Fast-forward the current RX frame (self-clearing)
        const RX_FFWD = 1 << 31;
    }
}

// =============================================================================
// FIFO Information
// =============================================================================

/// RX_FIFO_INF / TX_FIFO_INF status-word count field
pub const FIFO_INF_STATUS_USED_MASK: u32 = 0x00FF_0000;
/// Status-word count shift
pub const FIFO_INF_STATUS_USED_SHIFT: u32 = 16;
/// RX data used / TX data free byte count field
pub const FIFO_INF_DATA_MASK: u32 = 0x0000_FFFF;

/// Decoded RX or TX FIFO information register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoInfo(pub u32);

impl FifoInfo {
    /// Number of status words waiting in the status FIFO
    #[inline]
    pub const fn status_used(self) -> u32 {
        (self.0 & FIFO_INF_STATUS_USED_MASK) >> FIFO_INF_STATUS_USED_SHIFT
    }

    /// RX: bytes used in the data FIFO. TX: bytes free in the data FIFO.
    #[inline]
    pub const fn data_bytes(self) -> u32 {
        self.0 & FIFO_INF_DATA_MASK
    }
}

// =============================================================================
// PMT_CTRL
// =============================================================================

bitflags! {
    /// Power management control bits used by the driver
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PmtCtrl: u32 {
        /// Device ready
        const READY = 1 << 0;
    }
}

// =============================================================================
// MAC_CSR_CMD
// =============================================================================

bitflags! {
    /// Host MAC CSR command bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MacCsrCmd: u32 {
        /// Command in progress
        const BUSY = 1 << 31;
        /// Read when set, write when clear
        const READ = 1 << 30;
    }
}

/// MAC_CSR_CMD register index field
pub const MAC_CSR_CMD_ADDR_MASK: u32 = 0x0000_00FF;

impl MacCsrCmd {
    /// Build a command word targeting MAC register `index`.
    #[inline]
    pub const fn command(index: u8, read: bool) -> u32 {
        let mut cmd = Self::BUSY.bits() | (index as u32 & MAC_CSR_CMD_ADDR_MASK);
        if read {
            cmd |= Self::READ.bits();
        }
        cmd
    }
}

// =============================================================================
// RESET_CTL
// =============================================================================

bitflags! {
    /// Reset control bits (self-clearing)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ResetCtl: u32 {
        /// Host MAC reset
        const HMAC_RST = 1 << 5;
        /// PHY reset
        const PHY_RST = 1 << 1;
        /// Digital (whole chip) reset
        const DIGITAL_RST = 1 << 0;
    }
}

// =============================================================================
// ID_REV
// =============================================================================

/// ID_REV chip ID field
pub const ID_REV_CHIP_ID_MASK: u32 = 0xFFFF_0000;
/// ID_REV chip revision field
pub const ID_REV_CHIP_REV_MASK: u32 = 0x0000_FFFF;

// =============================================================================
// TX Command Words
// =============================================================================

bitflags! {
    /// TX command A flags (buffer framing)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TxCmdA: u32 {
        /// Raise TX_IOC when this buffer completes
        const INT_ON_COMP = 1 << 31;
        /// First segment of the frame
        const FIRST_SEG = 1 << 13;
        /// Last segment of the frame
        const LAST_SEG = 1 << 12;
    }
}

/// Command A buffer size field
pub const TX_CMD_A_BUFFER_SIZE_MASK: u32 = 0x0000_07FF;

/// Command B packet tag field
pub const TX_CMD_B_PACKET_TAG_MASK: u32 = 0xFFFF_0000;
/// Command B packet tag shift
pub const TX_CMD_B_PACKET_TAG_SHIFT: u32 = 16;
/// Command B packet length field
pub const TX_CMD_B_PACKET_LENGTH_MASK: u32 = 0x0000_07FF;

// =============================================================================
// Status Words
// =============================================================================

/// RX status packet length field
pub const RX_STS_PACKET_LEN_MASK: u32 = 0x3FFF_0000;
/// RX status packet length shift
pub const RX_STS_PACKET_LEN_SHIFT: u32 = 16;
/// RX status error summary
pub const RX_STS_ERROR_STATUS: u32 = 1 << 15;
/// RX status broadcast frame
pub const RX_STS_BROADCAST: u32 = 1 << 13;
/// RX status multicast frame
pub const RX_STS_MULTICAST: u32 = 1 << 10;
/// RX status CRC error
pub const RX_STS_CRC_ERROR: u32 = 1 << 1;

/// TX status packet tag field
pub const TX_STS_PACKET_TAG_MASK: u32 = 0xFFFF_0000;
/// TX status packet tag shift
pub const TX_STS_PACKET_TAG_SHIFT: u32 = 16;
/// TX status error summary
pub const TX_STS_ERROR_STATUS: u32 = 1 << 15;
