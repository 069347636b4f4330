//! Configuration types for the LAN9250 driver

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{DEFAULT_LINK_TIMEOUT_MS, DEFAULT_MAC_ADDR, DEFAULT_RETRIES};
use crate::internal::register::{HW_CFG_TX_FIF_SZ_MASK, HW_CFG_TX_FIF_SZ_SHIFT, IrqCfg};

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    #[default]
    Mbps100,
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    #[default]
    Full,
}

/// TX FIFO size carved out of the 16 KiB packet buffer.
///
/// The RX FIFO receives the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TxFifoSize {
    /// 2 KiB
    Kb2 = 2,
    /// 3 KiB
    Kb3 = 3,
    /// 4 KiB
    Kb4 = 4,
    /// 5 KiB (reset default)
    #[default]
    Kb5 = 5,
    /// 6 KiB
    Kb6 = 6,
    /// 7 KiB
    Kb7 = 7,
    /// 8 KiB
    Kb8 = 8,
    /// 9 KiB
    Kb9 = 9,
    /// 10 KiB
    Kb10 = 10,
    /// 11 KiB
    Kb11 = 11,
    /// 12 KiB
    Kb12 = 12,
    /// 13 KiB
    Kb13 = 13,
    /// 14 KiB
    Kb14 = 14,
}

impl TxFifoSize {
    /// HW_CFG.TX_FIF_SZ field value
    #[must_use]
    pub const fn to_reg_value(self) -> u32 {
        ((self as u32) << HW_CFG_TX_FIF_SZ_SHIFT) & HW_CFG_TX_FIF_SZ_MASK
    }
}

/// IRQ pin polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqPolarity {
    /// Active low (reset default)
    #[default]
    ActiveLow,
    /// Active high
    ActiveHigh,
}

/// IRQ pin output buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrqBuffer {
    /// Open drain, needs an external pull-up
    OpenDrain,
    /// Push-pull
    #[default]
    PushPull,
}

/// IRQ pin configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqConfig {
    /// Pin polarity
    pub polarity: IrqPolarity,
    /// Output buffer type
    pub buffer: IrqBuffer,
    /// Minimum de-assertion time between interrupts, in 10 µs units
    pub deassertion_10us: u8,
}

impl IrqConfig {
    /// Push-pull, active low, 100 µs de-assertion
    #[must_use]
    pub const fn new() -> Self {
        Self {
            polarity: IrqPolarity::ActiveLow,
            buffer: IrqBuffer::PushPull,
            deassertion_10us: 10,
        }
    }

    /// IRQ_CFG register value with the IRQ output enabled
    #[must_use]
    pub const fn to_reg_value(&self) -> u32 {
        let mut flags = IrqCfg::IRQ_EN;
        if matches!(self.polarity, IrqPolarity::ActiveHigh) {
            flags = flags.union(IrqCfg::IRQ_POL);
        }
        if matches!(self.buffer, IrqBuffer::PushPull) {
            flags = flags.union(IrqCfg::IRQ_TYPE);
        }
        flags.with_deassertion(self.deassertion_10us)
    }
}

impl Default for IrqConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// LAN9250 driver configuration
///
/// Supplied once at device construction; there is no runtime reconfiguration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lan9250Config {
    /// Station MAC address
    pub mac_address: [u8; 6],
    /// Duplex mode to advertise and program into the MAC
    pub duplex: Duplex,
    /// Time allowed for auto-negotiation per bring-up attempt (ms)
    pub link_timeout_ms: u32,
    /// Number of bring-up attempts before giving up
    pub retry_count: u8,
    /// TX FIFO size
    pub tx_fifo_size: TxFifoSize,
    /// Interrupt pin configuration
    pub irq: IrqConfig,
    /// Receive all frames regardless of destination
    pub promiscuous: bool,
    /// Receive all multicast frames
    pub pass_all_multicast: bool,
    /// Receive broadcast frames
    pub accept_broadcast: bool,
}

impl Default for Lan9250Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Lan9250Config {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            duplex: Duplex::Full,
            link_timeout_ms: DEFAULT_LINK_TIMEOUT_MS,
            retry_count: DEFAULT_RETRIES,
            tx_fifo_size: TxFifoSize::Kb5,
            irq: IrqConfig::new(),
            promiscuous: false,
            pass_all_multicast: false,
            accept_broadcast: true,
        }
    }

    /// Set the MAC address
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; 6]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the duplex mode
    #[must_use]
    pub const fn with_duplex(mut self, duplex: Duplex) -> Self {
        self.duplex = duplex;
        self
    }

    /// Set the per-attempt link timeout in milliseconds
    #[must_use]
    pub const fn with_link_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.link_timeout_ms = timeout_ms;
        self
    }

    /// Set the number of bring-up attempts
    #[must_use]
    pub const fn with_retry_count(mut self, retries: u8) -> Self {
        self.retry_count = retries;
        self
    }

    /// Set the TX FIFO size
    #[must_use]
    pub const fn with_tx_fifo_size(mut self, size: TxFifoSize) -> Self {
        self.tx_fifo_size = size;
        self
    }

    /// Set the interrupt pin configuration
    #[must_use]
    pub const fn with_irq(mut self, irq: IrqConfig) -> Self {
        self.irq = irq;
        self
    }

    /// Enable or disable promiscuous mode
    #[must_use]
    pub const fn with_promiscuous(mut self, enabled: bool) -> Self {
        self.promiscuous = enabled;
        self
    }

    /// Enable or disable receiving all multicast frames
    #[must_use]
    pub const fn with_pass_all_multicast(mut self, enabled: bool) -> Self {
        self.pass_all_multicast = enabled;
        self
    }

    /// Enable or disable receiving broadcast frames
    #[must_use]
    pub const fn with_broadcast(mut self, enabled: bool) -> Self {
        self.accept_broadcast = enabled;
        self
    }

    /// Check the configuration for values the bring-up sequence cannot use.
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.retry_count == 0 || self.link_timeout_ms == 0 {
            return Err(ConfigError::InvalidConfig);
        }
        // Group bit set: not a station address
        if self.mac_address[0] & 0x01 != 0 {
            return Err(ConfigError::InvalidConfig);
        }
        Ok(())
    }
}
