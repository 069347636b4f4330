//! Testing utilities and mock implementations
//!
//! Host-side models of the chip, the PHY register file, the reset line and
//! delay providers, so the driver can be exercised without hardware.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

use crate::driver::error::Result;
use crate::hal::bus::instruction;
use crate::hal::mdio::MdioBus;
use crate::internal::constants::align4;
use crate::internal::phy_regs::lan9250::{PhyInterrupts, SpecialControlStatus, reg as phy_vendor, speed_ind};
use crate::internal::phy_regs::standard::{Bmcr, Bmsr, phy_reg};
use crate::internal::register::mac::{MII_ACC_MIIRINDA_SHIFT, MII_ACC_PHY_ADDR_SHIFT, MiiAcc, reg};
use crate::internal::register::{
    HwCfg, Interrupts, MAC_CSR_CMD_ADDR_MASK, MacCsrCmd, PmtCtrl, ResetCtl, RxDpCtrl,
    TX_CMD_A_BUFFER_SIZE_MASK, TX_CMD_B_PACKET_TAG_SHIFT, TX_STS_ERROR_STATUS, addr,
};

const DEFAULT_BYTE_TEST: u32 = 0x8765_4321;
const DEFAULT_ID_REV: u32 = 0x9250_0001;
const DEFAULT_FIFO_INT: u32 = 0x4800_0000;
const DEFAULT_TX_FREE: u32 = 0x1200;

/// TX status FIFO depth in words
pub const TX_STATUS_FIFO_DEPTH: usize = 128;

const PHY_BMCR_DEFAULT: u16 = 0x3100;
const PHY_BMSR_DEFAULT: u16 = 0x7809;
const PHY_ID1: u16 = 0x0007;
const PHY_ID2: u16 = 0xC140;
const PHY_ANAR_DEFAULT: u16 = 0x01E1;

// =============================================================================
// Mock LAN9250
// =============================================================================

/// One frame assembled from the TX data FIFO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRecord {
    pub cmd_a: u32,
    pub cmd_b: u32,
    pub data: Vec<u8>,
}

/// Register-level model of the chip behind an SPI device
///
/// Clones share state, so a test keeps one handle for inspection while the
/// driver owns another.
#[derive(Debug, Clone, Default)]
pub struct MockLan9250 {
    model: Arc<Mutex<ChipModel>>,
    active: Arc<AtomicBool>,
    overlaps: Arc<AtomicU32>,
}

#[derive(Debug)]
struct ChipModel {
    registers: HashMap<u16, u32>,
    mac: HashMap<u8, u32>,
    phy: HashMap<u8, u16>,
    byte_test: u32,
    id_rev: u32,
    int_sts: u32,
    log: Vec<Vec<u8>>,
    fail_transactions: u32,

    csr_busy: bool,
    csr_stuck_busy: bool,
    csr_command_reads: u32,
    mii_busy: bool,
    mii_stuck_busy: bool,
    mii_phy_addresses: Vec<u8>,
    commands_while_busy: u32,

    reset_stuck: bool,
    device_ready_stuck: bool,
    digital_resets: u32,

    phy_isr: u16,
    link_up: bool,
    link_partner: bool,
    connect_after: Option<u32>,
    an_restarts: u32,

    rx_status: VecDeque<(u32, usize)>,
    rx_data: VecDeque<u8>,
    rx_current_remaining: usize,
    ffwd_count: u32,

    tx_stream: Vec<u8>,
    tx_pending: Option<(u32, u32)>,
    tx_frames: Vec<TxRecord>,
    tx_status: VecDeque<u32>,
    /// Frames the transmitter holds back while the status FIFO is full
    tx_held: VecDeque<(TxRecord, u32)>,
    tx_free: u32,
    fail_next_tx_status: bool,
    rx_ffwd_stuck: bool,
}

impl Default for ChipModel {
    fn default() -> Self {
        let mut model = Self {
            registers: HashMap::new(),
            mac: HashMap::new(),
            phy: HashMap::new(),
            byte_test: DEFAULT_BYTE_TEST,
            id_rev: DEFAULT_ID_REV,
            int_sts: 0,
            log: Vec::new(),
            fail_transactions: 0,
            csr_busy: false,
            csr_stuck_busy: false,
            csr_command_reads: 0,
            mii_busy: false,
            mii_stuck_busy: false,
            mii_phy_addresses: Vec::new(),
            commands_while_busy: 0,
            reset_stuck: false,
            device_ready_stuck: false,
            digital_resets: 0,
            phy_isr: 0,
            link_up: false,
            link_partner: false,
            connect_after: None,
            an_restarts: 0,
            rx_status: VecDeque::new(),
            rx_data: VecDeque::new(),
            rx_current_remaining: 0,
            ffwd_count: 0,
            tx_stream: Vec::new(),
            tx_pending: None,
            tx_frames: Vec::new(),
            tx_status: VecDeque::new(),
            tx_held: VecDeque::new(),
            tx_free: DEFAULT_TX_FREE,
            fail_next_tx_status: false,
            rx_ffwd_stuck: false,
        };
        model.power_on();
        model
    }
}

impl ChipModel {
    /// Register file contents after power-on or a digital reset
    fn power_on(&mut self) {
        self.registers.clear();
        self.registers.insert(addr::FIFO_INT, DEFAULT_FIFO_INT);
        self.mac.clear();
        self.csr_busy = false;
        self.mii_busy = false;
        self.int_sts = 0;
        self.rx_status.clear();
        self.rx_data.clear();
        self.rx_current_remaining = 0;
        self.tx_stream.clear();
        self.tx_pending = None;
        self.tx_status.clear();
        self.tx_held.clear();
        self.phy_reset();
    }

    fn phy_reset(&mut self) {
        self.phy.clear();
        self.phy.insert(phy_reg::BMCR, PHY_BMCR_DEFAULT);
        self.phy.insert(phy_reg::BMSR, PHY_BMSR_DEFAULT);
        self.phy.insert(phy_reg::PHYIDR1, PHY_ID1);
        self.phy.insert(phy_reg::PHYIDR2, PHY_ID2);
        self.phy.insert(phy_reg::ANAR, PHY_ANAR_DEFAULT);
        self.phy_isr = 0;
        self.link_up = false;
    }

    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> core::result::Result<(), spi::ErrorKind> {
        if self.fail_transactions > 0 {
            self.fail_transactions -= 1;
            return Err(spi::ErrorKind::Other);
        }

        let mut written = Vec::new();
        for op in operations.iter_mut() {
            match op {
                Operation::Write(bytes) => written.extend_from_slice(bytes),
                Operation::Read(buf) => {
                    if written.len() < 3 || written[0] != instruction::READ {
                        return Err(spi::ErrorKind::Other);
                    }
                    let address = u16::from_be_bytes([written[1], written[2]]);
                    for chunk in buf.chunks_mut(4) {
                        let value = self.read_register(address);
                        chunk.copy_from_slice(&value.to_le_bytes()[..chunk.len()]);
                    }
                }
                _ => return Err(spi::ErrorKind::Other),
            }
        }
        self.log.push(written.clone());

        if written.len() >= 3 && written[0] == instruction::WRITE {
            let address = u16::from_be_bytes([written[1], written[2]]);
            let payload = &written[3..];
            if address == addr::TX_DATA_FIFO {
                self.push_tx_bytes(payload);
            } else {
                for word in payload.chunks_exact(4) {
                    let value = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
                    self.write_register(address, value);
                }
            }
        }
        Ok(())
    }

    fn read_register(&mut self, address: u16) -> u32 {
        match address {
            addr::BYTE_TEST => self.byte_test,
            addr::ID_REV => self.id_rev,
            addr::PMT_CTRL => {
                if self.reset_stuck {
                    0
                } else {
                    PmtCtrl::READY.bits()
                }
            }
            addr::RESET_CTL => {
                if self.reset_stuck {
                    ResetCtl::DIGITAL_RST.bits()
                } else {
                    0
                }
            }
            addr::HW_CFG => {
                let stored = self.stored(address);
                if self.device_ready_stuck {
                    stored & !HwCfg::DEVICE_READY.bits()
                } else {
                    stored | HwCfg::DEVICE_READY.bits()
                }
            }
            addr::INT_STS => self.interrupt_status(),
            addr::RX_FIFO_INF => ((self.rx_status.len() as u32) << 16) | self.rx_data.len() as u32,
            addr::TX_FIFO_INF => ((self.tx_status.len() as u32) << 16) | self.tx_free_now(),
            addr::RX_STATUS_FIFO => match self.rx_status.pop_front() {
                Some((status, padded)) => {
                    self.rx_current_remaining = padded;
                    status
                }
                None => 0,
            },
            addr::RX_DATA_FIFO => {
                let mut word = [0u8; 4];
                for byte in &mut word {
                    *byte = self.rx_data.pop_front().unwrap_or(0);
                }
                self.rx_current_remaining = self.rx_current_remaining.saturating_sub(4);
                u32::from_le_bytes(word)
            }
            addr::TX_STATUS_FIFO => {
                let status = self.tx_status.pop_front().unwrap_or(0);
                self.release_held_tx();
                status
            }
            addr::RX_DP_CTRL => {
                if self.rx_ffwd_stuck {
                    RxDpCtrl::RX_FFWD.bits()
                } else {
                    0
                }
            }
            addr::MAC_CSR_CMD => {
                self.csr_command_reads += 1;
                if self.csr_busy {
                    MacCsrCmd::BUSY.bits()
                } else {
                    0
                }
            }
            _ => self.stored(address),
        }
    }

    fn write_register(&mut self, address: u16, value: u32) {
        match address {
            addr::RESET_CTL => {
                if value & ResetCtl::DIGITAL_RST.bits() != 0 {
                    self.digital_resets += 1;
                    if !self.reset_stuck {
                        self.power_on();
                    }
                }
            }
            addr::INT_STS => self.int_sts &= !value,
            addr::RX_DP_CTRL => {
                if value & RxDpCtrl::RX_FFWD.bits() != 0 && !self.rx_ffwd_stuck {
                    let discard = self.rx_current_remaining.min(self.rx_data.len());
                    self.rx_data.drain(..discard);
                    self.rx_current_remaining = 0;
                    self.ffwd_count += 1;
                }
            }
            addr::MAC_CSR_CMD => self.csr_command(value),
            _ => {
                self.registers.insert(address, value);
            }
        }
    }

    fn stored(&self, address: u16) -> u32 {
        self.registers.get(&address).copied().unwrap_or(0)
    }

    fn interrupt_status(&self) -> u32 {
        let mut status = self.int_sts;
        if !self.rx_status.is_empty() {
            status |= Interrupts::RSFL.bits();
        }
        if !self.tx_status.is_empty() {
            status |= Interrupts::TSFL.bits();
        }
        status
    }

    // -------------------------------------------------------------------------
    // MAC CSR bridge
    // -------------------------------------------------------------------------

    fn csr_command(&mut self, value: u32) {
        if value & MacCsrCmd::BUSY.bits() == 0 {
            return;
        }
        if self.csr_busy {
            self.commands_while_busy += 1;
        }
        if self.csr_stuck_busy {
            self.csr_busy = true;
            return;
        }
        let index = (value & MAC_CSR_CMD_ADDR_MASK) as u8;
        if value & MacCsrCmd::READ.bits() != 0 {
            let data = self.mac_read(index);
            self.registers.insert(addr::MAC_CSR_DATA, data);
        } else {
            let data = self.stored(addr::MAC_CSR_DATA);
            self.mac_write(index, data);
        }
        self.csr_busy = false;
    }

    fn mac_read(&mut self, index: u8) -> u32 {
        let value = self.mac.get(&index).copied().unwrap_or(0);
        if index == reg::HMAC_MII_ACC && self.mii_busy {
            value | MiiAcc::MIIBZY.bits()
        } else {
            value
        }
    }

    fn mac_write(&mut self, index: u8, value: u32) {
        if index != reg::HMAC_MII_ACC {
            self.mac.insert(index, value);
            return;
        }

        if value & MiiAcc::MIIBZY.bits() == 0 {
            return;
        }
        if self.mii_busy {
            self.commands_while_busy += 1;
        }
        let phy_addr = ((value >> MII_ACC_PHY_ADDR_SHIFT) & 0x1F) as u8;
        let reg_addr = ((value >> MII_ACC_MIIRINDA_SHIFT) & 0x1F) as u8;
        self.mii_phy_addresses.push(phy_addr);
        self.mac.insert(index, value & !MiiAcc::MIIBZY.bits());
        if self.mii_stuck_busy {
            self.mii_busy = true;
            return;
        }

        if value & MiiAcc::MIIW_R.bits() != 0 {
            let data = self.mac.get(&reg::HMAC_MII_DATA).copied().unwrap_or(0);
            self.phy_write(reg_addr, (data & 0xFFFF) as u16);
        } else {
            let data = self.phy_read(reg_addr);
            self.mac.insert(reg::HMAC_MII_DATA, u32::from(data));
        }
    }

    // -------------------------------------------------------------------------
    // Integrated PHY
    // -------------------------------------------------------------------------

    fn phy_read(&mut self, reg_addr: u8) -> u16 {
        match reg_addr {
            phy_reg::BMSR => {
                let base = self.phy.get(&reg_addr).copied().unwrap_or(0);
                if self.link_up {
                    base | (Bmsr::LINK_STATUS | Bmsr::AN_COMPLETE).bits()
                } else {
                    base
                }
            }
            phy_vendor::INTERRUPT_SOURCE => {
                let source = self.phy_isr;
                self.phy_isr = 0;
                self.int_sts &= !Interrupts::PHY_INT.bits();
                source
            }
            phy_vendor::SPECIAL_CONTROL_STATUS => {
                if self.link_up {
                    SpecialControlStatus::AUTODONE.bits() | speed_ind::FD_100
                } else {
                    0
                }
            }
            _ => self.phy.get(&reg_addr).copied().unwrap_or(0),
        }
    }

    fn phy_write(&mut self, reg_addr: u8, value: u16) {
        if reg_addr != phy_reg::BMCR {
            self.phy.insert(reg_addr, value);
            return;
        }

        if value & Bmcr::RESET.bits() != 0 {
            self.phy_reset();
            return;
        }
        self.phy.insert(reg_addr, value & !Bmcr::AN_RESTART.bits());
        if value & Bmcr::AN_RESTART.bits() != 0 {
            self.an_restarts += 1;
            if self.connect_after.is_some_and(|n| self.an_restarts >= n) {
                self.link_partner = true;
            }
            if self.link_partner {
                self.link_up = true;
                self.raise_phy_event(PhyInterrupts::LINK_UP | PhyInterrupts::AN_COMPLETE);
            }
        }
    }

    fn raise_phy_event(&mut self, events: PhyInterrupts) {
        self.phy_isr |= events.bits();
        let mask = self.phy.get(&phy_vendor::INTERRUPT_MASK).copied().unwrap_or(0);
        if mask & events.bits() != 0 {
            self.int_sts |= Interrupts::PHY_INT.bits();
        }
    }

    // -------------------------------------------------------------------------
    // TX data FIFO
    // -------------------------------------------------------------------------

    fn push_tx_bytes(&mut self, bytes: &[u8]) {
        self.tx_stream.extend_from_slice(bytes);
        loop {
            match self.tx_pending {
                None if self.tx_stream.len() >= 8 => {
                    let words: Vec<u32> = self
                        .tx_stream
                        .drain(..8)
                        .collect::<Vec<u8>>()
                        .chunks_exact(4)
                        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
                        .collect();
                    self.tx_pending = Some((words[0], words[1]));
                }
                Some((cmd_a, cmd_b)) => {
                    let size = (cmd_a & TX_CMD_A_BUFFER_SIZE_MASK) as usize;
                    let padded = align4(size);
                    if self.tx_stream.len() < padded {
                        return;
                    }
                    let mut data: Vec<u8> = self.tx_stream.drain(..padded).collect();
                    data.truncate(size);
                    self.tx_pending = None;

                    let mut status = (cmd_b >> TX_CMD_B_PACKET_TAG_SHIFT) << 16;
                    if core::mem::take(&mut self.fail_next_tx_status) {
                        status |= TX_STS_ERROR_STATUS;
                    }
                    self.tx_held.push_back((TxRecord { cmd_a, cmd_b, data }, status));
                    self.release_held_tx();
                }
                None => return,
            }
        }
    }

    /// Send held frames while the status FIFO has room; with TXSAO clear a
    /// full status FIFO halts the transmitter.
    fn release_held_tx(&mut self) {
        while self.tx_status.len() < TX_STATUS_FIFO_DEPTH {
            let Some((record, status)) = self.tx_held.pop_front() else {
                return;
            };
            self.tx_frames.push(record);
            self.tx_status.push_back(status);
        }
    }

    /// Free data FIFO space minus what held frames still occupy
    fn tx_free_now(&self) -> u32 {
        let held: usize = self
            .tx_held
            .iter()
            .map(|(record, _)| align4(record.data.len()) + 8)
            .sum();
        self.tx_free.saturating_sub(held as u32)
    }

    fn queue_rx(&mut self, status: u32, data: &[u8]) {
        let padded = align4(data.len());
        self.rx_data.extend(data.iter().copied());
        self.rx_data.extend(core::iter::repeat_n(0u8, padded - data.len()));
        self.rx_status.push_back((status, padded));
    }
}

impl MockLan9250 {
    pub fn new() -> Self {
        Self::default()
    }

    fn model(&self) -> MutexGuard<'_, ChipModel> {
        self.model.lock().unwrap()
    }

    // --- transaction log -----------------------------------------------------

    /// Bytes written in each transaction; reads log only their header
    pub fn transactions(&self) -> Vec<Vec<u8>> {
        self.model().log.clone()
    }

    pub fn clear_transactions(&self) {
        self.model().log.clear();
    }

    /// Every single-word register write as `(address, value)`
    pub fn sys_writes(&self) -> Vec<(u16, u32)> {
        self.model()
            .log
            .iter()
            .filter(|t| t.len() == 7 && t[0] == instruction::WRITE)
            .map(|t| {
                (
                    u16::from_be_bytes([t[1], t[2]]),
                    u32::from_le_bytes([t[3], t[4], t[5], t[6]]),
                )
            })
            .collect()
    }

    pub fn sys_register(&self, address: u16) -> u32 {
        self.model().stored(address)
    }

    pub fn mac_register(&self, index: u8) -> u32 {
        self.model().mac.get(&index).copied().unwrap_or(0)
    }

    pub fn phy_register(&self, reg_addr: u8) -> u16 {
        self.model().phy.get(&reg_addr).copied().unwrap_or(0)
    }

    pub fn fail_next_transactions(&self, count: u32) {
        self.model().fail_transactions = count;
    }

    /// Transactions that started while another one was still in flight
    pub fn overlapping_transactions(&self) -> u32 {
        self.overlaps.load(Ordering::SeqCst)
    }

    // --- CSR / MII bridges ---------------------------------------------------

    pub fn set_csr_stuck_busy(&self, stuck: bool) {
        self.model().csr_stuck_busy = stuck;
    }

    pub fn set_mii_stuck_busy(&self, stuck: bool) {
        self.model().mii_stuck_busy = stuck;
    }

    pub fn csr_command_reads(&self) -> u32 {
        self.model().csr_command_reads
    }

    /// Commands issued while a CSR or MII command was still busy
    pub fn commands_while_busy(&self) -> u32 {
        self.model().commands_while_busy
    }

    pub fn mii_phy_addresses(&self) -> Vec<u8> {
        self.model().mii_phy_addresses.clone()
    }

    // --- reset and identity --------------------------------------------------

    pub fn set_reset_stuck(&self, stuck: bool) {
        self.model().reset_stuck = stuck;
    }

    pub fn set_device_ready_stuck(&self, stuck: bool) {
        self.model().device_ready_stuck = stuck;
    }

    pub fn digital_resets(&self) -> u32 {
        self.model().digital_resets
    }

    pub fn set_byte_test(&self, value: u32) {
        self.model().byte_test = value;
    }

    pub fn set_chip_id(&self, id_rev: u32) {
        self.model().id_rev = id_rev;
    }

    // --- link ----------------------------------------------------------------

    /// Whether auto-negotiation finds a partner on the next restart
    pub fn set_link_partner(&self, present: bool) {
        self.model().link_partner = present;
    }

    /// A partner appears once auto-negotiation has been restarted `count` times
    pub fn connect_link_partner_after_an_restarts(&self, count: u32) {
        self.model().connect_after = Some(count);
    }

    pub fn an_restarts(&self) -> u32 {
        self.model().an_restarts
    }

    pub fn simulate_link_drop(&self) {
        let mut model = self.model();
        model.link_up = false;
        model.raise_phy_event(PhyInterrupts::LINK_DOWN);
    }

    /// Link comes back if a partner is present
    pub fn simulate_link_restore(&self) {
        let mut model = self.model();
        if model.link_partner {
            model.link_up = true;
            model.raise_phy_event(PhyInterrupts::LINK_UP | PhyInterrupts::AN_COMPLETE);
        }
    }

    pub fn raise_interrupt(&self, flags: Interrupts) {
        self.model().int_sts |= flags.bits();
    }

    // --- FIFOs ---------------------------------------------------------------

    /// Queue a good frame; its status carries the frame length
    pub fn queue_rx_frame(&self, data: &[u8]) {
        let status = (data.len() as u32) << 16;
        self.model().queue_rx(status, data);
    }

    /// Queue a frame with an arbitrary status word
    pub fn queue_rx_raw(&self, status: u32, data: &[u8]) {
        self.model().queue_rx(status, data);
    }

    pub fn ffwd_count(&self) -> u32 {
        self.model().ffwd_count
    }

    /// RX_FFWD never self-clears and discards nothing
    pub fn set_rx_ffwd_stuck(&self, stuck: bool) {
        self.model().rx_ffwd_stuck = stuck;
    }

    pub fn set_tx_free(&self, bytes: u32) {
        self.model().tx_free = bytes;
    }

    pub fn tx_frames(&self) -> Vec<TxRecord> {
        self.model().tx_frames.clone()
    }

    /// TX status words waiting to be popped
    pub fn tx_status_pending(&self) -> usize {
        self.model().tx_status.len()
    }

    /// Frames held back by a full TX status FIFO
    pub fn tx_frames_held(&self) -> usize {
        self.model().tx_held.len()
    }

    /// Push `count` completion words, up to the FIFO depth
    pub fn fill_tx_status(&self, count: u32) {
        let mut model = self.model();
        for _ in 0..count {
            if model.tx_status.len() >= TX_STATUS_FIFO_DEPTH {
                break;
            }
            model.tx_status.push_back(0);
        }
    }

    /// Report the next completed frame with the error bit set
    pub fn fail_next_tx_status(&self) {
        self.model().fail_next_tx_status = true;
    }
}

impl spi::ErrorType for MockLan9250 {
    type Error = spi::ErrorKind;
}

impl SpiDevice for MockLan9250 {
    fn transaction(
        &mut self,
        operations: &mut [Operation<'_, u8>],
    ) -> core::result::Result<(), Self::Error> {
        if self.active.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        std::thread::yield_now();
        let result = self.model().transaction(operations);
        self.active.store(false, Ordering::SeqCst);
        result
    }
}

// =============================================================================
// Mock reset pin
// =============================================================================

/// Output pin recording every level it was driven to
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    levels: Arc<Mutex<Vec<bool>>>,
    failing: bool,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin whose every operation fails
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn levels(&self) -> Vec<bool> {
        self.levels.lock().unwrap().clone()
    }

    fn drive(&mut self, high: bool) -> core::result::Result<(), digital::ErrorKind> {
        if self.failing {
            return Err(digital::ErrorKind::Other);
        }
        self.levels.lock().unwrap().push(high);
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(true)
    }
}

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing PHY drivers without hardware
///
/// This allows setting up expected register values and verifying writes.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.setup_lan9250(1);
/// mdio.simulate_link_up(1, speed_ind::FD_100);
///
/// let phy = InternalPhy::new();
/// assert!(phy.link_status(&mut mdio).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (phy_addr, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u8), u16>>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// BMCR reads that still report RESET after a soft reset
    reset_reads: Cell<u32>,
    reset_reads_left: Cell<u32>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.registers
            .borrow_mut()
            .insert((phy_addr, reg_addr), value);
    }

    /// Get a register value
    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> u16 {
        self.registers
            .borrow()
            .get(&(phy_addr, reg_addr))
            .copied()
            .unwrap_or(0)
    }

    /// Get all writes that occurred
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        self.write_log.borrow_mut().clear();
    }

    /// Keep BMCR.RESET set for `reads` reads after each soft reset
    pub fn set_reset_reads(&self, reads: u32) {
        self.reset_reads.set(reads);
    }

    /// Setup the integrated PHY's identity and capabilities, link down
    pub fn setup_lan9250(&self, phy_addr: u8) {
        self.set_register(phy_addr, phy_reg::BMCR, PHY_BMCR_DEFAULT);
        self.set_register(phy_addr, phy_reg::BMSR, PHY_BMSR_DEFAULT);
        self.set_register(phy_addr, phy_reg::PHYIDR1, PHY_ID1);
        self.set_register(phy_addr, phy_reg::PHYIDR2, PHY_ID2);
        self.set_register(phy_addr, phy_reg::ANAR, PHY_ANAR_DEFAULT);
    }

    /// Simulate a negotiated link with the given speed indication
    pub fn simulate_link_up(&self, phy_addr: u8, speed: u16) {
        let bmsr = self.get_register(phy_addr, phy_reg::BMSR);
        self.set_register(
            phy_addr,
            phy_reg::BMSR,
            bmsr | (Bmsr::LINK_STATUS | Bmsr::AN_COMPLETE).bits(),
        );
        self.set_register(
            phy_addr,
            phy_vendor::SPECIAL_CONTROL_STATUS,
            SpecialControlStatus::AUTODONE.bits() | (speed & speed_ind::MASK),
        );
    }

    /// Simulate link down
    pub fn simulate_link_down(&self, phy_addr: u8) {
        let bmsr = self.get_register(phy_addr, phy_reg::BMSR);
        self.set_register(
            phy_addr,
            phy_reg::BMSR,
            bmsr & !(Bmsr::LINK_STATUS | Bmsr::AN_COMPLETE).bits(),
        );
        self.set_register(phy_addr, phy_vendor::SPECIAL_CONTROL_STATUS, 0);
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        let value = self.get_register(phy_addr, reg_addr);
        match reg_addr {
            phy_reg::BMCR if self.reset_reads_left.get() > 0 => {
                self.reset_reads_left.set(self.reset_reads_left.get() - 1);
                Ok(value | Bmcr::RESET.bits())
            }
            phy_vendor::INTERRUPT_SOURCE => {
                self.set_register(phy_addr, reg_addr, 0);
                Ok(value)
            }
            _ => Ok(value),
        }
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));
        if reg_addr == phy_reg::BMCR && value & Bmcr::RESET.bits() != 0 {
            self.reset_reads_left.set(self.reset_reads.get());
            self.set_register(phy_addr, reg_addr, value & !Bmcr::RESET.bits());
        } else {
            self.set_register(phy_addr, reg_addr, value);
        }
        Ok(())
    }
}

// =============================================================================
// Delays
// =============================================================================

/// Mock delay provider that tracks total delay time
#[derive(Debug, Default)]
pub struct MockDelay {
    total_ns: Cell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total delay in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }

    /// Get total delay in milliseconds
    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        self.total_ns.set(0);
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

/// Delay that actually sleeps, for tests that cross threads
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::bus::ChipBus;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0, 1).unwrap(), 0);

        mdio.set_register(0, 1, 0x1234);
        assert_eq!(mdio.read(0, 1).unwrap(), 0x1234);

        // Write updates the value
        mdio.write(0, 1, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 1).unwrap(), 0x5678);

        // Write is logged
        assert_eq!(mdio.get_writes(), std::vec![(0, 1, 0x5678)]);
    }

    #[test]
    fn mock_mdio_lan9250_setup() {
        let mut mdio = MockMdioBus::new();
        mdio.setup_lan9250(1);

        assert_eq!(mdio.read(1, phy_reg::PHYIDR1).unwrap(), PHY_ID1);
        let bmsr = Bmsr::from_bits_retain(mdio.read(1, phy_reg::BMSR).unwrap());
        assert!(bmsr.contains(Bmsr::TX_FD_CAPABLE));
        assert!(!bmsr.contains(Bmsr::LINK_STATUS));
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        delay.delay_ns(1000);
        delay.delay_ns(2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0); // Less than 1ms

        delay.delay_ns(1_000_000);
        assert_eq!(delay.total_ms(), 1);
    }

    #[test]
    fn mock_chip_assembles_tx_frames() {
        let chip = MockLan9250::new();
        let mut bus = ChipBus::new(chip.clone());

        bus.write32(addr::TX_DATA_FIFO, 0x0000_3005).unwrap();
        bus.write32(addr::TX_DATA_FIFO, 0x0007_0005).unwrap();
        bus.write_fifo(addr::TX_DATA_FIFO, &[1, 2, 3, 4, 5]).unwrap();

        let frames = chip.tx_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].data, std::vec![1, 2, 3, 4, 5]);
        assert_eq!(bus.read32(addr::TX_STATUS_FIFO).unwrap(), 0x0007_0000);
    }

    #[test]
    fn mock_chip_halts_tx_while_status_fifo_is_full() {
        let chip = MockLan9250::new();
        let mut bus = ChipBus::new(chip.clone());
        chip.fill_tx_status(TX_STATUS_FIFO_DEPTH as u32 + 10);
        assert_eq!(chip.tx_status_pending(), TX_STATUS_FIFO_DEPTH);

        bus.write32(addr::TX_DATA_FIFO, 0x0000_3004).unwrap();
        bus.write32(addr::TX_DATA_FIFO, 0x0009_0004).unwrap();
        bus.write_fifo(addr::TX_DATA_FIFO, &[1, 2, 3, 4]).unwrap();

        assert!(chip.tx_frames().is_empty());
        assert_eq!(chip.tx_frames_held(), 1);
        let info = bus.read32(addr::TX_FIFO_INF).unwrap();
        assert_eq!(info >> 16, TX_STATUS_FIFO_DEPTH as u32);
        assert_eq!(info & 0xFFFF, DEFAULT_TX_FREE - 12);

        bus.read32(addr::TX_STATUS_FIFO).unwrap();

        assert_eq!(chip.tx_frames().len(), 1);
        assert_eq!(chip.tx_frames_held(), 0);
        assert_eq!(chip.tx_status_pending(), TX_STATUS_FIFO_DEPTH);
    }

    #[test]
    fn mock_chip_reset_restores_defaults() {
        let chip = MockLan9250::new();
        let mut bus = ChipBus::new(chip.clone());

        bus.write32(addr::FIFO_INT, 0).unwrap();
        bus.write32(addr::RESET_CTL, ResetCtl::DIGITAL_RST.bits()).unwrap();

        assert_eq!(chip.digital_resets(), 1);
        assert_eq!(chip.sys_register(addr::FIFO_INT), DEFAULT_FIFO_INT);
    }
}
