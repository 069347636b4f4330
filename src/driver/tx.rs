//! Transmit path.
//!
//! A frame is submitted as one buffer: command A, command B, then the frame
//! bytes zero-padded to a word boundary, all written to TX_DATA_FIFO under a
//! single lock. TX status words are not waited for. They are popped and
//! counted at the start of the next submit and by the interrupt worker, so
//! the status FIFO never fills and stalls the transmitter.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::error::{Error, FifoError, IoError, IoResult, Result};
use super::lan9250::{Hardware, Lan9250, bump};
use crate::internal::constants::{MAX_TX_FRAME_SIZE, TX_COMMAND_OVERHEAD, align4};
use crate::internal::register::{
    FifoInfo, TX_CMD_A_BUFFER_SIZE_MASK, TX_CMD_B_PACKET_LENGTH_MASK, TX_CMD_B_PACKET_TAG_MASK,
    TX_CMD_B_PACKET_TAG_SHIFT,
    TX_STS_ERROR_STATUS, TX_STS_PACKET_TAG_MASK, TX_STS_PACKET_TAG_SHIFT, TxCmdA, addr,
};

// =============================================================================
// Command words
// =============================================================================

/// TX command A/B pair for one buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxCommand {
    /// Command A: segment flags, alignment, offset, buffer size
    pub a: u32,
    /// Command B: packet tag and frame length
    pub b: u32,
}

impl TxCommand {
    /// Commands for a frame sent as a single buffer.
    ///
    /// First and last segment, 4-byte end alignment, zero start offset,
    /// interrupt on completion.
    #[must_use]
    pub const fn single_segment(len: usize, tag: u16) -> Self {
        let len = len as u32;
        let a = TxCmdA::INT_ON_COMP
            .union(TxCmdA::FIRST_SEG)
            .union(TxCmdA::LAST_SEG)
            .bits()
            | (len & TX_CMD_A_BUFFER_SIZE_MASK);
        let b = ((tag as u32) << TX_CMD_B_PACKET_TAG_SHIFT) | (len & TX_CMD_B_PACKET_LENGTH_MASK);
        Self { a, b }
    }

    /// Packet tag carried in command B
    pub const fn tag(&self) -> u16 {
        ((self.b & TX_CMD_B_PACKET_TAG_MASK) >> TX_CMD_B_PACKET_TAG_SHIFT) as u16
    }
}

/// TX FIFO bytes a frame of `len` bytes occupies
#[inline]
pub const fn tx_fifo_footprint(len: usize) -> usize {
    align4(len) + TX_COMMAND_OVERHEAD
}

// =============================================================================
// Transmit
// =============================================================================

impl<SPI: SpiDevice, RST: OutputPin> Lan9250<SPI, RST> {
    /// Queue one Ethernet frame (without FCS) for transmission.
    ///
    /// Returns the number of bytes queued. Nothing is buffered on refusal;
    /// the caller decides whether to retry or drop.
    ///
    /// # Errors
    /// - `InvalidLength` - empty frame
    /// - `FrameTooLarge` - frame longer than 1514 bytes
    /// - `InvalidState` - link not up or bring-up in progress
    /// - `Backpressure` - not enough TX FIFO space right now
    /// - `Bus` - SPI transport failure
    pub fn transmit(&self, frame: &[u8]) -> Result<usize> {
        if frame.is_empty() {
            return Err(FifoError::InvalidLength.into());
        }
        if frame.len() > MAX_TX_FRAME_SIZE {
            return Err(FifoError::FrameTooLarge.into());
        }

        self.lock(|hw| {
            if !hw.ready {
                return Err(Error::Io(IoError::InvalidState));
            }
            hw.submit(frame)
        })
    }

    /// Whether a maximum-size frame would fit in the TX FIFO right now.
    pub fn tx_ready(&self) -> bool {
        self.lock(|hw| {
            hw.ready
                && hw
                    .tx_free()
                    .is_ok_and(|free| free >= tx_fifo_footprint(MAX_TX_FRAME_SIZE))
        })
    }

    /// Free TX data FIFO space in bytes.
    pub fn tx_free_space(&self) -> Result<usize> {
        Ok(self.lock(|hw| hw.tx_free())?)
    }
}

impl<SPI: SpiDevice, RST: OutputPin> Hardware<SPI, RST> {
    fn tx_free(&mut self) -> IoResult<usize> {
        let info = FifoInfo(self.bus.read32(addr::TX_FIFO_INF)?);
        Ok(info.data_bytes() as usize)
    }

    fn submit(&mut self, frame: &[u8]) -> Result<usize> {
        let info = FifoInfo(self.bus.read32(addr::TX_FIFO_INF)?);
        self.pop_tx_status(info.status_used())?;

        if (info.data_bytes() as usize) < tx_fifo_footprint(frame.len()) {
            bump(&mut self.stats.tx_backpressure);
            return Err(FifoError::Backpressure.into());
        }

        let cmd = TxCommand::single_segment(frame.len(), self.next_tag);
        self.next_tag = match self.next_tag.wrapping_add(1) {
            0 => 1,
            tag => tag,
        };

        self.bus.write32(addr::TX_DATA_FIFO, cmd.a)?;
        self.bus.write32(addr::TX_DATA_FIFO, cmd.b)?;
        self.bus.write_fifo(addr::TX_DATA_FIFO, frame)?;

        bump(&mut self.stats.tx_frames);
        Ok(frame.len())
    }

    /// Pop every waiting TX status word, counting completions and errors.
    ///
    /// Returns the number of words popped.
    pub(crate) fn drain_tx_status(&mut self) -> Result<u32> {
        let waiting = FifoInfo(self.bus.read32(addr::TX_FIFO_INF)?).status_used();
        self.pop_tx_status(waiting)?;
        Ok(waiting)
    }

    fn pop_tx_status(&mut self, waiting: u32) -> Result<()> {
        for _ in 0..waiting {
            let status = self.bus.read32(addr::TX_STATUS_FIFO)?;
            if status & TX_STS_ERROR_STATUS != 0 {
                bump(&mut self.stats.tx_errors);
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "TX error: tag {=u32} status {=u32:#x}",
                    (status & TX_STS_PACKET_TAG_MASK) >> TX_STS_PACKET_TAG_SHIFT,
                    status
                );
            } else {
                bump(&mut self.stats.tx_completed);
            }
        }
        Ok(())
    }
}
