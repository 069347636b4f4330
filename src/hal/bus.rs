//! SPI register access layer
//!
//! Every chip access is one SPI transaction: an instruction byte, a 16-bit
//! big-endian register address, then little-endian 32-bit data words.
//!
//! ```text
//! write32(0x0074, 0x1234_5678):  02 00 74 78 56 34 12
//! read32(0x0064):                03 00 64 | 21 43 65 87
//! ```
//!
//! [`ChipBus`] is only reachable through the device lock, so holding a
//! `&mut ChipBus` is what makes a transaction exclusive.

use embedded_hal::spi::{Operation, SpiDevice};

use crate::driver::error::{IoError, IoResult};
use crate::internal::constants::FIFO_WORD_SIZE;

/// SPI instruction bytes
pub mod instruction {
    /// Serial read
    pub const READ: u8 = 0x03;
    /// Serial write
    pub const WRITE: u8 = 0x02;
}

/// Instruction + address header preceding every data phase.
#[inline]
pub const fn command_header(instruction: u8, address: u16) -> [u8; 3] {
    let [hi, lo] = address.to_be_bytes();
    [instruction, hi, lo]
}

/// Owned SPI device plus the direct register primitives built on it.
#[derive(Debug)]
pub struct ChipBus<SPI> {
    spi: SPI,
}

impl<SPI: SpiDevice> ChipBus<SPI> {
    /// Wrap an SPI device (chip select is managed by the device).
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Read a 32-bit system register.
    pub fn read32(&mut self, address: u16) -> IoResult<u32> {
        let header = command_header(instruction::READ, address);
        let mut data = [0u8; 4];
        self.spi
            .transaction(&mut [Operation::Write(&header), Operation::Read(&mut data)])
            .map_err(|_| IoError::Bus)?;
        Ok(u32::from_le_bytes(data))
    }

    /// Write a 32-bit system register.
    pub fn write32(&mut self, address: u16, value: u32) -> IoResult<()> {
        let mut frame = [0u8; 7];
        frame[..3].copy_from_slice(&command_header(instruction::WRITE, address));
        frame[3..].copy_from_slice(&value.to_le_bytes());
        self.spi.write(&frame).map_err(|_| IoError::Bus)
    }

    /// Read-modify-write a system register.
    pub fn modify32<F>(&mut self, address: u16, f: F) -> IoResult<u32>
    where
        F: FnOnce(u32) -> u32,
    {
        let value = f(self.read32(address)?);
        self.write32(address, value)?;
        Ok(value)
    }

    /// Burst-read FIFO words into `buf`.
    ///
    /// `buf.len()` should be a multiple of the FIFO word size; the chip pops
    /// whole words regardless.
    pub fn read_fifo(&mut self, address: u16, buf: &mut [u8]) -> IoResult<()> {
        if buf.is_empty() {
            return Ok(());
        }
        let header = command_header(instruction::READ, address);
        self.spi
            .transaction(&mut [Operation::Write(&header), Operation::Read(buf)])
            .map_err(|_| IoError::Bus)
    }

    /// Burst-write `data` to a FIFO port, zero-padded to a word boundary.
    pub fn write_fifo(&mut self, address: u16, data: &[u8]) -> IoResult<()> {
        let header = command_header(instruction::WRITE, address);
        let pad = [0u8; FIFO_WORD_SIZE];
        let pad_len = (FIFO_WORD_SIZE - data.len() % FIFO_WORD_SIZE) % FIFO_WORD_SIZE;
        self.spi
            .transaction(&mut [
                Operation::Write(&header),
                Operation::Write(data),
                Operation::Write(&pad[..pad_len]),
            ])
            .map_err(|_| IoError::Bus)
    }

    /// Give the SPI device back.
    pub fn free(self) -> SPI {
        self.spi
    }
}
