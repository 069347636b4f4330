//! smoltcp Network Stack Integration
#![cfg_attr(docsrs, doc(cfg(feature = "smoltcp")))]
//!
//! [`Lan9250Interface`] implements `smoltcp::phy::Device` over a shared
//! `&Lan9250`. The device methods take `&self` and lock internally, so the
//! tokens only borrow the device; no raw pointers are involved.
//!
//! The interface polls the RX FIFO itself. Use it instead of an
//! [`RxWorker`](crate::driver::rx::RxWorker), not alongside one, and call
//! [`Lan9250Interface::poll_events`] from the poll loop whenever the
//! interrupt signal fires. That is where link loss is noticed and the
//! chip is brought up again.
//!
//! # Example
//!
//! ```ignore
//! use smoltcp::iface::{Config, Interface, SocketSet};
//! use smoltcp::wire::{IpAddress, IpCidr};
//! use ph_lan9250::integration::smoltcp::{Lan9250Interface, ethernet_address};
//!
//! lan.init(&mut delay)?;
//! let mut device = Lan9250Interface::new(&lan);
//!
//! let config = Config::new(ethernet_address(&lan).into());
//! let mut iface = Interface::new(config, &mut device, smoltcp::time::Instant::ZERO);
//! iface.update_ip_addrs(|addrs| {
//!     addrs.push(IpCidr::new(IpAddress::v4(192, 168, 1, 100), 24)).unwrap();
//! });
//!
//! loop {
//!     if SIGNAL.take() {
//!         device.poll_events(&mut delay)?;
//!     }
//!     iface.poll(now(), &mut device, &mut sockets);
//! }
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use smoltcp::phy::{Device, DeviceCapabilities, Medium};
use smoltcp::time::Instant;

use crate::driver::lan9250::Lan9250;
use crate::driver::error::Result;
use crate::driver::rx::{FrameBuffer, FrameSink, RxPoll, ServiceReport};
use crate::hal::reset::NoResetPin;
use crate::internal::constants::{CRC_SIZE, MAX_TX_FRAME_SIZE};

/// smoltcp device over a shared LAN9250
pub struct Lan9250Interface<'d, SPI, RST = NoResetPin> {
    device: &'d Lan9250<SPI, RST>,
    buffer: FrameBuffer,
}

impl<'d, SPI: SpiDevice, RST: OutputPin> Lan9250Interface<'d, SPI, RST> {
    /// Wrap an initialized device
    pub const fn new(device: &'d Lan9250<SPI, RST>) -> Self {
        Self {
            device,
            buffer: FrameBuffer::new(),
        }
    }

    /// Underlying device
    pub fn device(&self) -> &'d Lan9250<SPI, RST> {
        self.device
    }

    /// Service link and TX status interrupts.
    ///
    /// Frames stay in the RX FIFO for [`Device::receive`]. After a link
    /// loss `receive` and `transmit` hand out no tokens until the link is
    /// back; `report.link_changed` tells the caller to re-check
    /// [`Lan9250::link_status`].
    pub fn poll_events<D: DelayNs>(&mut self, delay: &mut D) -> Result<ServiceReport> {
        self.device.service_events(&mut LinkEvents, delay)
    }

    /// Pop frames until a good one is buffered; its length without FCS.
    fn next_frame(&mut self) -> Option<usize> {
        loop {
            match self.device.receive_frame(&mut self.buffer) {
                Ok(RxPoll::Frame(len)) => return Some(len.saturating_sub(CRC_SIZE)),
                Ok(RxPoll::Dropped(_)) => {}
                Ok(RxPoll::Empty) => return None,
                Err(_e) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("RX poll failed: {}", _e);
                    return None;
                }
            }
        }
    }
}

/// Sink for [`Lan9250::service_events`]; link state is read back from the
/// device afterwards and no frames reach it.
struct LinkEvents;

impl FrameSink for LinkEvents {
    fn deliver(&mut self, _frame: &[u8]) {}
}

// =============================================================================
// Tokens
// =============================================================================

/// Receive token holding one frame, FCS stripped
pub struct Lan9250RxToken<'a> {
    frame: &'a [u8],
}

impl smoltcp::phy::RxToken for Lan9250RxToken<'_> {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&[u8]) -> R,
    {
        f(self.frame)
    }
}

/// Transmit token; the frame is built on the stack and pushed on consume
pub struct Lan9250TxToken<'a, SPI, RST> {
    device: &'a Lan9250<SPI, RST>,
}

impl<SPI: SpiDevice, RST: OutputPin> smoltcp::phy::TxToken for Lan9250TxToken<'_, SPI, RST> {
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let len = len.min(MAX_TX_FRAME_SIZE);
        let mut buffer = [0u8; MAX_TX_FRAME_SIZE];
        let result = f(&mut buffer[..len]);

        // smoltcp retransmits at its own layer
        if let Err(_e) = self.device.transmit(&buffer[..len]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("smoltcp transmit failed: {}", _e);
        }

        result
    }
}

// =============================================================================
// Device Implementation
// =============================================================================

impl<SPI: SpiDevice, RST: OutputPin> Device for Lan9250Interface<'_, SPI, RST> {
    type RxToken<'a>
        = Lan9250RxToken<'a>
    where
        Self: 'a;
    type TxToken<'a>
        = Lan9250TxToken<'a, SPI, RST>
    where
        Self: 'a;

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        if !self.device.is_ready() {
            return None;
        }
        let len = self.next_frame()?;
        Some((
            Lan9250RxToken {
                frame: self.buffer.frame(len),
            },
            Lan9250TxToken {
                device: self.device,
            },
        ))
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        if !self.device.tx_ready() {
            return None;
        }
        Some(Lan9250TxToken {
            device: self.device,
        })
    }

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.medium = Medium::Ethernet;
        // Ethernet medium: the MTU includes the 14-byte header
        caps.max_transmission_unit = MAX_TX_FRAME_SIZE;
        caps.max_burst_size = Some(1);
        caps
    }
}

/// MAC address as a smoltcp `EthernetAddress`
pub fn ethernet_address<SPI: SpiDevice, RST: OutputPin>(
    device: &Lan9250<SPI, RST>,
) -> smoltcp::wire::EthernetAddress {
    smoltcp::wire::EthernetAddress(device.mac_address())
}
