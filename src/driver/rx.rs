//! Receive path and interrupt worker.
//!
//! [`RxWorker`] is the long-lived receive loop. It sleeps on the
//! [`InterruptSignal`] and on each wake:
//!
//! 1. reads INT_STS and pops any TX status words
//! 2. drains RX frames one at a time, delivering each to the [`FrameSink`]
//! 3. inspects the PHY when it raised an interrupt, re-running bring-up if
//!    the link dropped
//! 4. writes the observed INT_STS bits back, then re-checks the RX status
//!    FIFO and repeats while frames are still waiting
//!
//! [`Lan9250::service_events`] runs steps 1, 3 and 4 without touching the RX
//! FIFOs, for callers that read frames themselves.
//!
//! Each register sequence takes the device lock on its own. Frames are
//! delivered with the lock released, so a sink may call
//! [`Lan9250::transmit`] from inside [`FrameSink::deliver`].

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use super::bringup::BringUpState;
use super::error::{ConfigError, Error, Result};
use super::interrupt::InterruptStatus;
use super::lan9250::{Hardware, Lan9250, bump};
use crate::hal::mdio::MdioController;
use crate::internal::constants::{FRAME_BUFFER_SIZE, MAX_FRAME_SIZE, RX_FFWD_TIMEOUT, align4};
use crate::internal::register::{
    FifoInfo, RX_STS_BROADCAST, RX_STS_CRC_ERROR, RX_STS_ERROR_STATUS, RX_STS_MULTICAST,
    RX_STS_PACKET_LEN_MASK, RX_STS_PACKET_LEN_SHIFT, RxDpCtrl, addr,
};
use crate::phy::{InternalPhy, LinkStatus};
use crate::sync::InterruptSignal;

// =============================================================================
// RX status word
// =============================================================================

/// One word popped from RX_STATUS_FIFO
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxStatus(pub u32);

impl RxStatus {
    /// Frame length in bytes, FCS included
    #[inline]
    pub const fn frame_length(self) -> usize {
        ((self.0 & RX_STS_PACKET_LEN_MASK) >> RX_STS_PACKET_LEN_SHIFT) as usize
    }

    /// Error summary bit
    #[inline]
    pub const fn has_error(self) -> bool {
        self.0 & RX_STS_ERROR_STATUS != 0
    }

    /// FCS check failed
    #[inline]
    pub const fn has_crc_error(self) -> bool {
        self.0 & RX_STS_CRC_ERROR != 0
    }

    /// Broadcast destination
    #[inline]
    pub const fn is_broadcast(self) -> bool {
        self.0 & RX_STS_BROADCAST != 0
    }

    /// Multicast destination
    #[inline]
    pub const fn is_multicast(self) -> bool {
        self.0 & RX_STS_MULTICAST != 0
    }

    /// Length fits a frame buffer and is non-zero
    #[inline]
    pub const fn is_plausible(self) -> bool {
        let len = self.frame_length();
        len > 0 && len <= MAX_FRAME_SIZE
    }
}

// =============================================================================
// Frame buffer
// =============================================================================

/// Reusable receive buffer, sized for a maximum frame plus FIFO padding
pub struct FrameBuffer {
    data: [u8; FRAME_BUFFER_SIZE],
}

impl FrameBuffer {
    /// Zeroed buffer
    pub const fn new() -> Self {
        Self {
            data: [0; FRAME_BUFFER_SIZE],
        }
    }

    /// First `len` bytes
    #[inline]
    pub fn frame(&self, len: usize) -> &[u8] {
        &self.data[..len.min(FRAME_BUFFER_SIZE)]
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one RX FIFO pop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxPoll {
    /// No status word waiting
    Empty,
    /// A good frame of this length is in the buffer
    Frame(usize),
    /// A frame was discarded (receive error or malformed status)
    Dropped(RxStatus),
}

impl<SPI: SpiDevice, RST: OutputPin> Lan9250<SPI, RST> {
    /// Pop at most one frame from the RX FIFOs into `buf`.
    ///
    /// A status word with an implausible length is skipped with the RX
    /// fast-forward and counted as an error; a frame with the error bit is
    /// read out and dropped. Neither is reported as an `Err`.
    pub fn receive_frame(&self, buf: &mut FrameBuffer) -> Result<RxPoll> {
        self.lock(|hw| hw.receive_frame(buf))
    }

    /// Whether RX status words are waiting
    pub fn rx_available(&self) -> Result<bool> {
        let info = self.lock(|hw| hw.bus.read32(addr::RX_FIFO_INF))?;
        Ok(FifoInfo(info).status_used() > 0)
    }
}

impl<SPI: SpiDevice, RST: OutputPin> Hardware<SPI, RST> {
    fn receive_frame(&mut self, buf: &mut FrameBuffer) -> Result<RxPoll> {
        let info = FifoInfo(self.bus.read32(addr::RX_FIFO_INF)?);
        if info.status_used() == 0 {
            return Ok(RxPoll::Empty);
        }

        let status = RxStatus(self.bus.read32(addr::RX_STATUS_FIFO)?);
        if !status.is_plausible() {
            bump(&mut self.stats.rx_errors);
            #[cfg(feature = "defmt")]
            defmt::warn!("malformed RX status {=u32:#x}", status.0);
            if !self.fast_forward()? {
                #[cfg(feature = "defmt")]
                defmt::warn!("RX fast-forward did not complete");
            }
            return Ok(RxPoll::Dropped(status));
        }

        let len = status.frame_length();
        self.bus
            .read_fifo(addr::RX_DATA_FIFO, &mut buf.data[..align4(len)])?;

        if status.has_error() {
            bump(&mut self.stats.rx_dropped);
            #[cfg(feature = "defmt")]
            defmt::debug!("RX frame dropped, status {=u32:#x}", status.0);
            return Ok(RxPoll::Dropped(status));
        }

        bump(&mut self.stats.rx_frames);
        Ok(RxPoll::Frame(len))
    }

    /// Discard the current frame's data without reading it.
    ///
    /// Returns `false` if RX_FFWD never self-cleared. The frame is still
    /// counted as dropped; only transport errors are returned.
    fn fast_forward(&mut self) -> Result<bool> {
        self.bus.write32(addr::RX_DP_CTRL, RxDpCtrl::RX_FFWD.bits())?;
        for _ in 0..RX_FFWD_TIMEOUT {
            let ctrl = RxDpCtrl::from_bits_retain(self.bus.read32(addr::RX_DP_CTRL)?);
            if !ctrl.contains(RxDpCtrl::RX_FFWD) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

// =============================================================================
// Frame sink
// =============================================================================

/// Network stack side of the receive path
pub trait FrameSink {
    /// Take one received frame (FCS included).
    ///
    /// The slice is only valid for the duration of the call.
    fn deliver(&mut self, frame: &[u8]);

    /// Link went up (`Some`) or down (`None`).
    fn link_changed(&mut self, link: Option<LinkStatus>) {
        let _ = link;
    }
}

impl<F: FnMut(&[u8])> FrameSink for F {
    fn deliver(&mut self, frame: &[u8]) {
        self(frame);
    }
}

/// What one [`RxWorker::service`] call did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ServiceReport {
    /// Frames handed to the sink
    pub delivered: u32,
    /// Frames discarded
    pub dropped: u32,
    /// TX status words popped
    pub tx_status: u32,
    /// A link transition was reported to the sink
    pub link_changed: bool,
}

// =============================================================================
// Non-RX interrupt causes
// =============================================================================

impl<SPI: SpiDevice, RST: OutputPin> Lan9250<SPI, RST> {
    /// Service every interrupt cause except RX draining.
    ///
    /// Pops TX status words and, on a PHY interrupt, re-reads the link and
    /// reports any transition to `sink`; a lost link runs a full bring-up.
    /// The observed INT_STS bits are written back. For setups that read
    /// frames themselves instead of running an [`RxWorker`].
    pub fn service_events<S: FrameSink, D: DelayNs>(
        &self,
        sink: &mut S,
        delay: &mut D,
    ) -> Result<ServiceReport> {
        let mut report = ServiceReport::default();
        let status = self.lock(|hw| hw.latch_events(&mut report))?;
        if status.phy_event() {
            self.handle_phy_event(sink, delay, &mut report)?;
        }
        self.lock(|hw| hw.bus.write32(addr::INT_STS, status.to_raw()))?;
        Ok(report)
    }

    fn handle_phy_event<S: FrameSink, D: DelayNs>(
        &self,
        sink: &mut S,
        delay: &mut D,
        report: &mut ServiceReport,
    ) -> Result<()> {
        let (link, previous) = self.lock(|hw| -> Result<_> {
            let mut mdio = MdioController::new(&mut hw.bus, &mut *delay);
            let phy = InternalPhy::new();
            let _source = phy.read_interrupt_source(&mut mdio)?;
            #[cfg(feature = "defmt")]
            defmt::debug!("PHY interrupt source {=u16:#x}", _source.bits());
            let link = phy.link_status(&mut mdio)?;
            Ok((link, hw.link))
        })?;

        match (previous, link) {
            (_, Some(link)) if previous != Some(link) => {
                self.lock(|hw| {
                    hw.link = Some(link);
                    hw.ready = true;
                    bump(&mut hw.stats.link_changes);
                    hw.enter(BringUpState::LinkUp);
                });
                #[cfg(feature = "defmt")]
                defmt::info!("link up: {}", link);
                sink.link_changed(Some(link));
                report.link_changed = true;
            }
            (Some(_), None) => {
                self.lock(|hw| {
                    hw.link = None;
                    hw.ready = false;
                    bump(&mut hw.stats.link_changes);
                    hw.enter(BringUpState::LinkDown);
                });
                #[cfg(feature = "defmt")]
                defmt::info!("link down");
                sink.link_changed(None);
                report.link_changed = true;
                self.recover_link(sink, delay)?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Full reset and bring-up after the link dropped.
    ///
    /// Exhausted retries leave the link down without failing the caller;
    /// the PHY interrupt stays armed, so the next link-up event is seen.
    fn recover_link<S: FrameSink, D: DelayNs>(&self, sink: &mut S, delay: &mut D) -> Result<()> {
        match self.init(delay) {
            Ok(link) => {
                self.lock(|hw| bump(&mut hw.stats.link_changes));
                sink.link_changed(Some(link));
                Ok(())
            }
            Err(Error::Config(ConfigError::BringUpFailed)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("link recovery failed, waiting for PHY event");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

impl<SPI: SpiDevice, RST: OutputPin> Hardware<SPI, RST> {
    /// Read INT_STS, pop TX status words and count overruns.
    fn latch_events(&mut self, report: &mut ServiceReport) -> Result<InterruptStatus> {
        let status = InterruptStatus::from_raw(self.bus.read32(addr::INT_STS)?);
        report.tx_status += self.drain_tx_status()?;
        if status.rx_overrun() {
            bump(&mut self.stats.rx_overruns);
        }
        Ok(status)
    }
}

// =============================================================================
// Worker
// =============================================================================

/// Interrupt-driven receive worker
///
/// Owns the frame buffer and a delay for bus polling; borrows the device and
/// the signal set by the interrupt pin handler.
///
/// # Example
/// ```ignore
/// static SIGNAL: InterruptSignal = InterruptSignal::new();
///
/// let mut worker = RxWorker::new(&lan, &SIGNAL, delay);
/// let err = worker.run(&mut |frame: &[u8]| stack.push(frame));
/// ```
pub struct RxWorker<'d, SPI, RST, D> {
    device: &'d Lan9250<SPI, RST>,
    signal: &'d InterruptSignal,
    buffer: FrameBuffer,
    delay: D,
}

impl<'d, SPI: SpiDevice, RST: OutputPin, D: DelayNs> RxWorker<'d, SPI, RST, D> {
    /// Create a worker
    pub fn new(device: &'d Lan9250<SPI, RST>, signal: &'d InterruptSignal, delay: D) -> Self {
        Self {
            device,
            signal,
            buffer: FrameBuffer::new(),
            delay,
        }
    }

    /// Service the chip if an interrupt is pending.
    pub fn poll<S: FrameSink>(&mut self, sink: &mut S) -> Result<Option<ServiceReport>> {
        if !self.signal.take() {
            return Ok(None);
        }
        self.service(sink).map(Some)
    }

    /// Wait for interrupts and service them until a fatal error.
    pub fn run<S: FrameSink>(&mut self, sink: &mut S) -> Result<Infallible> {
        loop {
            self.signal.wait(&mut self.delay);
            self.service(sink)?;
        }
    }

    /// [`run`](Self::run) with an asynchronous wait.
    #[cfg(feature = "async")]
    pub async fn run_async<S: FrameSink>(&mut self, sink: &mut S) -> Result<Infallible> {
        loop {
            self.signal.wait_async().await;
            self.service(sink)?;
        }
    }

    /// Service every pending cause once, repeating while RX frames remain.
    pub fn service<S: FrameSink>(&mut self, sink: &mut S) -> Result<ServiceReport> {
        let mut report = ServiceReport::default();

        loop {
            let status = self.device.lock(|hw| hw.latch_events(&mut report))?;

            self.drain_rx(sink, &mut report)?;

            if status.phy_event() {
                self.device
                    .handle_phy_event(sink, &mut self.delay, &mut report)?;
            }

            let more = self.device.lock(|hw| -> Result<bool> {
                hw.bus.write32(addr::INT_STS, status.to_raw())?;
                Ok(FifoInfo(hw.bus.read32(addr::RX_FIFO_INF)?).status_used() > 0)
            })?;
            if !more {
                return Ok(report);
            }
        }
    }

    fn drain_rx<S: FrameSink>(&mut self, sink: &mut S, report: &mut ServiceReport) -> Result<()> {
        loop {
            match self.device.receive_frame(&mut self.buffer)? {
                RxPoll::Empty => return Ok(()),
                RxPoll::Frame(len) => {
                    sink.deliver(self.buffer.frame(len));
                    report.delivered += 1;
                }
                RxPoll::Dropped(_) => report.dropped += 1,
            }
        }
    }

    /// Device this worker services
    pub fn device(&self) -> &'d Lan9250<SPI, RST> {
        self.device
    }

    /// Stop the worker and give the delay back.
    pub fn into_delay(self) -> D {
        self.delay
    }
}
