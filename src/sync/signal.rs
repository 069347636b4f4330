//! Interrupt bridge
//!
//! [`InterruptSignal`] is the only thing the interrupt pin handler touches.
//! It holds a single pending flag: any number of edges before the worker
//! wakes collapse into one wake-up, and the worker re-checks the FIFOs after
//! every drain so nothing is lost.
//!
//! ```ignore
//! static SIGNAL: InterruptSignal = InterruptSignal::new();
//!
//! #[interrupt]
//! fn GPIO() {
//!     clear_pin_interrupt();
//!     SIGNAL.signal();
//! }
//! ```

#[cfg(feature = "async")]
use core::future::Future;
#[cfg(feature = "async")]
use core::pin::Pin;
#[cfg(feature = "async")]
use core::task::{Context, Poll};

use embedded_hal::delay::DelayNs;

use super::primitives::CriticalSectionCell;
#[cfg(feature = "async")]
use super::primitives::AtomicWaker;
use crate::internal::constants::SIGNAL_POLL_INTERVAL_US;

/// Single-slot, edge-coalescing wake primitive.
pub struct InterruptSignal {
    pending: CriticalSectionCell<bool>,
    #[cfg(feature = "async")]
    waker: AtomicWaker,
}

impl InterruptSignal {
    /// Create a signal with nothing pending.
    pub const fn new() -> Self {
        Self {
            pending: CriticalSectionCell::new(false),
            #[cfg(feature = "async")]
            waker: AtomicWaker::new(),
        }
    }

    /// Mark an interrupt as pending.
    ///
    /// Safe to call from interrupt context. Performs no bus I/O.
    #[inline]
    pub fn signal(&self) {
        self.pending.with(|p| *p = true);
        #[cfg(feature = "async")]
        self.waker.wake();
    }

    /// Consume the pending flag, returning whether it was set.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.with(core::mem::take)
    }

    /// Whether an interrupt is pending, without consuming it.
    pub fn is_pending(&self) -> bool {
        self.pending.with_ref(|p| *p)
    }

    /// Block until the signal is set, then consume it.
    pub fn wait<D: DelayNs>(&self, delay: &mut D) {
        while !self.take() {
            delay.delay_us(SIGNAL_POLL_INTERVAL_US);
        }
    }

    /// Wait asynchronously until the signal is set, then consume it.
    #[cfg(feature = "async")]
    pub fn wait_async(&self) -> SignalFuture<'_> {
        SignalFuture { signal: self }
    }
}

impl Default for InterruptSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`InterruptSignal::wait_async`].
#[cfg(feature = "async")]
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct SignalFuture<'a> {
    signal: &'a InterruptSignal,
}

#[cfg(feature = "async")]
impl Future for SignalFuture<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        // Register first so a signal between the check and the return wakes us
        self.signal.waker.register(cx.waker());
        if self.signal.take() {
            Poll::Ready(())
        } else {
            Poll::Pending
        }
    }
}
