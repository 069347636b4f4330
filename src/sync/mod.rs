//! Synchronization support
//!
//! - [`CriticalSectionCell`]: the device lock; every SPI exchange runs inside it
//! - [`InterruptSignal`]: single-slot wake set by the interrupt pin handler
//! - [`AtomicWaker`]: waker slot behind the `async` feature

mod primitives;
mod signal;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;
#[cfg(feature = "async")]
pub use signal::SignalFuture;
pub use signal::InterruptSignal;
