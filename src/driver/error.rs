//! Error types for the LAN9250 driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Bring-up and configuration failures
//! - [`FifoError`]: TX/RX FIFO framing and capacity issues
//! - [`IoError`]: SPI transport and register handshake failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and bring-up errors
///
/// Except for [`ConfigError::InvalidConfig`], these surface from the reset and
/// link bring-up sequence and are fatal for the current attach attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Invalid configuration parameter
    InvalidConfig,
    /// Reset GPIO could not be driven
    GpioError,
    /// Digital reset did not complete within its budget
    ResetFailed,
    /// Byte order test register did not read back the sentinel
    EndiannessMismatch,
    /// ID_REV does not identify a LAN9250
    UnsupportedChip,
    /// Every bring-up attempt failed
    BringUpFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidConfig => "invalid configuration",
            ConfigError::GpioError => "GPIO configuration error",
            ConfigError::ResetFailed => "digital reset failed",
            ConfigError::EndiannessMismatch => "byte order test mismatch",
            ConfigError::UnsupportedChip => "unsupported chip ID",
            ConfigError::BringUpFailed => "link bring-up failed",
        }
    }
}

// =============================================================================
// FIFO Errors
// =============================================================================

/// TX/RX FIFO errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoError {
    /// TX data FIFO lacks room for the frame; retry later
    Backpressure,
    /// Frame exceeds the maximum Ethernet frame size
    FrameTooLarge,
    /// Zero-length frame
    InvalidLength,
}

impl core::fmt::Display for FifoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FifoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FifoError::Backpressure => "TX FIFO full",
            FifoError::FrameTooLarge => "frame too large",
            FifoError::InvalidLength => "invalid frame length",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Bus and handshake errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// SPI transport reported a failure; bus state is suspect
    Bus,
    /// Busy bit or ready flag did not settle within its poll budget
    Timeout,
    /// Operation not valid in the current device state
    InvalidState,
    /// Link did not come up within the link timeout
    LinkTimeout,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Bus => "SPI bus error",
            IoError::Timeout => "operation timed out",
            IoError::InvalidState => "invalid state for operation",
            IoError::LinkTimeout => "link timeout",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match lan.transmit(&frame) {
///     Err(Error::Fifo(FifoError::Backpressure)) => { /* retry later */ }
///     Err(Error::Io(IoError::Bus)) => { /* transport failure */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// FIFO error
    Fifo(FifoError),
    /// I/O error
    Io(IoError),
}

impl Error {
    /// Whether the bring-up sequence may retry after this error.
    ///
    /// Only bounded-poll expiries are transient. Transport failures and
    /// sentinel mismatches point at the wiring and are never retried.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::Io(IoError::Timeout | IoError::LinkTimeout))
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Fifo(e) => write!(f, "fifo: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<FifoError> for Error {
    fn from(e: FifoError) -> Self {
        Error::Fifo(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for driver operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for FIFO operations
pub type FifoResult<T> = core::result::Result<T, FifoError>;

/// Result type alias for register I/O
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
