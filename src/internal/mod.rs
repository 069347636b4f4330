//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//! Types in this module may change without notice between minor versions.
//!
//! # Contents
//!
//! - [`register`]: System and host MAC register definitions
//! - [`phy_regs`]: Integrated PHY register definitions
//! - [`constants`]: Frame sizes, FIFO framing, and polling budgets
//!
//! # Stability
//!
//! **WARNING:** This module is `pub(crate)` only. The typed register flags are
//! re-exported through [`crate::registers`] for diagnostics.

pub(crate) mod constants;
pub(crate) mod phy_regs;
pub(crate) mod register;
