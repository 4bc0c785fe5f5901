// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Clock tree errors.

use thiserror::Error;

/// Errors returned by clock tree operations.
///
/// During construction any of these is fatal to the boot; afterwards they
/// are returned to the caller of the failing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ClockError {
    /// The requested or achievable rate lies outside the declared range
    #[error("rate out of range")]
    RateOutOfRange,
    /// No divisor supported by the hardware gives the requested rate
    #[error("unsupported divisor")]
    UnsupportedDivisor,
    /// Parent index past the end of the candidate list
    #[error("invalid parent index")]
    InvalidParentIndex,
    /// A ready or lock bit did not assert within the polling bound
    #[error("hardware not ready")]
    HardwareNotReady,
    /// A parent reports a zero rate, so it was never configured
    #[error("missing parent rate")]
    MissingParentRate,
    /// The clock kind does not implement the operation
    #[error("operation not supported")]
    NotSupported,
    /// The clock must be disabled before this change
    #[error("clock busy")]
    Busy,
    /// A table row names a parent that does not exist
    #[error("unknown parent")]
    UnknownParent,
    /// A table row names a parent declared after it, or itself
    #[error("invalid topology")]
    InvalidTopology,
    /// Two table rows share a name
    #[error("duplicate clock")]
    DuplicateClock,
    /// The table has more rows than the tree can hold
    #[error("too many clocks")]
    TooManyClocks,
    /// A table row has more candidate parents than a node can hold
    #[error("too many parents")]
    TooManyParents,
}
