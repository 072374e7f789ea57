// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Untyped memory size bounds.
//!
//! The kernel refuses to retype untyped objects outside
//! `[MIN_UNTYPED_BITS, MAX_UNTYPED_BITS]`. [`UntypedBits`] carries a size
//! that has already been checked against those bounds.

use core::fmt;

/// Smallest untyped object size bits.
pub const MIN_UNTYPED_BITS: u32 = 4;

/// Largest untyped object size bits.
pub const MAX_UNTYPED_BITS: u32 = 38;

/// Error for an untyped size outside the kernel's bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UntypedError {
    /// Size bits below `MIN_UNTYPED_BITS`.
    TooSmall {
        /// Requested size bits.
        bits: u32,
    },
    /// Size bits above `MAX_UNTYPED_BITS`.
    TooLarge {
        /// Requested size bits.
        bits: u32,
    },
}

impl fmt::Display for UntypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::TooSmall { bits } => {
                write!(f, "{bits} bits is below the minimum of {MIN_UNTYPED_BITS}")
            }
            Self::TooLarge { bits } => {
                write!(f, "{bits} bits is above the maximum of {MAX_UNTYPED_BITS}")
            }
        }
    }
}

/// Untyped size bits within the kernel's bounds.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct UntypedBits(u32);

impl UntypedBits {
    /// Smallest legal untyped size.
    pub const MIN: Self = Self(MIN_UNTYPED_BITS);

    /// Largest legal untyped size.
    pub const MAX: Self = Self(MAX_UNTYPED_BITS);

    /// Checks `bits` against the untyped bounds.
    #[inline]
    pub const fn new(bits: u32) -> Result<Self, UntypedError> {
        if bits < MIN_UNTYPED_BITS {
            Err(UntypedError::TooSmall { bits })
        } else if bits > MAX_UNTYPED_BITS {
            Err(UntypedError::TooLarge { bits })
        } else {
            Ok(Self(bits))
        }
    }

    /// Returns the raw size bits.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the size in bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> u64 {
        1 << self.0
    }

    /// Returns true if an object of `size_bits` fits in this untyped.
    #[inline]
    #[must_use]
    pub const fn can_hold(self, size_bits: u32) -> bool {
        size_bits <= self.0
    }
}

impl fmt::Debug for UntypedBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UntypedBits({})", self.0)
    }
}

impl TryFrom<u32> for UntypedBits {
    type Error = UntypedError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

const _: () = assert!(
    MIN_UNTYPED_BITS <= MAX_UNTYPED_BITS,
    "untyped bounds are inverted"
);
