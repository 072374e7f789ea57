// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Message register area and the fault message contract.
//!
//! The kernel writes a fault message into the faulting thread's message
//! registers word by word, in the order fixed by the fault's index enum.
//! The handler on the other end of the fault endpoint reads the same words
//! back by position. There is no tag or version inside the message: both
//! sides must be built against the same layouts.

use core::fmt;

use crate::fault::FaultKind;

/// Capacity of the message register area in words.
pub const MSG_MAX_LENGTH: usize = 120;

/// Error when moving a fault message in or out of message registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageError {
    /// Destination has fewer words than the layout needs.
    BufferTooShort {
        /// Words required by the layout.
        needed: usize,
        /// Words available in the destination.
        available: usize,
    },
    /// Source has fewer words than the layout needs.
    Truncated {
        /// Words required by the layout.
        expected: usize,
        /// Words present in the source.
        actual: usize,
    },
    /// The kernel configuration never delivers this fault kind.
    KindUnavailable(FaultKind),
}

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::BufferTooShort { needed, available } => {
                write!(f, "buffer holds {available} words, message needs {needed}")
            }
            Self::Truncated { expected, actual } => {
                write!(f, "message truncated: expected {expected} words, got {actual}")
            }
            Self::KindUnavailable(kind) => {
                write!(f, "{} faults are not delivered by this kernel", kind.name())
            }
        }
    }
}

/// A fault message with a fixed positional layout.
///
/// Implementations are generated per fault kind; `LENGTH` always equals the
/// value of the layout's trailing `Length` index.
pub trait FaultMessage: Sized {
    /// Fault kind this layout belongs to.
    const KIND: FaultKind;

    /// Number of message words.
    const LENGTH: usize;

    /// Writes the message into `mrs`, returning the number of words written.
    ///
    /// Words past `LENGTH` are left untouched.
    fn encode(&self, mrs: &mut [u64]) -> Result<usize, MessageError>;

    /// Reads the message from the first `LENGTH` words of `mrs`.
    ///
    /// Extra trailing words are ignored.
    fn decode(mrs: &[u64]) -> Result<Self, MessageError>;
}

/// Returns the first `len` words of `mrs` for writing.
#[inline]
pub(crate) fn words_mut(mrs: &mut [u64], len: usize) -> Result<&mut [u64], MessageError> {
    let available = mrs.len();
    mrs.get_mut(..len).ok_or(MessageError::BufferTooShort {
        needed: len,
        available,
    })
}

/// Returns the first `len` words of `mrs` for reading.
#[inline]
pub(crate) fn words(mrs: &[u64], len: usize) -> Result<&[u64], MessageError> {
    mrs.get(..len).ok_or(MessageError::Truncated {
        expected: len,
        actual: mrs.len(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn words_mut_checks_capacity() {
        let mut area = [0u64; 4];
        assert_eq!(words_mut(&mut area, 4).unwrap().len(), 4);
        assert_eq!(words_mut(&mut area, 2).unwrap().len(), 2);
        assert_eq!(
            words_mut(&mut area, 5),
            Err(MessageError::BufferTooShort {
                needed: 5,
                available: 4
            })
        );
    }

    #[test]
    fn words_checks_length() {
        let area = [1u64, 2, 3];
        assert_eq!(words(&area, 2).unwrap(), &[1, 2]);
        assert_eq!(
            words(&area, 4),
            Err(MessageError::Truncated {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn error_display() {
        use std::string::ToString as _;

        let err = MessageError::Truncated {
            expected: 4,
            actual: 1,
        };
        assert_eq!(err.to_string(), "message truncated: expected 4 words, got 1");

        let err = MessageError::KindUnavailable(FaultKind::Timeout);
        assert_eq!(err.to_string(), "timeout faults are not delivered by this kernel");
    }
}
