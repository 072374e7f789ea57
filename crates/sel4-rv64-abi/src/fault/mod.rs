// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! RISC-V64 fault message layouts.
//!
//! Each layout comes in two shapes:
//! - an index enum (`VmFaultMsg`, ...) whose variants are the message
//!   register positions `0..N`, followed by a `Length` variant equal to `N`
//! - a struct (`VmFault`, ...) with one `u64` per position, in the same order
//!
//! # Layouts
//!
//! | Kind | Length | MCS only |
//! |------|--------|----------|
//! | `VMFault` | 4 | no |
//! | `UnknownSyscall` | 11 | no |
//! | `UserException` | 4 | no |
//! | `TimeoutReply` | 32 | yes |
//! | `Timeout` | 2 | yes |

use core::fmt;

use crate::config::BuildConfig;
use crate::message::{FaultMessage as _, MessageError};

/// Declares one fault message layout.
///
/// Generates the index enum with its trailing `Length`, the field struct,
/// positional conversions, the [`crate::message::FaultMessage`] impl and compile-time checks
/// that `Length` matches the field count and that indices are contiguous.
macro_rules! fault_message {
    (
        $(#[$msg_meta:meta])*
        enum $msg:ident;
        $(#[$struct_meta:meta])*
        struct $name:ident: $kind:ident, $prefix:literal, $len:literal {
            $(
                $(#[$field_meta:meta])*
                $variant:ident = $suffix:literal => $field:ident,
            )+
        }
    ) => {
        $(#[$msg_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(usize)]
        pub enum $msg {
            $(
                $(#[$field_meta])*
                $variant,
            )+
            /// Number of message words; not a register position.
            Length,
        }

        impl $msg {
            /// Every register position, in message order.
            pub const FIELDS: [Self; $len] = [$(Self::$variant),+];

            /// Kernel names of the register positions, in message order.
            pub const C_NAMES: [&'static str; $len] = [$(concat!($prefix, "_", $suffix)),+];

            /// Kernel name of the enum type.
            pub const C_TYPE: &'static str = concat!($prefix, "_Msg");

            /// Kernel name of the `Length` value.
            pub const C_LENGTH: &'static str = concat!($prefix, "_Length");

            /// Returns the message register position.
            #[inline]
            #[must_use]
            pub const fn index(self) -> usize {
                self as usize
            }

            /// Returns the kernel name of this position (or of `Length`).
            #[inline]
            #[must_use]
            pub const fn name(self) -> &'static str {
                match Self::from_index(self.index()) {
                    Some(_) => Self::C_NAMES[self.index()],
                    None => Self::C_LENGTH,
                }
            }

            /// Returns the field at message register position `index`.
            #[inline]
            #[must_use]
            pub const fn from_index(index: usize) -> Option<Self> {
                if index < $len {
                    Some(Self::FIELDS[index])
                } else {
                    None
                }
            }
        }

        $(#[$struct_meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        #[repr(C)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: u64,
            )+
        }

        impl $name {
            /// Returns the message words in register order.
            #[inline]
            #[must_use]
            pub const fn to_mrs(&self) -> [u64; $len] {
                [$(self.$field),+]
            }

            /// Builds the message from words in register order.
            #[inline]
            #[must_use]
            pub const fn from_mrs(mrs: [u64; $len]) -> Self {
                let [$($field),+] = mrs;
                Self { $($field),+ }
            }

            /// Returns the word at register position `field`.
            ///
            /// `None` for the `Length` sentinel.
            #[inline]
            #[must_use]
            pub const fn get(&self, field: $msg) -> Option<u64> {
                match field {
                    $($msg::$variant => Some(self.$field),)+
                    $msg::Length => None,
                }
            }
        }

        impl crate::message::FaultMessage for $name {
            const KIND: crate::fault::FaultKind = crate::fault::FaultKind::$kind;
            const LENGTH: usize = $msg::Length as usize;

            #[inline]
            fn encode(&self, mrs: &mut [u64]) -> Result<usize, crate::message::MessageError> {
                let dst = crate::message::words_mut(mrs, Self::LENGTH)?;
                dst.copy_from_slice(&self.to_mrs());
                Ok(Self::LENGTH)
            }

            #[inline]
            fn decode(mrs: &[u64]) -> Result<Self, crate::message::MessageError> {
                let src = crate::message::words(mrs, Self::LENGTH)?;
                let mut words = [0; $len];
                words.copy_from_slice(src);
                Ok(Self::from_mrs(words))
            }
        }

        const _: () = {
            assert!(
                $msg::Length as usize == $len,
                concat!(stringify!($msg), "::Length must equal the field count")
            );
            assert!(
                $len <= crate::message::MSG_MAX_LENGTH,
                concat!(stringify!($name), " exceeds the message register area")
            );
            assert!(
                core::mem::size_of::<$name>() == $len * core::mem::size_of::<u64>(),
                concat!(stringify!($name), " must be exactly one word per field")
            );
            let mut i = 0;
            while i < $len {
                assert!(
                    $msg::FIELDS[i] as usize == i,
                    concat!(stringify!($msg), " indices must be contiguous from 0")
                );
                i += 1;
            }
        };
    };
}

mod timeout;
mod unknown_syscall;
mod user_exception;
mod vm_fault;


pub use timeout::{Timeout, TimeoutMsg, TimeoutReply, TimeoutReplyMsg};
pub use unknown_syscall::{UNKNOWN_SYSCALL_ARGS, UnknownSyscall, UnknownSyscallMsg};
pub use user_exception::{UserException, UserExceptionMsg};
pub use vm_fault::{VmFault, VmFaultMsg};

// =============================================================================
// Fault Kinds
// =============================================================================

/// Architecture-specific fault message kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaultKind {
    /// Memory access fault.
    VmFault = 0,
    /// System call with an unrecognised number.
    UnknownSyscall = 1,
    /// Architectural exception.
    UserException = 2,
    /// Saved register state in reply to a timeout fault (MCS only).
    TimeoutReply = 3,
    /// Scheduling context budget expired (MCS only).
    Timeout = 4,
}

impl FaultKind {
    /// Every fault kind.
    pub const ALL: [Self; 5] = [
        Self::VmFault,
        Self::UnknownSyscall,
        Self::UserException,
        Self::TimeoutReply,
        Self::Timeout,
    ];

    /// Number of message words in this kind's layout.
    #[inline]
    #[must_use]
    pub const fn length(self) -> usize {
        match self {
            Self::VmFault => VmFault::LENGTH,
            Self::UnknownSyscall => UnknownSyscall::LENGTH,
            Self::UserException => UserException::LENGTH,
            Self::TimeoutReply => TimeoutReply::LENGTH,
            Self::Timeout => Timeout::LENGTH,
        }
    }

    /// Returns true if only an MCS kernel delivers this kind.
    #[inline]
    #[must_use]
    pub const fn requires_mcs(self) -> bool {
        matches!(self, Self::TimeoutReply | Self::Timeout)
    }

    /// Returns true if a kernel built with `config` delivers this kind.
    #[inline]
    #[must_use]
    pub const fn is_available(self, config: &BuildConfig) -> bool {
        !self.requires_mcs() || config.mcs
    }

    /// Kernel names of this layout's register positions, in message order.
    #[inline]
    #[must_use]
    pub const fn c_names(self) -> &'static [&'static str] {
        match self {
            Self::VmFault => &VmFaultMsg::C_NAMES,
            Self::UnknownSyscall => &UnknownSyscallMsg::C_NAMES,
            Self::UserException => &UserExceptionMsg::C_NAMES,
            Self::TimeoutReply => &TimeoutReplyMsg::C_NAMES,
            Self::Timeout => &TimeoutMsg::C_NAMES,
        }
    }

    /// Kernel name of this layout's index enum.
    #[inline]
    #[must_use]
    pub const fn c_type(self) -> &'static str {
        match self {
            Self::VmFault => VmFaultMsg::C_TYPE,
            Self::UnknownSyscall => UnknownSyscallMsg::C_TYPE,
            Self::UserException => UserExceptionMsg::C_TYPE,
            Self::TimeoutReply => TimeoutReplyMsg::C_TYPE,
            Self::Timeout => TimeoutMsg::C_TYPE,
        }
    }

    /// Kernel name of this layout's `Length` value.
    #[inline]
    #[must_use]
    pub const fn c_length(self) -> &'static str {
        match self {
            Self::VmFault => VmFaultMsg::C_LENGTH,
            Self::UnknownSyscall => UnknownSyscallMsg::C_LENGTH,
            Self::UserException => UserExceptionMsg::C_LENGTH,
            Self::TimeoutReply => TimeoutReplyMsg::C_LENGTH,
            Self::Timeout => TimeoutMsg::C_LENGTH,
        }
    }

    /// Returns a human-readable name for this fault kind.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::VmFault => "vm fault",
            Self::UnknownSyscall => "unknown syscall",
            Self::UserException => "user exception",
            Self::TimeoutReply => "timeout reply",
            Self::Timeout => "timeout",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Decoded Faults
// =============================================================================

/// A fault message of any kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Memory access fault.
    VmFault(VmFault),
    /// Unrecognised system call.
    UnknownSyscall(UnknownSyscall),
    /// Architectural exception.
    UserException(UserException),
    /// Timeout reply register state.
    TimeoutReply(TimeoutReply),
    /// Budget expiry.
    Timeout(Timeout),
}

impl Fault {
    /// Returns the kind of this fault.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> FaultKind {
        match *self {
            Self::VmFault(_) => FaultKind::VmFault,
            Self::UnknownSyscall(_) => FaultKind::UnknownSyscall,
            Self::UserException(_) => FaultKind::UserException,
            Self::TimeoutReply(_) => FaultKind::TimeoutReply,
            Self::Timeout(_) => FaultKind::Timeout,
        }
    }

    /// Reads a fault of `kind` from message registers.
    ///
    /// Kinds the configured kernel never delivers are rejected, so a handler
    /// built without MCS cannot misread a message as a timeout.
    #[inline]
    pub fn decode(kind: FaultKind, mrs: &[u64], config: &BuildConfig) -> Result<Self, MessageError> {
        if !kind.is_available(config) {
            return Err(MessageError::KindUnavailable(kind));
        }

        Ok(match kind {
            FaultKind::VmFault => Self::VmFault(VmFault::decode(mrs)?),
            FaultKind::UnknownSyscall => Self::UnknownSyscall(UnknownSyscall::decode(mrs)?),
            FaultKind::UserException => Self::UserException(UserException::decode(mrs)?),
            FaultKind::TimeoutReply => Self::TimeoutReply(TimeoutReply::decode(mrs)?),
            FaultKind::Timeout => Self::Timeout(Timeout::decode(mrs)?),
        })
    }

    /// Writes this fault into message registers, returning the words written.
    #[inline]
    pub fn encode(&self, mrs: &mut [u64]) -> Result<usize, MessageError> {
        match *self {
            Self::VmFault(ref msg) => msg.encode(mrs),
            Self::UnknownSyscall(ref msg) => msg.encode(mrs),
            Self::UserException(ref msg) => msg.encode(mrs),
            Self::TimeoutReply(ref msg) => msg.encode(mrs),
            Self::Timeout(ref msg) => msg.encode(mrs),
        }
    }
}
