// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! seL4 RISC-V64 ABI definitions.
//!
//! This crate is the contract between the kernel's trap handler and every
//! user-level runtime on RISC-V64:
//! - Object sizes used when retyping untyped memory
//! - Page geometry, ASID pool geometry and the user address ceiling
//! - Ordered layouts of the architecture-specific fault messages
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **One configuration step**: [`BuildConfig::resolve`] is the only place
//!   where FPU, MCS and benchmark settings change a value
//! - **Compile-time invariants**: layout lengths, index contiguity and size
//!   bounds are asserted in `const` blocks, not trusted by convention
//!
//! # Modules
//!
//! - [`config`]: Build configuration and the resolved [`Abi`]
//! - [`object`]: Kernel object kinds and their size bits
//! - [`vspace`]: Sv39/Sv48 page sizes, ASID pools, `USER_TOP`
//! - [`untyped`]: Untyped memory size bounds
//! - [`message`]: Message register area and the [`FaultMessage`] trait
//! - [`fault`]: Per-kind fault message layouts

#![no_std]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod fault;
pub mod message;
pub mod object;
pub mod untyped;
pub mod vspace;

// Re-export commonly used types at crate root
pub use config::{Abi, BuildConfig};
pub use fault::{
    Fault, FaultKind, Timeout, TimeoutReply, UnknownSyscall, UserException, VmFault,
};
pub use message::{FaultMessage, MSG_MAX_LENGTH, MessageError};
pub use object::{ObjectKind, ObjectSizeError, ObjectSizeTable};
pub use untyped::{UntypedBits, UntypedError};
pub use vspace::{PageSize, PagingMode, USER_TOP};
