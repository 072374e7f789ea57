// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Build configuration and the resolved ABI.
//!
//! The kernel build selects three options that change the ABI:
//!
//! | Option | Effect |
//! |--------|--------|
//! | `fpu` | TCB grows from 2^10 to 2^11 bytes |
//! | `mcs` | Notification grows to 2^6, Reply objects exist, timeout faults exist |
//! | `benchmarks` | Kernel log buffer size is published |
//!
//! All of them are folded into one [`BuildConfig`] value and resolved once
//! into an [`Abi`]. Consumers read the resolved value instead of checking
//! the options themselves.

use crate::fault::FaultKind;
use crate::object::ObjectSizeTable;
use crate::vspace::USER_TOP;

/// Size of the kernel log buffer in bytes (benchmark builds only).
pub const LOG_BUFFER_SIZE: u64 = 1 << 20;

/// Kernel build options that affect the user-visible ABI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BuildConfig {
    /// Floating-point context is saved in the TCB.
    pub fpu: bool,
    /// Mixed-criticality scheduling: scheduling contexts and reply objects.
    pub mcs: bool,
    /// Benchmark instrumentation is compiled in.
    pub benchmarks: bool,
}

impl BuildConfig {
    /// Configuration with every option disabled.
    pub const BASE: Self = Self {
        fpu: false,
        mcs: false,
        benchmarks: false,
    };

    /// Configuration selected by this crate's Cargo features.
    pub const CURRENT: Self = Self {
        fpu: cfg!(feature = "fpu"),
        mcs: cfg!(feature = "mcs"),
        benchmarks: cfg!(feature = "benchmarks"),
    };

    /// Returns this configuration with the FPU option set to `fpu`.
    #[inline]
    #[must_use]
    pub const fn with_fpu(self, fpu: bool) -> Self {
        Self { fpu, ..self }
    }

    /// Returns this configuration with the MCS option set to `mcs`.
    #[inline]
    #[must_use]
    pub const fn with_mcs(self, mcs: bool) -> Self {
        Self { mcs, ..self }
    }

    /// Returns this configuration with the benchmark option set to `benchmarks`.
    #[inline]
    #[must_use]
    pub const fn with_benchmarks(self, benchmarks: bool) -> Self {
        Self { benchmarks, ..self }
    }

    /// Resolves this configuration into the concrete ABI.
    #[inline]
    #[must_use]
    pub const fn resolve(self) -> Abi {
        Abi {
            config: self,
            objects: ObjectSizeTable::for_config(self),
            log_buffer_size: if self.benchmarks {
                Some(LOG_BUFFER_SIZE)
            } else {
                None
            },
        }
    }
}

/// The ABI for one build configuration.
///
/// Produced by [`BuildConfig::resolve`] and never mutated afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Abi {
    /// Configuration this ABI was resolved from.
    pub config: BuildConfig,
    /// Object size table for this configuration.
    pub objects: ObjectSizeTable,
    /// Kernel log buffer size, present only in benchmark builds.
    pub log_buffer_size: Option<u64>,
}

impl Abi {
    /// ABI of the configuration selected by this crate's Cargo features.
    pub const CURRENT: Self = BuildConfig::CURRENT.resolve();

    /// First virtual address not accessible to user level.
    #[inline]
    #[must_use]
    pub const fn user_top(&self) -> u64 {
        USER_TOP
    }

    /// Returns true if the kernel can deliver faults of `kind`.
    #[inline]
    #[must_use]
    pub const fn has_fault_kind(&self, kind: FaultKind) -> bool {
        kind.is_available(&self.config)
    }

    /// Iterates over the fault kinds this configuration delivers.
    #[inline]
    pub fn fault_kinds(&self) -> impl Iterator<Item = FaultKind> + '_ {
        FaultKind::ALL
            .into_iter()
            .filter(move |kind| self.has_fault_kind(*kind))
    }
}
