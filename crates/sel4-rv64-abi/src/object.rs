// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Kernel object kinds and their storage sizes.
//!
//! Every size is published as "size bits": the object occupies
//! `1 << bits` bytes and must be aligned to that size inside the untyped
//! region it is carved from. Both the kernel's retype path and user-level
//! allocators index into untyped memory with these values.

use core::fmt;

use crate::config::BuildConfig;
use crate::untyped::{MAX_UNTYPED_BITS, MIN_UNTYPED_BITS, UntypedBits, UntypedError};
use crate::vspace::{ASID_POOL_BITS, PAGE_TABLE_BITS};

/// Bits in a machine word.
pub const WORD_BITS: u32 = 64;

/// log2 of the word size in bytes.
pub const WORD_SIZE_BITS: u32 = 3;

/// Capability slot (CTE) size bits.
pub const SLOT_BITS: u32 = 5;

/// Endpoint size bits.
pub const ENDPOINT_BITS: u32 = 4;

/// IPC buffer size bits.
pub const IPC_BUFFER_SIZE_BITS: u32 = 10;

/// Notification size bits without MCS.
pub const NOTIFICATION_BITS: u32 = 5;

/// Notification size bits with MCS (the bound scheduling context pushes it past 32 bytes).
pub const MCS_NOTIFICATION_BITS: u32 = 6;

/// Reply object size bits (MCS only).
pub const REPLY_BITS: u32 = 5;

/// TCB size bits without FPU context.
pub const TCB_BITS: u32 = 10;

/// TCB size bits with FPU context.
pub const FPU_TCB_BITS: u32 = 11;

// =============================================================================
// Object Kinds
// =============================================================================

/// Kernel object kinds with a published size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ObjectKind {
    /// Capability slot.
    Slot = 0,
    /// Notification object.
    Notification = 1,
    /// IPC endpoint.
    Endpoint = 2,
    /// Thread control block.
    Tcb = 3,
    /// Page table (any level, including the `VSpace` root).
    PageTable = 4,
    /// ASID pool.
    AsidPool = 5,
    /// IPC buffer frame region.
    IpcBuffer = 6,
    /// Untyped memory (variable size within the untyped bounds).
    Untyped = 7,
    /// Reply object (MCS only).
    Reply = 8,
}

impl ObjectKind {
    /// Every object kind, in discriminant order.
    pub const ALL: [Self; 9] = [
        Self::Slot,
        Self::Notification,
        Self::Endpoint,
        Self::Tcb,
        Self::PageTable,
        Self::AsidPool,
        Self::IpcBuffer,
        Self::Untyped,
        Self::Reply,
    ];

    /// Returns a human-readable name for this object kind.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Slot => "slot",
            Self::Notification => "notification",
            Self::Endpoint => "endpoint",
            Self::Tcb => "tcb",
            Self::PageTable => "page table",
            Self::AsidPool => "asid pool",
            Self::IpcBuffer => "ipc buffer",
            Self::Untyped => "untyped",
            Self::Reply => "reply",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Size Table
// =============================================================================

/// Error when sizing an object for a retype request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectSizeError {
    /// Requested untyped size is outside the untyped bounds.
    Untyped(UntypedError),
    /// Reply objects do not exist without MCS.
    NoReplyObject,
}

impl From<UntypedError> for ObjectSizeError {
    fn from(err: UntypedError) -> Self {
        Self::Untyped(err)
    }
}

impl fmt::Display for ObjectSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Untyped(err) => write!(f, "invalid untyped size: {err}"),
            Self::NoReplyObject => write!(f, "reply objects require an MCS kernel"),
        }
    }
}

/// Size bits of every kernel object for one build configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_field_names)] // Every field is a size in bits
pub struct ObjectSizeTable {
    /// Capability slot.
    pub slot_bits: u32,
    /// Notification object.
    pub notification_bits: u32,
    /// Endpoint.
    pub endpoint_bits: u32,
    /// Thread control block.
    pub tcb_bits: u32,
    /// Page table.
    pub page_table_bits: u32,
    /// ASID pool.
    pub asid_pool_bits: u32,
    /// IPC buffer.
    pub ipc_buffer_bits: u32,
    /// Reply object, `None` without MCS.
    pub reply_bits: Option<u32>,
}

impl ObjectSizeTable {
    /// Builds the table for `config`.
    #[inline]
    #[must_use]
    pub const fn for_config(config: BuildConfig) -> Self {
        Self {
            slot_bits: SLOT_BITS,
            notification_bits: if config.mcs {
                MCS_NOTIFICATION_BITS
            } else {
                NOTIFICATION_BITS
            },
            endpoint_bits: ENDPOINT_BITS,
            tcb_bits: if config.fpu { FPU_TCB_BITS } else { TCB_BITS },
            page_table_bits: PAGE_TABLE_BITS,
            asid_pool_bits: ASID_POOL_BITS,
            ipc_buffer_bits: IPC_BUFFER_SIZE_BITS,
            reply_bits: if config.mcs { Some(REPLY_BITS) } else { None },
        }
    }

    /// Returns the fixed size bits of `kind`.
    ///
    /// `None` for [`ObjectKind::Untyped`], whose size is chosen per request,
    /// and for [`ObjectKind::Reply`] when the kernel has no reply objects.
    #[inline]
    #[must_use]
    pub const fn size_bits(&self, kind: ObjectKind) -> Option<u32> {
        match kind {
            ObjectKind::Slot => Some(self.slot_bits),
            ObjectKind::Notification => Some(self.notification_bits),
            ObjectKind::Endpoint => Some(self.endpoint_bits),
            ObjectKind::Tcb => Some(self.tcb_bits),
            ObjectKind::PageTable => Some(self.page_table_bits),
            ObjectKind::AsidPool => Some(self.asid_pool_bits),
            ObjectKind::IpcBuffer => Some(self.ipc_buffer_bits),
            ObjectKind::Untyped => None,
            ObjectKind::Reply => self.reply_bits,
        }
    }

    /// Returns the fixed size of `kind` in bytes.
    #[inline]
    #[must_use]
    pub const fn size_bytes(&self, kind: ObjectKind) -> Option<u64> {
        match self.size_bits(kind) {
            Some(bits) => Some(1 << bits),
            None => None,
        }
    }

    /// Returns the size bits to reserve for one object of `kind`.
    ///
    /// `untyped_bits` is only consulted for [`ObjectKind::Untyped`] and must
    /// lie within `[MIN_UNTYPED_BITS, MAX_UNTYPED_BITS]`.
    #[inline]
    pub const fn object_size_bits(
        &self,
        kind: ObjectKind,
        untyped_bits: u32,
    ) -> Result<u32, ObjectSizeError> {
        match (kind, self.size_bits(kind)) {
            (_, Some(bits)) => Ok(bits),
            (ObjectKind::Untyped, None) => match UntypedBits::new(untyped_bits) {
                Ok(bits) => Ok(bits.get()),
                Err(err) => Err(ObjectSizeError::Untyped(err)),
            },
            (_, None) => Err(ObjectSizeError::NoReplyObject),
        }
    }

    /// Iterates over `(kind, bits)` for every kind with a fixed size.
    #[inline]
    pub fn fixed_sizes(&self) -> impl Iterator<Item = (ObjectKind, u32)> + '_ {
        ObjectKind::ALL
            .into_iter()
            .filter_map(move |kind| self.size_bits(kind).map(|bits| (kind, bits)))
    }
}

/// Returns true if every fixed size in `table` fits within untyped memory.
const fn fits_untyped(table: &ObjectSizeTable) -> bool {
    let mut i = 0;
    while i < ObjectKind::ALL.len() {
        if let Some(bits) = table.size_bits(ObjectKind::ALL[i]) {
            if bits < MIN_UNTYPED_BITS || bits > MAX_UNTYPED_BITS {
                return false;
            }
        }
        i += 1;
    }
    true
}

// Compile-time verification of the size table for every configuration
const _: () = {
    let base = ObjectSizeTable::for_config(BuildConfig::BASE);
    let full = ObjectSizeTable::for_config(BuildConfig::BASE.with_fpu(true).with_mcs(true));
    assert!(fits_untyped(&base), "base object sizes exceed untyped bounds");
    assert!(fits_untyped(&full), "FPU/MCS object sizes exceed untyped bounds");
    assert!(1 << WORD_SIZE_BITS == WORD_BITS / 8, "word size bits disagree with word bits");
    assert!(FPU_TCB_BITS == TCB_BITS + 1, "FPU context doubles the TCB");
    assert!(
        MCS_NOTIFICATION_BITS == NOTIFICATION_BITS + 1,
        "MCS doubles the notification"
    );
};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn all_configs() -> [BuildConfig; 8] {
        let mut configs = [BuildConfig::BASE; 8];
        for (i, config) in configs.iter_mut().enumerate() {
            *config = BuildConfig::BASE
                .with_fpu(i & 1 != 0)
                .with_mcs(i & 2 != 0)
                .with_benchmarks(i & 4 != 0);
        }
        configs
    }

    #[test]
    fn base_sizes_match_kernel_header() {
        let table = ObjectSizeTable::for_config(BuildConfig::BASE);
        assert_eq!(table.size_bits(ObjectKind::Slot), Some(5));
        assert_eq!(table.size_bits(ObjectKind::Notification), Some(5));
        assert_eq!(table.size_bits(ObjectKind::Endpoint), Some(4));
        assert_eq!(table.size_bits(ObjectKind::Tcb), Some(10));
        assert_eq!(table.size_bits(ObjectKind::PageTable), Some(12));
        assert_eq!(table.size_bits(ObjectKind::AsidPool), Some(12));
        assert_eq!(table.size_bits(ObjectKind::IpcBuffer), Some(10));
        assert_eq!(table.size_bits(ObjectKind::Untyped), None);
        assert_eq!(table.size_bits(ObjectKind::Reply), None);
    }

    #[test]
    fn sizes_are_powers_of_two() {
        for config in all_configs() {
            let table = ObjectSizeTable::for_config(config);
            for (kind, bits) in table.fixed_sizes() {
                let bytes = table.size_bytes(kind).unwrap();
                assert!(bytes.is_power_of_two());
                assert_eq!(bytes, 1u64 << bits);
            }
        }
    }

    #[test]
    fn fpu_only_changes_tcb() {
        for config in all_configs() {
            let without = ObjectSizeTable::for_config(config.with_fpu(false));
            let with = ObjectSizeTable::for_config(config.with_fpu(true));
            assert_eq!(without.tcb_bits, 10);
            assert_eq!(with.tcb_bits, 11);
            assert_eq!(
                ObjectSizeTable {
                    tcb_bits: with.tcb_bits,
                    ..without
                },
                with
            );
        }
    }

    #[test]
    fn mcs_grows_notification_and_adds_reply() {
        for config in all_configs() {
            let without = ObjectSizeTable::for_config(config.with_mcs(false));
            let with = ObjectSizeTable::for_config(config.with_mcs(true));
            assert_eq!(without.notification_bits, 5);
            assert_eq!(without.reply_bits, None);
            assert_eq!(with.notification_bits, 6);
            assert_eq!(with.reply_bits, Some(5));
            assert_eq!(
                ObjectSizeTable {
                    notification_bits: with.notification_bits,
                    reply_bits: with.reply_bits,
                    ..without
                },
                with
            );
        }
    }

    #[test]
    fn object_size_bits_validates_untyped() {
        let table = ObjectSizeTable::for_config(BuildConfig::BASE);
        assert_eq!(table.object_size_bits(ObjectKind::Untyped, 4), Ok(4));
        assert_eq!(table.object_size_bits(ObjectKind::Untyped, 38), Ok(38));
        assert_eq!(
            table.object_size_bits(ObjectKind::Untyped, 3),
            Err(ObjectSizeError::Untyped(UntypedError::TooSmall { bits: 3 }))
        );
        assert_eq!(
            table.object_size_bits(ObjectKind::Untyped, 39),
            Err(ObjectSizeError::Untyped(UntypedError::TooLarge { bits: 39 }))
        );
    }

    #[test]
    fn object_size_bits_ignores_request_for_fixed_kinds() {
        let table = ObjectSizeTable::for_config(BuildConfig::BASE.with_fpu(true));
        assert_eq!(table.object_size_bits(ObjectKind::Tcb, 0), Ok(11));
        assert_eq!(table.object_size_bits(ObjectKind::Endpoint, 99), Ok(4));
    }

    #[test]
    fn reply_requires_mcs() {
        let base = ObjectSizeTable::for_config(BuildConfig::BASE);
        assert_eq!(
            base.object_size_bits(ObjectKind::Reply, 0),
            Err(ObjectSizeError::NoReplyObject)
        );

        let mcs = ObjectSizeTable::for_config(BuildConfig::BASE.with_mcs(true));
        assert_eq!(mcs.object_size_bits(ObjectKind::Reply, 0), Ok(5));
    }

    #[test]
    fn fixed_sizes_skip_variable_kinds() {
        let base = ObjectSizeTable::for_config(BuildConfig::BASE);
        assert_eq!(base.fixed_sizes().count(), 7);
        assert!(base.fixed_sizes().all(|(kind, _)| kind != ObjectKind::Untyped));

        let mcs = ObjectSizeTable::for_config(BuildConfig::BASE.with_mcs(true));
        assert_eq!(mcs.fixed_sizes().count(), 8);
    }

    #[test]
    fn word_size() {
        assert_eq!(WORD_BITS, 64);
        assert_eq!(1u32 << WORD_SIZE_BITS, WORD_BITS / 8);
    }
}
