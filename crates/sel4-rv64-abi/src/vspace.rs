// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Virtual address space geometry for Sv39/Sv48.
//!
//! Every page table holds `1 << PAGE_TABLE_INDEX_BITS` entries of
//! `1 << PAGE_TABLE_ENTRY_BITS` bytes, so each level of translation adds
//! `PAGE_TABLE_INDEX_BITS` to the size of the page it maps:
//!
//! ```text
//! level 0  PAGE_BITS        12   4 KiB
//! level 1  LARGE_PAGE_BITS  21   2 MiB
//! level 2  HUGE_PAGE_BITS   30   1 GiB
//! level 3  TERA_PAGE_BITS   39   512 GiB   (Sv48 only)
//! ```

use core::fmt;

/// Page table entry size bits (8-byte PTEs).
pub const PAGE_TABLE_ENTRY_BITS: u32 = 3;

/// Bits of virtual address translated by one page table level.
pub const PAGE_TABLE_INDEX_BITS: u32 = 9;

/// Base page size bits (4 KiB).
pub const PAGE_BITS: u32 = 12;

/// Large (megapage) size bits (2 MiB).
pub const LARGE_PAGE_BITS: u32 = PAGE_BITS + PAGE_TABLE_INDEX_BITS;

/// Huge (gigapage) size bits (1 GiB).
pub const HUGE_PAGE_BITS: u32 = LARGE_PAGE_BITS + PAGE_TABLE_INDEX_BITS;

/// Tera (terapage) size bits (512 GiB).
pub const TERA_PAGE_BITS: u32 = HUGE_PAGE_BITS + PAGE_TABLE_INDEX_BITS;

/// Page table object size bits.
pub const PAGE_TABLE_BITS: u32 = PAGE_TABLE_INDEX_BITS + PAGE_TABLE_ENTRY_BITS;

/// `VSpace` root object size bits (the root is an ordinary page table).
pub const VSPACE_BITS: u32 = PAGE_TABLE_BITS;

/// Bits selecting an ASID pool.
pub const NUM_ASID_POOLS_BITS: u32 = 7;

/// Bits selecting an entry within one ASID pool.
pub const ASID_POOL_INDEX_BITS: u32 = 9;

/// ASID pool object size bits.
pub const ASID_POOL_BITS: u32 = 12;

/// First virtual address that is not accessible to user level.
pub const USER_TOP: u64 = 0x0000_003f_ffff_f000;

/// Number of ASID pools the kernel can address.
#[inline]
#[must_use]
pub const fn asid_pool_count() -> u64 {
    1 << NUM_ASID_POOLS_BITS
}

/// Total number of ASIDs across every pool.
#[inline]
#[must_use]
pub const fn asid_count() -> u64 {
    1 << (NUM_ASID_POOLS_BITS + ASID_POOL_INDEX_BITS)
}

/// Returns true if `vaddr` lies in the user-accessible part of the address space.
#[inline]
#[must_use]
pub const fn is_user_address(vaddr: u64) -> bool {
    vaddr < USER_TOP
}

// =============================================================================
// Page Sizes
// =============================================================================

/// Mappable page sizes, smallest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PageSize {
    /// 4 KiB base page.
    Base = 0,
    /// 2 MiB megapage.
    Large = 1,
    /// 1 GiB gigapage.
    Huge = 2,
    /// 512 GiB terapage.
    Tera = 3,
}

impl PageSize {
    /// Every page size, smallest first.
    pub const ALL: [Self; 4] = [Self::Base, Self::Large, Self::Huge, Self::Tera];

    /// Returns the size bits of this page.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Base => PAGE_BITS,
            Self::Large => LARGE_PAGE_BITS,
            Self::Huge => HUGE_PAGE_BITS,
            Self::Tera => TERA_PAGE_BITS,
        }
    }

    /// Returns the size of this page in bytes.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> u64 {
        1 << self.bits()
    }

    /// Returns true if `vaddr` is aligned to this page size.
    #[inline]
    #[must_use]
    pub const fn is_aligned(self, vaddr: u64) -> bool {
        vaddr & (self.bytes() - 1) == 0
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "4K"),
            Self::Large => write!(f, "2M"),
            Self::Huge => write!(f, "1G"),
            Self::Tera => write!(f, "512G"),
        }
    }
}

/// RISC-V paging mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PagingMode {
    /// Three-level translation, 39-bit virtual addresses.
    Sv39,
    /// Four-level translation, 48-bit virtual addresses.
    Sv48,
}

impl PagingMode {
    /// Number of page table levels.
    #[inline]
    #[must_use]
    pub const fn levels(self) -> u32 {
        match self {
            Self::Sv39 => 3,
            Self::Sv48 => 4,
        }
    }

    /// Width of a virtual address in bits.
    #[inline]
    #[must_use]
    pub const fn va_bits(self) -> u32 {
        PAGE_BITS + self.levels() * PAGE_TABLE_INDEX_BITS
    }

    /// Largest page a leaf entry in the root table can map.
    #[inline]
    #[must_use]
    pub const fn largest_page(self) -> PageSize {
        match self {
            Self::Sv39 => PageSize::Huge,
            Self::Sv48 => PageSize::Tera,
        }
    }

    /// Returns true if this mode can map pages of `size`.
    #[inline]
    #[must_use]
    pub const fn supports(self, size: PageSize) -> bool {
        (size as u8) <= (self.largest_page() as u8)
    }
}

// Compile-time verification of the published geometry
const _: () = {
    assert!(PAGE_BITS == 12, "base page is 4 KiB");
    assert!(LARGE_PAGE_BITS == 21, "large page is 2 MiB");
    assert!(HUGE_PAGE_BITS == 30, "huge page is 1 GiB");
    assert!(TERA_PAGE_BITS == 39, "tera page is 512 GiB");
    assert!(PAGE_TABLE_BITS == 12, "page table fills one base page");
    assert!(USER_TOP & ((1 << PAGE_BITS) - 1) == 0, "USER_TOP is page aligned");
    // USER_TOP sits one page below the top of the Sv39 lower half
    assert!(
        USER_TOP < 1 << (PAGE_BITS + 3 * PAGE_TABLE_INDEX_BITS - 1),
        "USER_TOP is in the Sv39 lower half"
    );
};

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn page_levels_step_by_index_bits() {
        assert_eq!(PageSize::Base.bits(), 12);
        for pair in PageSize::ALL.windows(2) {
            assert!(pair[0].bits() < pair[1].bits());
            assert_eq!(pair[1].bits() - pair[0].bits(), PAGE_TABLE_INDEX_BITS);
        }
    }

    #[test]
    fn page_sizes_in_bytes() {
        assert_eq!(PageSize::Base.bytes(), 4096);
        assert_eq!(PageSize::Large.bytes(), 2 * 1024 * 1024);
        assert_eq!(PageSize::Huge.bytes(), 1024 * 1024 * 1024);
        assert_eq!(PageSize::Tera.bytes(), 512 * 1024 * 1024 * 1024);
    }

    #[test]
    fn page_table_holds_one_level() {
        assert_eq!(
            1u64 << PAGE_TABLE_BITS,
            (1u64 << PAGE_TABLE_INDEX_BITS) * (1u64 << PAGE_TABLE_ENTRY_BITS)
        );
        assert_eq!(VSPACE_BITS, PAGE_TABLE_BITS);
    }

    #[test]
    fn alignment() {
        assert!(PageSize::Base.is_aligned(0x1000));
        assert!(!PageSize::Base.is_aligned(0x1001));
        assert!(PageSize::Large.is_aligned(0x20_0000));
        assert!(!PageSize::Large.is_aligned(0x1000));
    }

    #[test]
    fn paging_modes() {
        assert_eq!(PagingMode::Sv39.va_bits(), 39);
        assert_eq!(PagingMode::Sv48.va_bits(), 48);
        assert!(PagingMode::Sv39.supports(PageSize::Huge));
        assert!(!PagingMode::Sv39.supports(PageSize::Tera));
        assert!(PagingMode::Sv48.supports(PageSize::Tera));
    }

    #[test]
    fn asid_geometry() {
        assert_eq!(asid_pool_count(), 128);
        assert_eq!(asid_count(), 1 << 16);
        assert_eq!(ASID_POOL_BITS, 12);
    }

    #[test]
    fn user_top_boundary() {
        assert_eq!(USER_TOP, 0x3f_ffff_f000);
        assert!(is_user_address(0));
        assert!(is_user_address(USER_TOP - 1));
        assert!(!is_user_address(USER_TOP));
        assert!(!is_user_address(u64::MAX));
    }

    #[test]
    fn page_size_display() {
        use std::string::ToString as _;

        assert_eq!(PageSize::Base.to_string(), "4K");
        assert_eq!(PageSize::Tera.to_string(), "512G");
    }
}
