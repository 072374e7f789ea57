// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Renders a resolved ABI.
//!
//! The header output uses the kernel's own constant and enumerator names so
//! C code can include it in place of `sel4_arch/constants.h`.

use std::fmt::{self, Write as _};

use clap::ValueEnum;
use sel4_rv64_abi::object::{
    ENDPOINT_BITS, IPC_BUFFER_SIZE_BITS, SLOT_BITS, WORD_BITS, WORD_SIZE_BITS,
};
use sel4_rv64_abi::untyped::{MAX_UNTYPED_BITS, MIN_UNTYPED_BITS};
use sel4_rv64_abi::vspace::{
    ASID_POOL_BITS, ASID_POOL_INDEX_BITS, HUGE_PAGE_BITS, LARGE_PAGE_BITS, NUM_ASID_POOLS_BITS,
    PAGE_BITS, PAGE_TABLE_BITS, PAGE_TABLE_ENTRY_BITS, PAGE_TABLE_INDEX_BITS, TERA_PAGE_BITS,
    VSPACE_BITS,
};
use sel4_rv64_abi::{Abi, FaultKind};

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// C header with `#define`s and index enums.
    #[default]
    Header,
    /// Plain-text table for review.
    Table,
}

/// A named numeric constant of the ABI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    /// Kernel name of the constant.
    pub name: &'static str,
    /// Value of the constant.
    pub value: u64,
    /// True if `value` is log2 of a size in bytes, false for bit and
    /// entry counts.
    pub is_size: bool,
}

impl Constant {
    /// Size in bytes, for constants that describe one.
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> Option<u64> {
        if self.is_size {
            Some(1 << self.value)
        } else {
            None
        }
    }
}

const fn size(name: &'static str, value: u32) -> Constant {
    Constant {
        name,
        value: value as u64,
        is_size: true,
    }
}

const fn count(name: &'static str, value: u32) -> Constant {
    Constant {
        name,
        value: value as u64,
        is_size: false,
    }
}

/// Returns every size constant of `abi`, in kernel header order.
///
/// Constants that do not exist in this configuration (the reply size
/// without MCS) are omitted rather than given a placeholder.
#[inline]
#[must_use]
pub fn constants(abi: &Abi) -> Vec<Constant> {
    let mut out = vec![
        count("seL4_WordBits", WORD_BITS),
        size("seL4_WordSizeBits", WORD_SIZE_BITS),
        size("seL4_SlotBits", SLOT_BITS),
        size("seL4_NotificationBits", abi.objects.notification_bits),
    ];
    if let Some(bits) = abi.objects.reply_bits {
        out.push(size("seL4_ReplyBits", bits));
    }
    out.extend([
        size("seL4_EndpointBits", ENDPOINT_BITS),
        size("seL4_IPCBufferSizeBits", IPC_BUFFER_SIZE_BITS),
        size("seL4_TCBBits", abi.objects.tcb_bits),
        size("seL4_PageTableEntryBits", PAGE_TABLE_ENTRY_BITS),
        count("seL4_PageTableIndexBits", PAGE_TABLE_INDEX_BITS),
        size("seL4_PageBits", PAGE_BITS),
        size("seL4_LargePageBits", LARGE_PAGE_BITS),
        size("seL4_HugePageBits", HUGE_PAGE_BITS),
        size("seL4_TeraPageBits", TERA_PAGE_BITS),
        size("seL4_PageTableBits", PAGE_TABLE_BITS),
        size("seL4_VSpaceBits", VSPACE_BITS),
        count("seL4_NumASIDPoolsBits", NUM_ASID_POOLS_BITS),
        count("seL4_ASIDPoolIndexBits", ASID_POOL_INDEX_BITS),
        size("seL4_ASIDPoolBits", ASID_POOL_BITS),
        size("seL4_MinUntypedBits", MIN_UNTYPED_BITS),
        size("seL4_MaxUntypedBits", MAX_UNTYPED_BITS),
    ]);
    out
}

/// Width of the longest constant name.
fn name_width(constants: &[Constant]) -> usize {
    constants
        .iter()
        .map(|constant| constant.name.len())
        .max()
        .unwrap_or(0)
}

/// Renders `abi` in `format`.
#[inline]
pub fn render(abi: &Abi, format: Format) -> Result<String, fmt::Error> {
    match format {
        Format::Header => render_header(abi),
        Format::Table => render_table(abi),
    }
}

/// Renders `abi` as a C header.
#[inline]
pub fn render_header(abi: &Abi) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let config = abi.config;

    writeln!(out, "/*")?;
    writeln!(out, " * Generated by abigen. Do not edit.")?;
    writeln!(
        out,
        " * fpu={} mcs={} benchmarks={}",
        config.fpu, config.mcs, config.benchmarks
    )?;
    writeln!(out, " */")?;
    writeln!(out)?;
    writeln!(out, "#pragma once")?;
    writeln!(out)?;

    let defines = constants(abi);
    let width = name_width(&defines);
    for constant in &defines {
        writeln!(out, "#define {:<width$} {}", constant.name, constant.value)?;
    }
    writeln!(out)?;

    writeln!(out, "#ifndef __ASSEMBLER__")?;
    for kind in abi.fault_kinds() {
        writeln!(out)?;
        writeln!(out, "typedef enum {{")?;
        for name in kind.c_names() {
            writeln!(out, "    {name},")?;
        }
        writeln!(out, "    {},", kind.c_length())?;
        writeln!(out, "}} {};", kind.c_type())?;
    }
    writeln!(out)?;
    writeln!(out, "#endif /* __ASSEMBLER__ */")?;
    writeln!(out)?;

    writeln!(
        out,
        "/* First address in the virtual address space that is not accessible to user level */"
    )?;
    writeln!(out, "#define seL4_UserTop 0x{:016x}", abi.user_top())?;

    if let Some(size) = abi.log_buffer_size {
        writeln!(out)?;
        writeln!(out, "/* size of kernel log buffer in bytes */")?;
        writeln!(out, "#define seL4_LogBufferSize ({size})")?;
    }

    Ok(out)
}

/// Renders `abi` as a plain-text table.
#[inline]
pub fn render_table(abi: &Abi) -> Result<String, fmt::Error> {
    let mut out = String::new();

    let config = abi.config;
    writeln!(
        out,
        "configuration: fpu={} mcs={} benchmarks={}",
        config.fpu, config.mcs, config.benchmarks
    )?;
    writeln!(out)?;
    let rows = constants(abi);
    let width = name_width(&rows) + 2;
    writeln!(out, "{:<width$}{:>6}{:>16}", "constant", "bits", "bytes")?;
    for constant in &rows {
        match constant.bytes() {
            Some(bytes) => writeln!(
                out,
                "{:<width$}{:>6}{:>16}",
                constant.name, constant.value, bytes
            )?,
            None => writeln!(
                out,
                "{:<width$}{:>6}{:>16}",
                constant.name, constant.value, "-"
            )?,
        }
    }
    writeln!(out, "{:<width$}{:>#22x}", "seL4_UserTop", abi.user_top())?;
    match abi.log_buffer_size {
        Some(size) => writeln!(out, "{:<width$}{:>22}", "seL4_LogBufferSize", size)?,
        None => writeln!(out, "{:<width$}{:>22}", "seL4_LogBufferSize", "-")?,
    }

    for kind in FaultKind::ALL {
        writeln!(out)?;
        if !abi.has_fault_kind(kind) {
            writeln!(out, "{} (not delivered by this configuration)", kind.c_type())?;
            continue;
        }
        writeln!(out, "{} (length {})", kind.c_type(), kind.length())?;
        for (index, name) in kind.c_names().iter().enumerate() {
            writeln!(out, "  {index:>3}  {name}")?;
        }
    }

    Ok(out)
}
