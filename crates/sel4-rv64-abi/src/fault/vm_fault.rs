// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `VMFault` message layout.
//!
//! | Register | Content |
//! |----------|---------|
//! | MR0 | Faulting instruction pointer |
//! | MR1 | Faulting virtual address |
//! | MR2 | 1 for an instruction fetch, 0 for a data access |
//! | MR3 | Fault status (`scause`) |

fault_message! {
    /// Register positions of a `VMFault` message.
    enum VmFaultMsg;
    /// Memory access fault delivered to the thread's fault handler.
    struct VmFault: VmFault, "seL4_VMFault", 4 {
        /// Instruction pointer of the faulting access.
        Ip = "IP" => ip,
        /// Virtual address that faulted.
        Addr = "Addr" => addr,
        /// Non-zero if the fault was an instruction fetch.
        PrefetchFault = "PrefetchFault" => prefetch_fault,
        /// Fault status register.
        Fsr = "FSR" => fsr,
    }
}

impl VmFault {
    /// Returns true if the fault was an instruction fetch rather than a data access.
    #[inline]
    #[must_use]
    pub const fn is_prefetch(&self) -> bool {
        self.prefetch_fault != 0
    }
}
