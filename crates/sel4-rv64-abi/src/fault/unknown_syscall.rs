// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `UnknownSyscall` message layout.
//!
//! Carries the argument registers at the trapping `ecall` so the handler can
//! emulate the call and reply with updated registers.

/// Number of argument registers captured (`a0`..`a6`).
pub const UNKNOWN_SYSCALL_ARGS: usize = 7;

fault_message! {
    /// Register positions of an `UnknownSyscall` message.
    enum UnknownSyscallMsg;
    /// System call with a number the kernel does not recognise.
    struct UnknownSyscall: UnknownSyscall, "seL4_UnknownSyscall", 11 {
        /// Instruction pointer of the `ecall`.
        FaultIp = "FaultIP" => fault_ip,
        /// Stack pointer.
        Sp = "SP" => sp,
        /// Return address.
        Ra = "RA" => ra,
        /// Argument register `a0`.
        A0 = "A0" => a0,
        /// Argument register `a1`.
        A1 = "A1" => a1,
        /// Argument register `a2`.
        A2 = "A2" => a2,
        /// Argument register `a3`.
        A3 = "A3" => a3,
        /// Argument register `a4`.
        A4 = "A4" => a4,
        /// Argument register `a5`.
        A5 = "A5" => a5,
        /// Argument register `a6`.
        A6 = "A6" => a6,
        /// System call number (`a7`).
        Syscall = "Syscall" => syscall,
    }
}

impl UnknownSyscall {
    /// Returns the argument registers `a0`..`a6`.
    #[inline]
    #[must_use]
    pub const fn args(&self) -> [u64; UNKNOWN_SYSCALL_ARGS] {
        [self.a0, self.a1, self.a2, self.a3, self.a4, self.a5, self.a6]
    }
}
