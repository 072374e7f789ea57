// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! MCS timeout message layouts.
//!
//! Only an MCS kernel delivers these; [`crate::Fault::decode`] rejects them
//! for other configurations.

fault_message! {
    /// Register positions of a `TimeoutReply` message.
    enum TimeoutReplyMsg;
    /// Register state a timeout handler replies with to resume the thread.
    struct TimeoutReply: TimeoutReply, "seL4_TimeoutReply", 32 {
        /// Instruction pointer to resume at.
        FaultIp = "FaultIP" => fault_ip,
        /// Link register (`ra`).
        Lr = "LR" => lr,
        /// Stack pointer.
        Sp = "SP" => sp,
        /// Global pointer.
        Gp = "GP" => gp,
        /// Callee-saved `s0`.
        S0 = "s0" => s0,
        /// Callee-saved `s1`.
        S1 = "s1" => s1,
        /// Callee-saved `s2`.
        S2 = "s2" => s2,
        /// Callee-saved `s3`.
        S3 = "s3" => s3,
        /// Callee-saved `s4`.
        S4 = "s4" => s4,
        /// Callee-saved `s5`.
        S5 = "s5" => s5,
        /// Callee-saved `s6`.
        S6 = "s6" => s6,
        /// Callee-saved `s7`.
        S7 = "s7" => s7,
        /// Callee-saved `s8`.
        S8 = "s8" => s8,
        /// Callee-saved `s9`.
        S9 = "s9" => s9,
        /// Callee-saved `s10`.
        S10 = "s10" => s10,
        /// Callee-saved `s11`.
        S11 = "s11" => s11,
        /// Argument `a0`.
        A0 = "a0" => a0,
        /// Argument `a1`.
        A1 = "a1" => a1,
        /// Argument `a2`.
        A2 = "a2" => a2,
        /// Argument `a3`.
        A3 = "a3" => a3,
        /// Argument `a4`.
        A4 = "a4" => a4,
        /// Argument `a5`.
        A5 = "a5" => a5,
        /// Argument `a6`.
        A6 = "a6" => a6,
        /// Argument `a7`.
        A7 = "a7" => a7,
        /// Temporary `t0`.
        T0 = "t0" => t0,
        /// Temporary `t1`.
        T1 = "t1" => t1,
        /// Temporary `t2`.
        T2 = "t2" => t2,
        /// Temporary `t3`.
        T3 = "t3" => t3,
        /// Temporary `t4`.
        T4 = "t4" => t4,
        /// Temporary `t5`.
        T5 = "t5" => t5,
        /// Temporary `t6`.
        T6 = "t6" => t6,
        /// Thread pointer.
        Tp = "TP" => tp,
    }
}

impl TimeoutReply {
    /// Returns the callee-saved registers `s0`..`s11`.
    #[inline]
    #[must_use]
    pub const fn saved(&self) -> [u64; 12] {
        [
            self.s0, self.s1, self.s2, self.s3, self.s4, self.s5, self.s6, self.s7, self.s8,
            self.s9, self.s10, self.s11,
        ]
    }

    /// Returns the argument registers `a0`..`a7`.
    #[inline]
    #[must_use]
    pub const fn args(&self) -> [u64; 8] {
        [
            self.a0, self.a1, self.a2, self.a3, self.a4, self.a5, self.a6, self.a7,
        ]
    }

    /// Returns the temporary registers `t0`..`t6`.
    #[inline]
    #[must_use]
    pub const fn temporaries(&self) -> [u64; 7] {
        [self.t0, self.t1, self.t2, self.t3, self.t4, self.t5, self.t6]
    }
}

fault_message! {
    /// Register positions of a `Timeout` message.
    enum TimeoutMsg;
    /// Scheduling context budget expiry.
    struct Timeout: Timeout, "seL4_Timeout", 2 {
        /// Badge of the scheduling context that expired.
        Data = "Data" => data,
        /// Budget consumed since the last report.
        Consumed = "Consumed" => consumed,
    }
}
