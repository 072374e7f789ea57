// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! `UserException` message layout.

fault_message! {
    /// Register positions of a `UserException` message.
    enum UserExceptionMsg;
    /// Architectural exception raised by a user thread.
    struct UserException: UserException, "seL4_UserException", 4 {
        /// Instruction pointer of the faulting instruction.
        FaultIp = "FaultIP" => fault_ip,
        /// Stack pointer.
        Sp = "SP" => sp,
        /// Exception number.
        Number = "Number" => number,
        /// Exception code.
        Code = "Code" => code,
    }
}
