//! aarch64 trap command word.
//!
//! aarch64 has no port I/O, so the hypervisor emulates `in`/`out` by trapping a read of
//! `MDCCSR_EL0` and decoding `x7`:
//!
//! ```text
//! 63        40 39      32 31            4   3     2    1   0
//! +-----------+----------+-------------+------+-----+--------+
//! |     0     |   0x86   |      0      | WITH | DIR |  size  |
//! +-----------+----------+-------------+------+-----+--------+
//! ```
//!
//! The word is built here instead of inside the `asm!` block so it can be checked on any host.

use crate::consts::{X86IoFlags, X86_IO_MAGIC, X86_IO_SIZE_32, X86_IO_W7_SIZE_SHIFT};

/// Packs an access size code and transfer flags into the `x7` trap command word.
pub const fn x86_io_w7(size: u8, flags: X86IoFlags) -> u64 {
    ((X86_IO_MAGIC as u64) << 32)
        | flags.bits() as u64
        | ((size as u64 & 0x3) << X86_IO_W7_SIZE_SHIFT)
}

/// Command word for the backdoor exchange: 32-bit input with a register payload.
pub const X86_IO_W7_IN32: u64 = x86_io_w7(
    X86_IO_SIZE_32,
    X86IoFlags::DIR.union(X86IoFlags::WITH),
);
