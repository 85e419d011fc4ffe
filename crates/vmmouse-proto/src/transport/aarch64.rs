use core::arch::asm;

use crate::cmd::CommandBuffer;
use crate::encoding::X86_IO_W7_IN32;

/// The read of `MDCCSR_EL0` is discarded; it only exists to trap. The hypervisor decodes `x7`
/// as an x86 `in eax, dx` and runs it against `x0..x5` (`ax..di`).
#[inline(never)]
pub(super) unsafe fn exchange(cmd: &mut CommandBuffer) {
    let ptr: *mut CommandBuffer = cmd;
    // SAFETY: `ptr` is valid for reads and writes of the whole buffer for the duration of the
    // block; `x0..x5` and `x7` are declared clobbered.
    unsafe {
        asm!(
            "ldp x4, x5, [{cmd}, #32]",
            "ldp x2, x3, [{cmd}, #16]",
            "ldp x0, x1, [{cmd}]",
            "mrs xzr, mdccsr_el0",
            "stp x4, x5, [{cmd}, #32]",
            "stp x2, x3, [{cmd}, #16]",
            "stp x0, x1, [{cmd}]",
            cmd = in(reg) ptr,
            inout("x7") X86_IO_W7_IN32 => _,
            out("x0") _,
            out("x1") _,
            out("x2") _,
            out("x3") _,
            out("x4") _,
            out("x5") _,
            options(nostack),
        );
    }
}
