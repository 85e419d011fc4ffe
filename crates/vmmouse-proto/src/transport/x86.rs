use core::arch::asm;

use crate::cmd::CommandBuffer;

/// Both `ebx` and `esi` are reserved by LLVM on 32-bit x86; they ride on the stack next to the
/// buffer pointer.
#[inline(never)]
pub(super) unsafe fn exchange(cmd: &mut CommandBuffer) {
    let ptr: *mut CommandBuffer = cmd;
    // SAFETY: `ptr` is valid for reads and writes of the whole buffer for the duration of the
    // block; every register the host may change is either an output or restored from the stack.
    unsafe {
        asm!(
            "push ebx",
            "push esi",
            "push eax",
            "mov edi, [eax + 20]",
            "mov esi, [eax + 16]",
            "mov edx, [eax + 12]",
            "mov ecx, [eax + 8]",
            "mov ebx, [eax + 4]",
            "mov eax, [eax]",
            "in eax, dx",
            "xchg eax, [esp]",
            "mov [eax + 20], edi",
            "mov [eax + 16], esi",
            "mov [eax + 12], edx",
            "mov [eax + 8], ecx",
            "mov [eax + 4], ebx",
            "pop dword ptr [eax]",
            "pop esi",
            "pop ebx",
            inout("eax") ptr => _,
            out("ecx") _,
            out("edx") _,
            out("edi") _,
        );
    }
}
