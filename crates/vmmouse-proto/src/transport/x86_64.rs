use core::arch::asm;

use crate::cmd::CommandBuffer;

/// `rbx` is reserved by LLVM and cannot be named as an operand, so it is saved on the stack
/// together with the buffer pointer. There is no 64-bit `in`; the reply in `ax` is 32 bits,
/// zero-extended.
#[inline(never)]
pub(super) unsafe fn exchange(cmd: &mut CommandBuffer) {
    let ptr: *mut CommandBuffer = cmd;
    // SAFETY: `ptr` is valid for reads and writes of the whole buffer for the duration of the
    // block; every register the host may change is either an output or restored from the stack.
    unsafe {
        asm!(
            "push rbx",
            "push rax",
            "mov rdi, [rax + 40]",
            "mov rsi, [rax + 32]",
            "mov rdx, [rax + 24]",
            "mov rcx, [rax + 16]",
            "mov rbx, [rax + 8]",
            "mov rax, [rax]",
            "in eax, dx",
            "xchg rax, [rsp]",
            "mov [rax + 40], rdi",
            "mov [rax + 32], rsi",
            "mov [rax + 24], rdx",
            "mov [rax + 16], rcx",
            "mov [rax + 8], rbx",
            "pop qword ptr [rax]",
            "pop rbx",
            inout("rax") ptr => _,
            out("rcx") _,
            out("rdx") _,
            out("rsi") _,
            out("rdi") _,
        );
    }
}
