//! Per-architecture backdoor transport.
//!
//! Every implementation loads the six [`CommandBuffer`] slots into registers, traps into the
//! hypervisor and stores the same six registers back into the buffer. The host may rewrite any
//! of them, so the compiler is told that all of them (and memory) are clobbered.

use crate::cmd::CommandBuffer;

#[cfg(target_arch = "x86_64")]
mod x86_64;
#[cfg(target_arch = "x86_64")]
use self::x86_64 as imp;

#[cfg(target_arch = "x86")]
mod x86;
#[cfg(target_arch = "x86")]
use self::x86 as imp;

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "aarch64")]
use self::aarch64 as imp;

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
compile_error!("the vmmouse backdoor transport is only available on x86, x86_64 and aarch64");

/// Performs one backdoor exchange in place.
///
/// # Safety
///
/// The trapping instruction must be intercepted by a hypervisor implementing the VMware
/// backdoor. Outside such a host the instruction faults (x86 `#GP` from user mode, an undefined
/// instruction on aarch64) or reads whatever the hardware returns.
#[inline]
pub(crate) unsafe fn exchange(cmd: &mut CommandBuffer) {
    // SAFETY: forwarded to the caller.
    unsafe { imp::exchange(cmd) }
}
