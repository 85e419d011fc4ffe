#![no_std]

//! Guest side of the vmmouse backdoor protocol.
//!
//! A backdoor call is a single six-register exchange with the hypervisor: the guest loads
//! [`CommandBuffer`] into `ax..di`, executes a trapping port read on
//! [`VMMOUSE_PROTO_PORT`] (emulated through `MDCCSR_EL0` on aarch64), and the host's reply is
//! stored back into the same buffer.
//!
//! Only the transport lives here. Interpreting replies, including deciding whether a backend
//! is present at all, is up to the caller.

pub mod backdoor;
pub mod cmd;
pub mod consts;
pub mod encoding;
mod transport;

pub use backdoor::{Backdoor, HostBackdoor};
pub use cmd::{CommandBuffer, Word, CMD_WORDS};
pub use consts::{Command, X86IoFlags, VMMOUSE_PROTO_MAGIC, VMMOUSE_PROTO_PORT};

/// Stamps the protocol magic and port into `cmd` and runs one backdoor exchange on the current
/// CPU.
///
/// `cmd` holds the reply on return; every slot may have changed.
///
/// # Safety
///
/// Same as [`HostBackdoor::new`]: the trap must be intercepted by a VMware-compatible
/// hypervisor, otherwise the instruction faults or returns hardware garbage.
pub unsafe fn send_cmd(cmd: &mut CommandBuffer) {
    // SAFETY: forwarded to the caller.
    let mut host = unsafe { HostBackdoor::new() };
    host.send_cmd(cmd);
}

#[cfg(test)]
extern crate std;
