use crate::cmd::CommandBuffer;

/// A channel that can run backdoor exchanges.
///
/// [`HostBackdoor`] is the real trap; tests and host-side tooling provide their own
/// implementations to stand in for the hypervisor.
pub trait Backdoor {
    /// Raw exchange: hands the buffer to the host as-is and leaves the reply in it.
    ///
    /// Callers should go through [`Backdoor::send_cmd`] so the magic and port are never missing.
    fn exchange(&mut self, cmd: &mut CommandBuffer);

    /// Stamps the protocol magic and port into `cmd`, then exchanges it.
    ///
    /// The caller fills `bx`, `cx`, `si` and `di`; on return all six slots hold the reply.
    fn send_cmd(&mut self, cmd: &mut CommandBuffer) {
        cmd.stamp();
        self.exchange(cmd);
    }
}

impl<B: Backdoor + ?Sized> Backdoor for &mut B {
    fn exchange(&mut self, cmd: &mut CommandBuffer) {
        (**self).exchange(cmd)
    }

    fn send_cmd(&mut self, cmd: &mut CommandBuffer) {
        (**self).send_cmd(cmd)
    }
}

/// Handle to the hypervisor's backdoor on the current CPU architecture.
///
/// Both [`Backdoor::exchange`] and [`Backdoor::send_cmd`] stamp the buffer before trapping, so
/// the real host never sees a command without the magic and port.
#[derive(Debug)]
pub struct HostBackdoor {
    trap: unsafe fn(&mut CommandBuffer),
}

impl HostBackdoor {
    /// # Safety
    ///
    /// Every exchange through the returned handle executes the trapping instruction. The caller
    /// must know that the code runs under a hypervisor implementing the VMware backdoor, or be
    /// prepared for the fault raised when it does not. Probing for the backend (`GetVersion`)
    /// is itself an exchange and carries the same requirement.
    pub const unsafe fn new() -> Self {
        Self {
            trap: crate::transport::exchange,
        }
    }

    #[cfg(test)]
    const fn with_trap(trap: unsafe fn(&mut CommandBuffer)) -> Self {
        Self { trap }
    }
}

impl Backdoor for HostBackdoor {
    fn exchange(&mut self, cmd: &mut CommandBuffer) {
        cmd.stamp();
        // SAFETY: upheld by the caller of `HostBackdoor::new`.
        unsafe { (self.trap)(cmd) }
    }

    fn send_cmd(&mut self, cmd: &mut CommandBuffer) {
        self.exchange(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::Word;
    use crate::consts::{Command, VMMOUSE_PROTO_MAGIC, VMMOUSE_PROTO_PORT};

    /// Records the buffer as the host would see it and writes a fixed reply.
    #[derive(Default)]
    struct Recorder {
        seen: Option<CommandBuffer>,
    }

    impl Backdoor for Recorder {
        fn exchange(&mut self, cmd: &mut CommandBuffer) {
            self.seen = Some(*cmd);
            *cmd = CommandBuffer::from_words([6, VMMOUSE_PROTO_MAGIC as Word, 0, 0, 0, 0]);
        }
    }

    #[test]
    fn send_cmd_stamps_before_the_host_sees_the_buffer() {
        let mut host = Recorder::default();
        let mut cmd = CommandBuffer::from_words([
            0xdead,
            0,
            Command::GetVersion.id() as Word,
            0xbeef,
            7,
            8,
        ]);
        host.send_cmd(&mut cmd);

        let seen = host.seen.expect("host was not reached");
        assert_eq!(seen.magic(), VMMOUSE_PROTO_MAGIC);
        assert_eq!(seen.port(), VMMOUSE_PROTO_PORT);
        assert_eq!(seen.command(), Some(Command::GetVersion));
        assert_eq!((seen.si, seen.di), (7, 8));

        // The reply overwrites the buffer in place.
        assert_eq!(cmd.ax, 6);
        assert_eq!(cmd.bx, VMMOUSE_PROTO_MAGIC as Word);
    }

    #[test]
    fn raw_exchange_does_not_stamp() {
        let mut host = Recorder::default();
        let mut cmd = CommandBuffer::with_command(Command::AbsPointerStatus, 0);
        host.exchange(&mut cmd);
        assert!(!host.seen.unwrap().is_stamped());
    }

    /// Stands in for the trapping instruction: rejects unstamped buffers and marks the reply.
    unsafe fn checked_trap(cmd: &mut CommandBuffer) {
        assert!(cmd.is_stamped(), "unstamped command reached the trap: {cmd:?}");
        cmd.di = 0xabcd;
    }

    #[test]
    fn host_backdoor_stamps_on_every_path() {
        let mut host = HostBackdoor::with_trap(checked_trap);

        let mut raw = CommandBuffer::with_command(Command::AbsPointerStatus, 0);
        host.exchange(&mut raw);
        assert_eq!(raw.di, 0xabcd);

        let mut sent = CommandBuffer::with_command(Command::GetVersion, 0);
        host.send_cmd(&mut sent);
        assert_eq!(sent.di, 0xabcd);

        fn send_through<B: Backdoor>(mut backdoor: B) -> CommandBuffer {
            let mut cmd = CommandBuffer::new();
            backdoor.exchange(&mut cmd);
            cmd
        }
        assert_eq!(send_through(&mut host).di, 0xabcd);
    }

    #[test]
    fn mutable_reference_forwards_to_the_inner_backdoor() {
        fn send_through<B: Backdoor>(mut backdoor: B) {
            backdoor.send_cmd(&mut CommandBuffer::new());
        }

        let mut host = Recorder::default();
        send_through(&mut host);
        assert!(host.seen.unwrap().is_stamped());
    }
}
