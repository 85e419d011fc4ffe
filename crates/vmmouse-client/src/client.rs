use tracing::{debug, trace, warn};
use vmmouse_proto::{Backdoor, Command, CommandBuffer, CMD_WORDS, VMMOUSE_PROTO_MAGIC};

use crate::config::{PointerMode, Restrict, VmMouseConfig};
use crate::defs::{
    VMMOUSE_BAD_VERSION, VMMOUSE_CMD_DISABLE, VMMOUSE_CMD_READ_ID, VMMOUSE_CMD_REQUEST_ABSOLUTE,
    VMMOUSE_CMD_REQUEST_RELATIVE, VMMOUSE_ERROR, VMMOUSE_MAX_DATA_WORDS, VMMOUSE_QUEUE_LEN_MASK,
    VMMOUSE_VERSION_ID,
};
use crate::error::{Result, VmMouseError};

/// Decoded `AbsPointerStatus` reply.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct QueueStatus {
    /// Words waiting in the absolute pointer queue.
    pub queued: u16,
}

/// vmmouse absolute pointer driven over a [`Backdoor`].
///
/// Constructed only through [`VmMouse::detect`], so holding one means a backend answered.
#[derive(Debug)]
pub struct VmMouse<B> {
    backdoor: B,
    config: VmMouseConfig,
    version: u32,
    enabled: bool,
}

impl<B: Backdoor> VmMouse<B> {
    /// Checks that a backdoor backend answers and, if configured, enables the device.
    pub fn detect(mut backdoor: B, config: VmMouseConfig) -> Result<Self> {
        config.validate()?;

        let mut cmd = CommandBuffer::with_command(Command::GetVersion, !VMMOUSE_PROTO_MAGIC);
        backdoor.send_cmd(&mut cmd);
        let [version, magic, ..] = cmd.reply_words_u32();

        if magic != VMMOUSE_PROTO_MAGIC || version == VMMOUSE_BAD_VERSION {
            debug!(magic, version, "vmmouse backend not present");
            return Err(VmMouseError::BackendNotPresent { magic, version });
        }
        debug!(version, "vmmouse backend present");

        let mut mouse = Self {
            backdoor,
            config,
            version,
            enabled: false,
        };
        if mouse.config.enable_on_detect {
            mouse.enable()?;
        }
        Ok(mouse)
    }

    /// Backdoor version reported by `GetVersion`.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn config(&self) -> &VmMouseConfig {
        &self.config
    }

    /// Switches the absolute pointer on and applies the configured mode and restriction.
    ///
    /// If the handshake fails after the host was told to enable, the device is switched back
    /// off so host and client agree that it is disabled.
    pub fn enable(&mut self) -> Result<()> {
        self.send(Command::AbsPointerCommand, VMMOUSE_CMD_READ_ID);

        if let Err(err) = self.check_version_id() {
            warn!(%err, "vmmouse enable handshake failed, disabling device");
            self.send(Command::AbsPointerCommand, VMMOUSE_CMD_DISABLE);
            return Err(err);
        }

        self.set_mode(self.config.mode);
        if !self.config.restrict.is_empty() {
            self.restrict(self.config.restrict);
        }
        self.enabled = true;
        debug!(mode = ?self.config.mode, "vmmouse enabled");
        Ok(())
    }

    fn check_version_id(&mut self) -> Result<()> {
        let status = self.raw_status();
        if status & VMMOUSE_ERROR == VMMOUSE_ERROR {
            return Err(VmMouseError::EnableFailed("device reported error status"));
        }
        if status & VMMOUSE_QUEUE_LEN_MASK == 0 {
            return Err(VmMouseError::EnableFailed("version id was not queued"));
        }

        let mut id = [0u32; 1];
        self.read_queue(&mut id)?;
        if id[0] != VMMOUSE_VERSION_ID {
            return Err(VmMouseError::UnexpectedVersionId { got: id[0] });
        }
        Ok(())
    }

    /// Switches the absolute pointer off. The host confirms by reporting the error marker.
    pub fn disable(&mut self) -> Result<()> {
        self.send(Command::AbsPointerCommand, VMMOUSE_CMD_DISABLE);
        self.enabled = false;

        let status = self.raw_status();
        if status & VMMOUSE_ERROR != VMMOUSE_ERROR {
            return Err(VmMouseError::DisableFailed { status });
        }
        debug!("vmmouse disabled");
        Ok(())
    }

    /// Asks the host for absolute or relative reporting. The host does not acknowledge.
    pub fn set_mode(&mut self, mode: PointerMode) {
        let arg = match mode {
            PointerMode::Absolute => VMMOUSE_CMD_REQUEST_ABSOLUTE,
            PointerMode::Relative => VMMOUSE_CMD_REQUEST_RELATIVE,
        };
        self.send(Command::AbsPointerCommand, arg);
        self.config.mode = mode;
    }

    pub fn restrict(&mut self, restrict: Restrict) {
        self.send(Command::AbsPointerRestrict, restrict.bits());
        self.config.restrict = restrict;
    }

    pub fn status(&mut self) -> Result<QueueStatus> {
        let status = self.raw_status();
        if status & VMMOUSE_ERROR == VMMOUSE_ERROR {
            return Err(VmMouseError::DeviceError);
        }
        Ok(QueueStatus {
            queued: (status & VMMOUSE_QUEUE_LEN_MASK) as u16,
        })
    }

    /// Pops up to four raw words from the absolute pointer queue into `out`.
    ///
    /// Returns the number of words written. Words are not interpreted; callers should check
    /// [`VmMouse::status`] first so they never ask for more than is queued.
    pub fn read_queue(&mut self, out: &mut [u32]) -> Result<usize> {
        let n = out.len().min(VMMOUSE_MAX_DATA_WORDS);
        if n == 0 {
            return Ok(0);
        }
        let reply = self.send(Command::AbsPointerData, n as u32);
        out[..n].copy_from_slice(&reply[..n]);
        Ok(n)
    }

    pub fn into_inner(self) -> B {
        self.backdoor
    }

    fn raw_status(&mut self) -> u32 {
        self.send(Command::AbsPointerStatus, 0)[0]
    }

    fn send(&mut self, command: Command, arg: u32) -> [u32; CMD_WORDS] {
        let mut cmd = CommandBuffer::with_command(command, arg);
        self.backdoor.send_cmd(&mut cmd);
        let reply = cmd.reply_words_u32();
        trace!(?command, arg, ax = reply[0], "vmmouse backdoor command");
        reply
    }
}
