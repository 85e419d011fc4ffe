use crate::error::{Result, VmMouseError};

/// Pointer reporting mode requested from the host.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PointerMode {
    /// Host reports absolute coordinates (the reason to use vmmouse at all).
    #[default]
    Absolute,
    /// Host falls back to relative motion, as a plain PS/2 mouse would report.
    Relative,
}

bitflags::bitflags! {
    /// Guest privilege levels allowed to use the absolute pointer (`AbsPointerRestrict`).
    ///
    /// The empty set means any level may access it.
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
    pub struct Restrict: u32 {
        /// Only CPL0 (kernel) code.
        const CPL0 = 0x01;
        /// Only code running with I/O privilege (IOPL).
        const IOPL = 0x02;
    }
}

impl Restrict {
    pub const ANY: Self = Self::empty();
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VmMouseConfig {
    pub mode: PointerMode,
    pub restrict: Restrict,
    /// Run the enable handshake as part of [`crate::VmMouse::detect`].
    pub enable_on_detect: bool,
}

impl VmMouseConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: PointerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn restrict(mut self, restrict: Restrict) -> Self {
        self.restrict = restrict;
        self
    }

    pub fn enable_on_detect(mut self, enable: bool) -> Self {
        self.enable_on_detect = enable;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if Restrict::from_bits(self.restrict.bits()).is_none() {
            return Err(VmMouseError::InvalidConfig("unknown restrict bits"));
        }
        Ok(())
    }
}
