//! Wire constants shared with the host's backdoor (vmport) decoder.
//!
//! These values are matched bit-for-bit by the hypervisor; none of them are derived.

/// Protocol identification value stamped into `ax` of every outgoing command ("VMXh").
///
/// A host that implements the backdoor echoes this value back in `bx` for
/// [`Command::GetVersion`].
pub const VMMOUSE_PROTO_MAGIC: u32 = 0x564D_5868;

/// I/O port of the backdoor channel ("VX").
///
/// Stamped into `dx` of every outgoing command; on x86 this is the implicit port operand of
/// `in eax, dx`, on aarch64 the host's trap decoder reads it from the same register slot.
pub const VMMOUSE_PROTO_PORT: u16 = 0x5658;

/// Backdoor command ids, carried in the low 16 bits of `cx`.
#[repr(u32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Command {
    /// Backdoor version query; also the presence check.
    GetVersion = 10,
    /// Pop up to four queued words from the absolute pointer queue (`bx` = word count).
    AbsPointerData = 39,
    /// Absolute pointer queue status (`ax` = queued word count or an error marker).
    AbsPointerStatus = 40,
    /// Absolute pointer control command (`bx` = sub-command).
    AbsPointerCommand = 41,
    /// Restrict which guest privilege levels may access the pointer (`bx` = restriction).
    AbsPointerRestrict = 86,
}

impl Command {
    pub const fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Some(match id {
            10 => Self::GetVersion,
            39 => Self::AbsPointerData,
            40 => Self::AbsPointerStatus,
            41 => Self::AbsPointerCommand,
            86 => Self::AbsPointerRestrict,
            _ => return None,
        })
    }
}

/// Magic byte placed in the upper 32 bits of the aarch64 trap command word (`x7`).
pub const X86_IO_MAGIC: u8 = 0x86;

/// Bit position of the access size code in the aarch64 trap command word.
pub const X86_IO_W7_SIZE_SHIFT: u32 = 0;

/// Access size code for a 32-bit port access (`in eax, dx`).
pub const X86_IO_SIZE_32: u8 = 2;

bitflags::bitflags! {
    /// Transfer flags in the low bits of the aarch64 trap command word.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct X86IoFlags: u32 {
        /// Port input (`in`) rather than output.
        const DIR = 1 << 2;
        /// General-purpose registers carry the payload in both directions.
        const WITH = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_and_port_spell_the_backdoor_signature() {
        assert_eq!(VMMOUSE_PROTO_MAGIC.to_be_bytes(), *b"VMXh");
        assert_eq!(VMMOUSE_PROTO_PORT.to_be_bytes(), *b"VX");
    }

    #[test]
    fn command_ids_match_vmport_numbering() {
        assert_eq!(Command::GetVersion.id(), 10);
        assert_eq!(Command::AbsPointerData.id(), 39);
        assert_eq!(Command::AbsPointerStatus.id(), 40);
        assert_eq!(Command::AbsPointerCommand.id(), 41);
        assert_eq!(Command::AbsPointerRestrict.id(), 86);

        for cmd in [
            Command::GetVersion,
            Command::AbsPointerData,
            Command::AbsPointerStatus,
            Command::AbsPointerCommand,
            Command::AbsPointerRestrict,
        ] {
            assert_eq!(Command::from_id(cmd.id()), Some(cmd));
        }
        assert_eq!(Command::from_id(0), None);
        assert_eq!(Command::from_id(42), None);
    }

    #[test]
    fn x86_io_flag_bits_do_not_overlap_the_size_field() {
        assert_eq!(X86IoFlags::DIR.bits(), 0x4);
        assert_eq!(X86IoFlags::WITH.bits(), 0x8);
        // Size codes 0..=3 live in bits 0-1.
        assert_eq!(
            X86IoFlags::all().bits() & (0x3 << X86_IO_W7_SIZE_SHIFT),
            0
        );
    }
}
