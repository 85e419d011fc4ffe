use core::mem::size_of;

use crate::consts::{Command, VMMOUSE_PROTO_MAGIC, VMMOUSE_PROTO_PORT};

/// One general-purpose register slot of the command buffer.
///
/// The transport moves whole registers, so the slot is as wide as the target's registers. On
/// `x86_64` the trapping `in eax, dx` still only produces 32-bit results.
#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
pub type Word = u64;
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub type Word = u32;

/// Number of register slots exchanged per backdoor call.
pub const CMD_WORDS: usize = 6;

/// Backdoor command/reply buffer (`ax, bx, cx, dx, si, di`).
///
/// The same storage carries the command in and the reply out. The transport addresses slots by
/// byte offset, so field order and `repr(C)` are part of the host contract.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CommandBuffer {
    /// In: [`VMMOUSE_PROTO_MAGIC`]. Out: status / version.
    pub ax: Word,
    /// In: command argument ("size"). Out: first reply word.
    pub bx: Word,
    /// In: command id. Out: second reply word.
    pub cx: Word,
    /// In: [`VMMOUSE_PROTO_PORT`]. Out: third reply word.
    pub dx: Word,
    pub si: Word,
    pub di: Word,
}

const _: () = assert!(size_of::<CommandBuffer>() == CMD_WORDS * size_of::<Word>());

impl CommandBuffer {
    pub const fn new() -> Self {
        Self {
            ax: 0,
            bx: 0,
            cx: 0,
            dx: 0,
            si: 0,
            di: 0,
        }
    }

    /// Builds an unstamped command with `cx = cmd` and `bx = arg`.
    pub const fn with_command(cmd: Command, arg: u32) -> Self {
        Self {
            bx: arg as Word,
            cx: cmd.id() as Word,
            ..Self::new()
        }
    }

    pub const fn from_words(words: [Word; CMD_WORDS]) -> Self {
        let [ax, bx, cx, dx, si, di] = words;
        Self {
            ax,
            bx,
            cx,
            dx,
            si,
            di,
        }
    }

    /// Slots in register order.
    pub const fn to_words(&self) -> [Word; CMD_WORDS] {
        [self.ax, self.bx, self.cx, self.dx, self.si, self.di]
    }

    /// Writes the protocol magic into `ax` and the backdoor port into `dx`.
    pub fn stamp(&mut self) {
        self.ax = VMMOUSE_PROTO_MAGIC as Word;
        self.dx = VMMOUSE_PROTO_PORT as Word;
    }

    pub fn is_stamped(&self) -> bool {
        self.magic() == VMMOUSE_PROTO_MAGIC && self.port() == VMMOUSE_PROTO_PORT
    }

    pub fn magic(&self) -> u32 {
        self.ax as u32
    }

    pub fn port(&self) -> u16 {
        self.dx as u16
    }

    /// Command id in the low 16 bits of `cx`.
    pub fn command_id(&self) -> u16 {
        self.cx as u16
    }

    pub fn command(&self) -> Option<Command> {
        Command::from_id(u32::from(self.command_id()))
    }

    /// Reply values as the host produced them.
    ///
    /// Each slot is truncated to 32 bits; the upper half of a 64-bit slot carries nothing on
    /// any supported target.
    pub fn reply_words_u32(&self) -> [u32; CMD_WORDS] {
        self.to_words().map(|w| w as u32)
    }
}
