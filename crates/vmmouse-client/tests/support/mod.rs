//! In-process stand-in for the hypervisor's vmport/vmmouse emulation.

use std::collections::VecDeque;

use vmmouse_client::defs::{
    VMMOUSE_CMD_DISABLE, VMMOUSE_CMD_READ_ID, VMMOUSE_CMD_REQUEST_ABSOLUTE,
    VMMOUSE_CMD_REQUEST_RELATIVE, VMMOUSE_ERROR, VMMOUSE_VERSION_ID,
};
use vmmouse_proto::{
    Backdoor, Command, CommandBuffer, Word, VMMOUSE_PROTO_MAGIC, VMMOUSE_PROTO_PORT,
};

pub const FAKE_BACKDOOR_VERSION: u32 = 6;

#[derive(Debug)]
pub struct FakeHost {
    pub status: u32,
    pub queue: VecDeque<u32>,
    pub absolute: bool,
    pub restrict: u32,
    /// Word queued in reply to `READ_ID`.
    pub version_id: u32,
    /// Commands in arrival order, as (`cx`, `bx`).
    pub log: Vec<(u16, u32)>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            status: VMMOUSE_ERROR,
            queue: VecDeque::new(),
            absolute: false,
            restrict: 0,
            version_id: VMMOUSE_VERSION_ID,
            log: Vec::new(),
        }
    }
}

impl FakeHost {
    pub fn push_words(&mut self, words: &[u32]) {
        self.queue.extend(words);
        self.sync_status();
    }

    fn sync_status(&mut self) {
        if self.status != VMMOUSE_ERROR {
            self.status = self.queue.len() as u32;
        }
    }

    fn abs_pointer_command(&mut self, arg: u32) {
        match arg {
            VMMOUSE_CMD_READ_ID => {
                self.status = 0;
                self.queue.clear();
                self.queue.push_back(self.version_id);
                self.sync_status();
            }
            VMMOUSE_CMD_DISABLE => {
                self.queue.clear();
                self.status = VMMOUSE_ERROR;
            }
            VMMOUSE_CMD_REQUEST_ABSOLUTE => self.absolute = true,
            VMMOUSE_CMD_REQUEST_RELATIVE => self.absolute = false,
            _ => {}
        }
    }
}

impl Backdoor for FakeHost {
    fn exchange(&mut self, cmd: &mut CommandBuffer) {
        // An unstamped command never reaches the device model.
        if cmd.magic() != VMMOUSE_PROTO_MAGIC || cmd.port() != VMMOUSE_PROTO_PORT {
            return;
        }
        let arg = cmd.bx as u32;
        self.log.push((cmd.command_id(), arg));

        match cmd.command() {
            Some(Command::GetVersion) => {
                cmd.ax = FAKE_BACKDOOR_VERSION as Word;
                cmd.bx = VMMOUSE_PROTO_MAGIC as Word;
            }
            Some(Command::AbsPointerCommand) => self.abs_pointer_command(arg),
            Some(Command::AbsPointerStatus) => cmd.ax = self.status as Word,
            Some(Command::AbsPointerRestrict) => self.restrict = arg,
            Some(Command::AbsPointerData) => {
                let mut words = [0 as Word; 4];
                for slot in words.iter_mut().take(arg as usize) {
                    *slot = self.queue.pop_front().unwrap_or(0) as Word;
                }
                let [ax, bx, cx, dx] = words;
                cmd.ax = ax;
                cmd.bx = bx;
                cmd.cx = cx;
                cmd.dx = dx;
                self.sync_status();
            }
            None => {}
        }
    }
}
