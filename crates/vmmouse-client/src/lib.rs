//! vmmouse absolute pointer client.
//!
//! Builds backdoor commands on top of [`vmmouse_proto`], decides whether a backend is present,
//! and drives the absolute pointer's enable/disable/mode handshake. Queue contents are returned
//! as raw words.

pub mod client;
pub mod config;
pub mod defs;
pub mod error;

pub use client::{QueueStatus, VmMouse};
pub use config::{PointerMode, Restrict, VmMouseConfig};
pub use error::{Result, VmMouseError};

pub use vmmouse_proto::{Backdoor, CommandBuffer, HostBackdoor};
