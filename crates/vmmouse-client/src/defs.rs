//! Absolute pointer sub-commands and reply markers.

/// `AbsPointerCommand` argument that switches the device on; the host queues
/// [`VMMOUSE_VERSION_ID`] in response.
pub const VMMOUSE_CMD_READ_ID: u32 = 0x4541_4552;
pub const VMMOUSE_CMD_DISABLE: u32 = 0x0000_00F5;
/// "RREL"
pub const VMMOUSE_CMD_REQUEST_RELATIVE: u32 = 0x4C45_5252;
/// "RABS"
pub const VMMOUSE_CMD_REQUEST_ABSOLUTE: u32 = 0x5342_4152;

/// First queued word after a successful enable ("JUB4").
pub const VMMOUSE_VERSION_ID: u32 = 0x3442_554A;

/// Status marker for a disabled or faulted device.
pub const VMMOUSE_ERROR: u32 = 0xFFFF_0000;
pub const VMMOUSE_QUEUE_LEN_MASK: u32 = 0x0000_FFFF;

/// Largest number of words one `AbsPointerData` exchange returns (`ax, bx, cx, dx`).
pub const VMMOUSE_MAX_DATA_WORDS: usize = 4;

/// `GetVersion` returns `0xFFFF_FFFF` in `ax` when the backdoor exists but refuses the call.
pub const VMMOUSE_BAD_VERSION: u32 = u32::MAX;
