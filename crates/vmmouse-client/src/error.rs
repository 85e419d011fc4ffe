use thiserror::Error;

pub type Result<T> = std::result::Result<T, VmMouseError>;

/// Errors reported while driving the vmmouse backdoor.
///
/// The transport itself cannot fail; every variant here comes from interpreting a reply.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmMouseError {
    /// `GetVersion` did not echo the protocol magic: no backdoor, or a host that does not
    /// implement it.
    #[error("vmmouse backend not present (magic echo {magic:#010x}, version {version:#010x})")]
    BackendNotPresent { magic: u32, version: u32 },

    /// The absolute pointer reported its error marker.
    #[error("vmmouse device reported an error status")]
    DeviceError,

    #[error("failed to enable vmmouse: {0}")]
    EnableFailed(&'static str),

    #[error("unexpected vmmouse version id {got:#010x}")]
    UnexpectedVersionId { got: u32 },

    /// The host did not reset the queue after a disable request.
    #[error("vmmouse did not acknowledge disable (status {status:#010x})")]
    DisableFailed { status: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
