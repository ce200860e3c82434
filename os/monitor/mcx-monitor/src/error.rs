use crate::privilege::Ring;

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError {
    /// The monitor is not running at the most privileged level.
    ///
    /// Static for the lifetime of the program; never retried.
    #[error("running in {ring}, but Machine Check registers require ring 0")]
    PrivilegeViolation { ring: Ring },
    /// The console rejected a write.
    #[error("console output failed")]
    Output(#[from] core::fmt::Error),
}
