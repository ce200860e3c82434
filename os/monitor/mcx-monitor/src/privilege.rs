//! # Privilege Gate
//!
//! Machine Check registers are MSRs, and `rdmsr`/`wrmsr` are only legal at
//! **CPL 0**. Some firmware environments (or a hypervisor running the image)
//! do not execute UEFI applications in ring 0, so the monitor checks the
//! current level once at startup before any bank register is touched.
//!
//! A successful check yields a [`Ring0`] token, and the hardware register
//! access type can only be built from that token. [`check_ring`] and
//! [`enter`] trust the ring they are handed; only [`check_privilege`] and
//! [`current_ring`] read it from `CS`, so firmware code should pass
//! [`current_ring`] and nothing else.
//!
//! ```text
//!   current_ring()  ──▶  check_ring()  ──Ok(Ring0)──▶  HardwareRegisters::new
//!                               │
//!                               └─Err──▶ two lines, host.pause(), graceful exit
//! ```

mod ring;

pub use ring::Ring;

use crate::error::MonitorError;
use crate::host::Host;
use core::fmt::Write as _;
use log::{debug, warn};

/// First line printed when the gate fails.
pub const WRONG_LEVEL_LINE: &str = "ERROR: wrong permission level ";

/// Second line printed when the gate fails.
pub const RUN_IN_RING0_LINE: &str = "Please run the current EFI program in the ring level 0 !";

/// Token handed out by a privilege check that found [`Ring::Ring0`].
#[derive(Debug)]
pub struct Ring0 {
    _private: (),
}

/// Reads the current privilege level from the low two bits of `CS`.
#[cfg(all(feature = "asm", target_arch = "x86_64"))]
#[must_use]
pub fn current_ring() -> Ring {
    use mcx_registers::LoadRegister;
    use mcx_registers::cs::CodeSegment;

    Ring::from_bits(CodeSegment::load().cpl())
}

/// Checks the given privilege level.
///
/// # Errors
/// Returns [`MonitorError::PrivilegeViolation`] unless `ring` is [`Ring::Ring0`].
pub const fn check_ring(ring: Ring) -> Result<Ring0, MonitorError> {
    if ring.is_most_privileged() {
        Ok(Ring0 { _private: () })
    } else {
        Err(MonitorError::PrivilegeViolation { ring })
    }
}

/// Checks the privilege level the CPU is currently executing at.
///
/// # Errors
/// Returns [`MonitorError::PrivilegeViolation`] when not running in ring 0.
#[cfg(all(feature = "asm", target_arch = "x86_64"))]
pub fn check_privilege() -> Result<Ring0, MonitorError> {
    check_ring(current_ring())
}

/// Runs the gate against `ring`, telling the user about a failure.
///
/// On failure the two diagnostic lines are written to `host`, the host waits
/// for acknowledgment, and the violation is returned so the caller can exit
/// gracefully. A console failure while printing does not skip the pause.
///
/// # Errors
/// Returns [`MonitorError::PrivilegeViolation`] unless `ring` is [`Ring::Ring0`].
pub fn enter<H: Host + ?Sized>(ring: Ring, host: &mut H) -> Result<Ring0, MonitorError> {
    match check_ring(ring) {
        Ok(token) => {
            debug!("Running in {ring}, Machine Check registers are accessible");
            Ok(token)
        }
        Err(err) => {
            warn!("{err}");
            if writeln!(host, "{WRONG_LEVEL_LINE}")
                .and_then(|()| writeln!(host, "{RUN_IN_RING0_LINE}"))
                .is_err()
            {
                warn!("Failed to print the privilege diagnostic");
            }
            host.pause();
            Err(err)
        }
    }
}
