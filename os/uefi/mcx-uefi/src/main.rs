//! # UEFI Machine Check Monitor
//!
//! A UEFI application that arms every Machine Check Architecture (MCA) bank
//! of the boot processor and then watches them forever, printing each
//! hardware error the CPU logs.
//!
//! ## Flow
//!
//! ```text
//! UEFI Firmware
//!         ↓
//! ┌─────────────────────────────────────────────┐
//! │              MCx Monitor                    │
//! ├─────────────────────────────────────────────┤
//! │  1. Environment Setup                       │
//! │     • UEFI helpers, stderr logger           │
//! │  2. Privilege Gate                          │
//! │     • CS.RPL must be 0, else explain,       │
//! │       wait for a key, exit with SUCCESS     │
//! │  3. Discovery                               │
//! │     • IA32_MCG_CAP → bank count             │
//! │  4. Arming                                  │
//! │     • IA32_MCi_CTL ← all ones               │
//! │  5. Polling (never returns)                 │
//! │     • IA32_MCi_STATUS → report → clear      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Build features
//! * `verbose`: log at debug level.
//! * `architectural-validity`: report on `VAL`, read the address on `ADDRV`,
//!   instead of the default mask-out test.
//!
//! On non-UEFI targets this crate builds a stub binary so the workspace
//! can be tested on the host.

#![cfg_attr(target_os = "uefi", no_std, no_main)]

#[cfg(target_os = "uefi")]
mod console;
#[cfg(target_os = "uefi")]
mod logger;

#[cfg(target_os = "uefi")]
use crate::console::UefiConsole;
#[cfg(target_os = "uefi")]
use crate::logger::UefiLogger;
#[cfg(target_os = "uefi")]
use log::{LevelFilter, info};
#[cfg(target_os = "uefi")]
use mcx_monitor::{
    BankScanner, HardwareRegisters, MonitorConfig, SpinDelay, ValidityPolicy, privilege,
};
#[cfg(target_os = "uefi")]
use uefi::prelude::*;

#[cfg(all(target_os = "uefi", feature = "verbose"))]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(all(target_os = "uefi", not(feature = "verbose")))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[cfg(all(target_os = "uefi", feature = "architectural-validity"))]
const VALIDITY_POLICY: ValidityPolicy = ValidityPolicy::Architectural;
#[cfg(all(target_os = "uefi", not(feature = "architectural-validity")))]
const VALIDITY_POLICY: ValidityPolicy = ValidityPolicy::MaskOut;

#[cfg(target_os = "uefi")]
static LOGGER: UefiLogger = UefiLogger::new(LOG_LEVEL);

#[cfg(target_os = "uefi")]
#[entry]
fn efi_main() -> Status {
    if uefi::helpers::init().is_err() {
        return Status::UNSUPPORTED;
    }

    if let Err(e) = LOGGER.init() {
        uefi::println!("Failed to install the logger: {e}");
    }

    info!("MCx monitor starting");

    let mut console = UefiConsole;
    let ring = privilege::current_ring();
    let Ok(ring0) = privilege::enter(ring, &mut console) else {
        // Nothing to retry; the privilege level is fixed for this image.
        return Status::SUCCESS;
    };

    let mut regs = HardwareRegisters::new(ring0);
    let config = MonitorConfig::discover(&mut regs, VALIDITY_POLICY);
    info!(
        "Monitoring {} Machine Check banks ({:?} validity)",
        config.bank_count, config.policy
    );

    BankScanner::new(regs, SpinDelay::default(), console, config).run()
}

#[cfg(not(target_os = "uefi"))]
fn main() {
    eprintln!("mcx-uefi is a UEFI application; build it for x86_64-unknown-uefi");
}
