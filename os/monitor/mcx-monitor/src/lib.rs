//! # Machine Check Monitor
//!
//! Core of a firmware-level diagnostic monitor for the x86-64 **Machine Check
//! Architecture** (MCA). The monitor arms every MCA bank for all error
//! classes, then polls the banks forever and prints each error it finds,
//! corrected or not, before clearing the bank.
//!
//! ## Flow
//!
//! ```text
//!  privilege::enter ──Err──▶ diagnostic, pause, graceful exit
//!         │
//!       Ring0
//!         ▼
//!  HardwareRegisters::new ─▶ MonitorConfig::discover ─▶ BankScanner::run (never returns)
//! ```
//!
//! ## Seams
//!
//! Everything that touches the machine is behind a trait, so the decode/poll
//! logic runs on a host against simulated registers:
//!
//! * [`RegisterAccess`] — `rdmsr`/`wrmsr`, bank count and bank register ids.
//! * [`Delay`] — throttling between reports.
//! * [`Host`] — console text and the "press any key" primitive.
//!
//! ## Report format
//!
//! ```text
//! Error detected into bank 2 : 8000000000000001
//! Fixed by the CPU.
//!   MCA error code : 0001 : Unclassified
//!   Model-specific error code : 0000
//!   ADDR: 0000000000000000
//! ----
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod access;
pub mod code;
pub mod config;
pub mod delay;
pub mod error;
pub mod host;
pub mod privilege;
pub mod report;
pub mod scanner;

pub use access::RegisterAccess;
#[cfg(all(feature = "asm", target_arch = "x86_64"))]
pub use access::HardwareRegisters;
pub use code::McaErrorCode;
pub use config::MonitorConfig;
pub use delay::{Delay, NoDelay, SpinDelay};
pub use error::MonitorError;
pub use host::Host;
pub use privilege::{Ring, Ring0};
pub use report::{BankReport, ValidityPolicy};
pub use scanner::BankScanner;
