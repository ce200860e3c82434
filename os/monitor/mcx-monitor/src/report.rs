//! # Status decoding
//!
//! Turns one raw `IA32_MCi_STATUS` observation into a [`BankReport`].
//!
//! Whether a bank is reported, and whether its address register is read, is
//! decided by a [`ValidityPolicy`]. The default [`ValidityPolicy::MaskOut`]
//! clears the flag bit and tests the remaining bits for non-zero, which is
//! broader than the architectural "flag is set" test: any non-zero word
//! other than a bare `VAL` is reported, and the address is read for any
//! word other than a bare `ADDRV`. [`ValidityPolicy::Architectural`] tests
//! `VAL` and `ADDRV` directly.

use crate::code::McaErrorCode;
use core::fmt;
use mcx_registers::msr::{Ia32MciStatus, McaBank};

/// Separator line printed after each report and after each sweep.
pub const SEPARATOR: &str = "----";

/// How the `VAL` and `ADDRV` conditions are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidityPolicy {
    /// `(W & !flag) != 0`.
    #[default]
    MaskOut,
    /// `(W & flag) != 0`.
    Architectural,
}

impl ValidityPolicy {
    #[inline]
    const fn test(self, raw: u64, flag: u64) -> bool {
        match self {
            Self::MaskOut => raw & !flag != 0,
            Self::Architectural => raw & flag != 0,
        }
    }

    /// Whether the bank holds something to report.
    #[inline]
    #[must_use]
    pub const fn is_reportable(self, status: Ia32MciStatus) -> bool {
        self.test(status.into_bits(), Ia32MciStatus::VAL)
    }

    /// Whether the address register should be read for this status.
    #[inline]
    #[must_use]
    pub const fn has_address(self, status: Ia32MciStatus) -> bool {
        self.test(status.into_bits(), Ia32MciStatus::ADDRV)
    }
}

/// One reported bank observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BankReport {
    pub bank: McaBank,
    pub status: Ia32MciStatus,
    pub error_code: McaErrorCode,
    /// `IA32_MCi_ADDR`, if the address condition held.
    pub address: Option<u64>,
}

impl BankReport {
    #[must_use]
    pub const fn new(bank: McaBank, status: Ia32MciStatus, address: Option<u64>) -> Self {
        Self {
            bank,
            status,
            error_code: McaErrorCode::classify(status.mca_error_code()),
            address,
        }
    }

    /// The hardware could not correct the error (`UC`).
    #[inline]
    #[must_use]
    pub const fn is_uncorrected(&self) -> bool {
        self.status.uc()
    }

    #[inline]
    #[must_use]
    pub const fn model_specific_error_code(&self) -> u16 {
        self.status.model_specific_error_code()
    }

    #[must_use]
    pub const fn correction_line(&self) -> &'static str {
        if self.is_uncorrected() {
            "CPU was unable to fix this error."
        } else {
            "Fixed by the CPU."
        }
    }
}

/// Renders the report lines without the trailing separator.
impl fmt::Display for BankReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Error detected into bank {} : {:016X}",
            self.bank,
            self.status.into_bits()
        )?;
        writeln!(f, "{}", self.correction_line())?;
        writeln!(f, "  MCA error code : {}", self.error_code)?;
        writeln!(
            f,
            "  Model-specific error code : {:04X}",
            self.model_specific_error_code()
        )?;
        if let Some(address) = self.address {
            writeln!(f, "  ADDR: {address:016X}")?;
        }
        Ok(())
    }
}
