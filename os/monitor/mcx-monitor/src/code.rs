//! # MCA error codes
//!
//! Bits 0–15 of `IA32_MCi_STATUS`. Only the "simple" architectural codes are
//! classified; the compound codes (memory hierarchy, TLB, bus errors) are
//! reported as unknown.

use core::fmt;

/// Marker printed for an MCA error code outside every known range.
pub const UNKNOWN_CODE_LABEL: &str = "ERROR UNKNOWN MCA ERROR CODE!";

/// A classified MCA error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McaErrorCode {
    /// `0x0000`
    NoError,
    /// `0x0001`
    Unclassified,
    /// `0x0002`
    MicrocodeRomParity,
    /// `0x0003`
    External,
    /// `0x0004` — functional redundancy check.
    Frc,
    /// `0x0040`
    InternalTimer,
    /// `0x0041..=0x007F`
    InternalUnclassified(u16),
    /// Any other value. Informational only; scanning continues.
    Unknown(u16),
}

impl McaErrorCode {
    /// First code of the internal unclassified range.
    pub const INTERNAL_UNCLASSIFIED_FIRST: u16 = 0x0041;

    /// Last code of the internal unclassified range.
    pub const INTERNAL_UNCLASSIFIED_LAST: u16 = 0x007F;

    #[must_use]
    pub const fn classify(code: u16) -> Self {
        match code {
            0x0000 => Self::NoError,
            0x0001 => Self::Unclassified,
            0x0002 => Self::MicrocodeRomParity,
            0x0003 => Self::External,
            0x0004 => Self::Frc,
            0x0040 => Self::InternalTimer,
            Self::INTERNAL_UNCLASSIFIED_FIRST..=Self::INTERNAL_UNCLASSIFIED_LAST => {
                Self::InternalUnclassified(code)
            }
            _ => Self::Unknown(code),
        }
    }

    /// The raw 16-bit code.
    #[must_use]
    pub const fn raw(self) -> u16 {
        match self {
            Self::NoError => 0x0000,
            Self::Unclassified => 0x0001,
            Self::MicrocodeRomParity => 0x0002,
            Self::External => 0x0003,
            Self::Frc => 0x0004,
            Self::InternalTimer => 0x0040,
            Self::InternalUnclassified(code) | Self::Unknown(code) => code,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoError => "No Error",
            Self::Unclassified => "Unclassified",
            Self::MicrocodeRomParity => "Microcode ROM Parity Error",
            Self::External => "External Error",
            Self::Frc => "FRC Error",
            Self::InternalTimer => "Internal Timer Error",
            Self::InternalUnclassified(_) => "Internal Unclassified",
            Self::Unknown(_) => UNKNOWN_CODE_LABEL,
        }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<u16> for McaErrorCode {
    #[inline]
    fn from(code: u16) -> Self {
        Self::classify(code)
    }
}

/// Formats as `CODE : Label`, e.g. `0040 : Internal Timer Error`.
impl fmt::Display for McaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} : {}", self.raw(), self.label())
    }
}
