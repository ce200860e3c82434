use crate::msr::Msr;

/// An MCA error-reporting bank, identified by its ordinal index.
///
/// Each bank owns four consecutive MSRs starting at `IA32_MC0_CTL` (`0x400`):
///
/// ```text
///   IA32_MCi_CTL    = 0x400 + 4·i
///   IA32_MCi_STATUS = 0x401 + 4·i
///   IA32_MCi_ADDR   = 0x402 + 4·i
///   IA32_MCi_MISC   = 0x403 + 4·i
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct McaBank(pub u8);

impl McaBank {
    /// MSR index of `IA32_MC0_CTL`, the first bank register.
    pub const IA32_MC0_CTL: u32 = 0x400;

    /// Number of MSRs per bank.
    pub const REGISTERS_PER_BANK: u32 = 4;

    #[inline]
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    const fn base(self) -> u32 {
        Self::IA32_MC0_CTL + Self::REGISTERS_PER_BANK * (self.0 as u32)
    }

    /// `IA32_MCi_CTL` of this bank.
    #[inline]
    #[must_use]
    pub const fn control(self) -> Msr {
        Msr::new(self.base())
    }

    /// `IA32_MCi_STATUS` of this bank.
    #[inline]
    #[must_use]
    pub const fn status(self) -> Msr {
        Msr::new(self.base() + 1)
    }

    /// `IA32_MCi_ADDR` of this bank.
    #[inline]
    #[must_use]
    pub const fn address(self) -> Msr {
        Msr::new(self.base() + 2)
    }

    /// `IA32_MCi_MISC` of this bank.
    #[inline]
    #[must_use]
    pub const fn misc(self) -> Msr {
        Msr::new(self.base() + 3)
    }

    /// All register ids of this bank at once.
    #[inline]
    #[must_use]
    pub const fn registers(self) -> McaBankRegisters {
        McaBankRegisters {
            control: self.control(),
            status: self.status(),
            address: self.address(),
            misc: self.misc(),
        }
    }
}

impl From<u8> for McaBank {
    #[inline]
    fn from(index: u8) -> Self {
        Self(index)
    }
}

impl core::fmt::Display for McaBank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The register ids that belong to one [`McaBank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McaBankRegisters {
    pub control: Msr,
    pub status: Msr,
    pub address: Msr,
    pub misc: Msr,
}
