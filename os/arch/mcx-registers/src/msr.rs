//! # Model-Specific Registers (MSR) for Machine Check Architecture
//!
//! The Machine Check Architecture exposes its state through model-specific
//! registers, accessible only at **CPL=0** via `RDMSR` and `WRMSR`:
//!
//! - `IA32_MCG_CAP` (`0x179`): global capabilities, including the number of
//!   error-reporting banks in bits 0–7.
//! - `IA32_MCi_CTL` (`0x400 + 4·i`): per-bank enable mask for error classes.
//! - `IA32_MCi_STATUS` (`0x401 + 4·i`): per-bank status word.
//! - `IA32_MCi_ADDR` (`0x402 + 4·i`): address associated with the error.
//! - `IA32_MCi_MISC` (`0x403 + 4·i`): additional model-specific information.
//!
//! ## References
//! - Intel SDM Vol. 3B, §16.3 “Machine-Check MSRs”
//! - AMD64 Architecture Programmer’s Manual Vol. 2, §9.3 “Machine-Check Architecture MSRs”

mod ia32_mcg_cap;
mod ia32_mci;
mod ia32_mci_status;

pub use ia32_mcg_cap::Ia32McgCap;
pub use ia32_mci::{McaBank, McaBankRegisters};
pub use ia32_mci_status::Ia32MciStatus;

/// Identifies a **Model-Specific Register (MSR)** by its architectural index.
///
/// MSR indices are 32-bit identifiers used by the `rdmsr` and `wrmsr`
/// instructions to select which internal CPU register to access.
/// The index space is architecture-defined; see the Intel/AMD manuals for details.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Msr(pub u32);

impl Msr {
    /// Creates a new `Msr` from a raw index.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the underlying raw MSR index.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[cfg(all(feature = "asm", target_arch = "x86_64"))]
impl Msr {
    /// Write a 64-bit value to the given **Model-Specific Register (MSR)**.
    ///
    /// # Safety
    /// - This function executes the privileged `WRMSR` instruction, which is only
    ///   valid at **CPL=0**. Executing this in user mode will raise a **#GP(0)**.
    /// - The target MSR must be **valid and writable** on the current CPU.
    ///   Writing an invalid or reserved MSR causes a general protection fault.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    #[doc(alias = "write_model_specific_register")]
    pub unsafe fn store_raw(self, val: u64) {
        let lo = (val & 0xFFFF_FFFF) as u32;
        let hi = (val >> 32) as u32;
        let msr = self.raw();
        unsafe {
            core::arch::asm!(
            "wrmsr",
            in("ecx") msr,
            in("eax") lo,
            in("edx") hi,
            options(nostack, preserves_flags)
            );
        }
    }

    /// Reads the 64-bit value from the given **Model-Specific Register (MSR)**.
    ///
    /// # Safety
    /// Executes `RDMSR`, which requires **CPL=0** and a register that exists
    /// on the current CPU; otherwise the CPU raises **#GP(0)**.
    #[inline(always)]
    #[allow(clippy::inline_always)]
    #[doc(alias = "read_model_specific_register")]
    pub unsafe fn load_raw(self) -> u64 {
        let lo: u32;
        let hi: u32;
        let ecx = self.raw();
        unsafe {
            core::arch::asm!(
            "rdmsr",
            in("ecx") ecx,
            out("eax") lo,
            out("edx") hi,
            options(nomem, nostack, preserves_flags)
            );
        }
        (u64::from(hi) << 32) | u64::from(lo)
    }
}

impl core::fmt::Display for Msr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "MSR {:#x}", self.0)
    }
}
