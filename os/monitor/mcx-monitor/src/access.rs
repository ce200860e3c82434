//! # Register Access
//!
//! The scanner never executes `rdmsr`/`wrmsr` itself. It goes through
//! [`RegisterAccess`], which the firmware build implements with
//! [`HardwareRegisters`] and tests implement with a simulated register file.

use mcx_registers::msr::{Ia32McgCap, McaBank, McaBankRegisters, Msr};

/// Access to the Machine Check register file.
///
/// Accesses are assumed to always succeed; a fault raised by the CPU during
/// an access is fatal and not modeled here.
pub trait RegisterAccess {
    /// Reads the 64-bit value of `msr`.
    fn read_register(&mut self, msr: Msr) -> u64;

    /// Writes `value` to `msr`.
    fn write_register(&mut self, msr: Msr, value: u64);

    /// Number of error-reporting banks, from `IA32_MCG_CAP` bits 0–7.
    fn bank_count(&mut self) -> u8 {
        Ia32McgCap::from_bits(self.read_register(Ia32McgCap::MSR)).count()
    }

    /// The control, status, address and misc register ids of `bank`.
    fn bank_registers(&self, bank: McaBank) -> McaBankRegisters {
        bank.registers()
    }
}

impl<R: RegisterAccess + ?Sized> RegisterAccess for &mut R {
    #[inline]
    fn read_register(&mut self, msr: Msr) -> u64 {
        (**self).read_register(msr)
    }

    #[inline]
    fn write_register(&mut self, msr: Msr, value: u64) {
        (**self).write_register(msr, value);
    }

    #[inline]
    fn bank_count(&mut self) -> u8 {
        (**self).bank_count()
    }

    #[inline]
    fn bank_registers(&self, bank: McaBank) -> McaBankRegisters {
        (**self).bank_registers(bank)
    }
}

/// The real MSRs of the executing CPU.
#[cfg(all(feature = "asm", target_arch = "x86_64"))]
#[derive(Debug)]
pub struct HardwareRegisters {
    _ring0: crate::privilege::Ring0,
}

#[cfg(all(feature = "asm", target_arch = "x86_64"))]
impl HardwareRegisters {
    /// Creates the accessor; requires proof of ring 0.
    #[must_use]
    pub const fn new(ring0: crate::privilege::Ring0) -> Self {
        Self { _ring0: ring0 }
    }
}

#[cfg(all(feature = "asm", target_arch = "x86_64"))]
impl RegisterAccess for HardwareRegisters {
    #[inline]
    fn read_register(&mut self, msr: Msr) -> u64 {
        // SAFETY: the Ring0 token guarantees CPL 0.
        unsafe { msr.load_raw() }
    }

    #[inline]
    fn write_register(&mut self, msr: Msr, value: u64) {
        // SAFETY: the Ring0 token guarantees CPL 0.
        unsafe { msr.store_raw(value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u64);

    impl RegisterAccess for Fixed {
        fn read_register(&mut self, msr: Msr) -> u64 {
            assert_eq!(msr, Ia32McgCap::MSR);
            self.0
        }

        fn write_register(&mut self, _msr: Msr, _value: u64) {
            unreachable!("bank count must not write");
        }
    }

    #[test]
    fn bank_count_reads_low_byte_of_mcg_cap() {
        assert_eq!(Fixed(0x0000_0000_0000_0c09).bank_count(), 9);
        assert_eq!(Fixed(0xFFFF_FFFF_FFFF_FF00).bank_count(), 0);
    }

    #[test]
    fn default_bank_mapping_is_architectural() {
        let regs = Fixed(0).bank_registers(McaBank::new(2));
        assert_eq!(regs.control, Msr(0x408));
        assert_eq!(regs.status, Msr(0x409));
        assert_eq!(regs.address, Msr(0x40a));
    }

    #[test]
    fn mutable_reference_forwards() {
        let mut inner = Fixed(3);
        let mut outer = &mut inner;
        assert_eq!(RegisterAccess::bank_count(&mut outer), 3);
    }
}
