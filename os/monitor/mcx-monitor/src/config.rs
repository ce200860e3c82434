use crate::access::RegisterAccess;
use crate::report::ValidityPolicy;
use log::debug;
use mcx_registers::msr::{Ia32McgCap, McaBank};

/// Immutable scanner configuration, discovered once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Number of error-reporting banks on this CPU.
    pub bank_count: u8,
    pub policy: ValidityPolicy,
}

impl MonitorConfig {
    #[must_use]
    pub const fn new(bank_count: u8, policy: ValidityPolicy) -> Self {
        Self { bank_count, policy }
    }

    /// Reads `IA32_MCG_CAP` once and takes the bank count from it.
    pub fn discover<R: RegisterAccess + ?Sized>(regs: &mut R, policy: ValidityPolicy) -> Self {
        let capabilities = Ia32McgCap::from_bits(regs.read_register(Ia32McgCap::MSR));
        debug!(
            "IA32_MCG_CAP: count={}, ctl_p={}, cmci_p={}, tes_p={}, ser_p={}, lmce_p={}",
            capabilities.count(),
            capabilities.ctl_p(),
            capabilities.cmci_p(),
            capabilities.tes_p(),
            capabilities.ser_p(),
            capabilities.lmce_p()
        );

        Self::new(capabilities.count(), policy)
    }

    /// Banks `0..bank_count` in ascending order.
    #[must_use]
    pub fn banks(&self) -> impl Iterator<Item = McaBank> + use<> {
        (0..self.bank_count).map(McaBank::new)
    }
}
