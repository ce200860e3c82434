//! # Bank Scanner
//!
//! Owns the poll loop over all MCA banks:
//!
//! ```text
//! announce ─▶ arm_all_banks ─▶ loop {
//!                                 for bank in 0..n {
//!                                     read STATUS
//!                                     reportable? ─▶ print, read ADDR?, clear STATUS, ----, wait
//!                                 }
//!                                 wait, ----
//!                              }
//! ```
//!
//! A reported status is cleared immediately, so each hardware occurrence is
//! printed at most once; the bank stays quiet until the CPU logs a new error.

use crate::access::RegisterAccess;
use crate::config::MonitorConfig;
use crate::delay::Delay;
use crate::error::MonitorError;
use crate::report::{BankReport, SEPARATOR};
use core::fmt;
use log::{debug, trace, warn};
use mcx_registers::msr::{Ia32MciStatus, McaBank};

/// Value written to every `IA32_MCi_CTL`: report every error class.
pub const ENABLE_ALL_ERRORS: u64 = u64::MAX;

pub struct BankScanner<R, D, W> {
    regs: R,
    delay: D,
    out: W,
    config: MonitorConfig,
}

impl<R, D, W> BankScanner<R, D, W>
where
    R: RegisterAccess,
    D: Delay,
    W: fmt::Write,
{
    #[must_use]
    pub const fn new(regs: R, delay: D, out: W, config: MonitorConfig) -> Self {
        Self {
            regs,
            delay,
            out,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Gives back the parts, e.g. to inspect a simulated register file.
    #[must_use]
    pub fn into_parts(self) -> (R, D, W) {
        (self.regs, self.delay, self.out)
    }

    /// Prints the number of banks found on this CPU.
    ///
    /// # Errors
    /// Returns [`MonitorError::Output`] if the console rejects the write.
    pub fn announce(&mut self) -> Result<(), MonitorError> {
        writeln!(
            self.out,
            "Number of available banks : {}",
            self.config.bank_count
        )?;
        Ok(())
    }

    /// Enables reporting of all error classes on every bank.
    ///
    /// Write-only; the control registers are not read back. All banks are
    /// armed even if the console fails.
    ///
    /// # Errors
    /// Returns [`MonitorError::Output`] if the console rejects the write.
    pub fn arm_all_banks(&mut self) -> Result<(), MonitorError> {
        let printed = writeln!(self.out, "Initializing all Machine Check banks ...");
        for bank in self.config.banks() {
            let control = self.regs.bank_registers(bank).control;
            trace!("Arming bank {bank} ({control})");
            self.regs.write_register(control, ENABLE_ALL_ERRORS);
        }
        debug!("Armed {} Machine Check banks", self.config.bank_count);
        printed.map_err(MonitorError::from)
    }

    /// Polls a single bank.
    ///
    /// Returns `None` without any output or register write when the bank has
    /// nothing to report. Otherwise prints the report, clears the status
    /// register, prints a separator and waits once. The status is cleared
    /// even when printing fails.
    ///
    /// # Errors
    /// Returns [`MonitorError::Output`] if the console rejects the write.
    pub fn poll_bank(&mut self, bank: McaBank) -> Result<Option<BankReport>, MonitorError> {
        let registers = self.regs.bank_registers(bank);
        let status = Ia32MciStatus::from_bits(self.regs.read_register(registers.status));
        if !self.config.policy.is_reportable(status) {
            return Ok(None);
        }

        let address = self
            .config
            .policy
            .has_address(status)
            .then(|| self.regs.read_register(registers.address));
        let report = BankReport::new(bank, status, address);
        debug!(
            "Bank {bank}: {} error, MCA code {:04X}",
            if report.is_uncorrected() {
                "uncorrected"
            } else {
                "corrected"
            },
            report.error_code.raw()
        );

        let printed = write!(self.out, "{report}");
        self.regs
            .write_register(registers.status, Ia32MciStatus::CLEARED.into_bits());
        let printed = printed.and_then(|()| writeln!(self.out, "{SEPARATOR}"));
        self.delay.wait();

        printed?;
        Ok(Some(report))
    }

    /// One pass over all banks. Returns how many banks were reported.
    ///
    /// Every bank is polled even if printing fails; the first console error
    /// is returned after the pass.
    ///
    /// # Errors
    /// Returns [`MonitorError::Output`] if the console rejects a write.
    pub fn sweep(&mut self) -> Result<usize, MonitorError> {
        let mut reported = 0;
        let mut first_error = None;
        for bank in self.config.banks() {
            match self.poll_bank(bank) {
                Ok(Some(_)) => reported += 1,
                Ok(None) => {}
                Err(err) => {
                    reported += 1;
                    first_error.get_or_insert(err);
                }
            }
        }

        match first_error {
            None => Ok(reported),
            Some(err) => Err(err),
        }
    }

    /// Waits once, then prints the separator closing a sweep.
    ///
    /// # Errors
    /// Returns [`MonitorError::Output`] if the console rejects the write.
    pub fn end_sweep(&mut self) -> Result<(), MonitorError> {
        self.delay.wait();
        writeln!(self.out, "{SEPARATOR}")?;
        Ok(())
    }

    /// Prints the banner that precedes the poll loop.
    ///
    /// # Errors
    /// Returns [`MonitorError::Output`] if the console rejects the write.
    pub fn begin_polling(&mut self) -> Result<(), MonitorError> {
        writeln!(self.out, "Waiting Machine Check errors...")?;
        writeln!(self.out, "{SEPARATOR}")?;
        Ok(())
    }

    /// Polls all banks forever.
    ///
    /// Console failures are logged and otherwise ignored.
    pub fn run_forever(mut self) -> ! {
        Self::log_failure("polling banner", self.begin_polling());
        loop {
            Self::log_failure("bank report", self.sweep());
            Self::log_failure("sweep separator", self.end_sweep());
        }
    }

    /// Announces the banks, arms them once and polls forever.
    pub fn run(mut self) -> ! {
        Self::log_failure("bank count", self.announce());
        Self::log_failure("arming banner", self.arm_all_banks());
        self.run_forever()
    }

    fn log_failure<T>(what: &str, result: Result<T, MonitorError>) {
        if let Err(err) = result {
            warn!("Failed to print {what}: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ValidityPolicy;
    use mcx_registers::msr::Msr;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct Registers {
        values: BTreeMap<Msr, u64>,
        writes: Vec<(Msr, u64)>,
    }

    impl RegisterAccess for Registers {
        fn read_register(&mut self, msr: Msr) -> u64 {
            self.values.get(&msr).copied().unwrap_or_default()
        }

        fn write_register(&mut self, msr: Msr, value: u64) {
            self.writes.push((msr, value));
            self.values.insert(msr, value);
        }
    }

    #[derive(Default)]
    struct Waits(usize);

    impl Delay for Waits {
        fn wait(&mut self) {
            self.0 += 1;
        }
    }

    struct BrokenConsole;

    impl fmt::Write for BrokenConsole {
        fn write_str(&mut self, _s: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn scanner(banks: u8, regs: Registers) -> BankScanner<Registers, Waits, String> {
        BankScanner::new(
            regs,
            Waits::default(),
            String::new(),
            MonitorConfig::new(banks, ValidityPolicy::MaskOut),
        )
    }

    #[test]
    fn arming_writes_all_ones_to_each_control_register() {
        let mut scanner = scanner(3, Registers::default());
        scanner.arm_all_banks().unwrap();
        let (regs, _, out) = scanner.into_parts();
        assert_eq!(
            regs.writes,
            [
                (Msr(0x400), u64::MAX),
                (Msr(0x404), u64::MAX),
                (Msr(0x408), u64::MAX)
            ]
        );
        assert_eq!(out, "Initializing all Machine Check banks ...\n");
    }

    #[test]
    fn idle_bank_is_silent() {
        let mut regs = Registers::default();
        regs.values.insert(McaBank::new(0).status(), 1 << 63);
        let mut scanner = scanner(1, regs);
        assert_eq!(scanner.poll_bank(McaBank::new(0)).unwrap(), None);
        let (regs, waits, out) = scanner.into_parts();
        assert!(regs.writes.is_empty());
        assert_eq!(waits.0, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn reported_bank_is_cleared_and_waited_on() {
        let bank = McaBank::new(1);
        let mut regs = Registers::default();
        regs.values.insert(bank.status(), 0x8000_0000_0000_0003);
        regs.values.insert(bank.address(), 0x1000);
        let mut scanner = scanner(2, regs);

        let report = scanner.poll_bank(bank).unwrap().unwrap();
        assert_eq!(report.address, Some(0x1000));
        assert_eq!(scanner.poll_bank(bank).unwrap(), None);

        let (regs, waits, out) = scanner.into_parts();
        assert_eq!(regs.writes, [(bank.status(), 0)]);
        assert_eq!(waits.0, 1);
        assert!(out.contains("  MCA error code : 0003 : External Error\n"));
        assert!(out.contains("  ADDR: 0000000000001000\n"));
        assert!(out.ends_with("----\n"));
    }

    #[test]
    fn console_failure_still_clears_every_bank() {
        let mut regs = Registers::default();
        regs.values.insert(McaBank::new(0).status(), 0x11);
        regs.values.insert(McaBank::new(2).status(), 0x22);
        let mut scanner = BankScanner::new(
            regs,
            Waits::default(),
            BrokenConsole,
            MonitorConfig::new(3, ValidityPolicy::MaskOut),
        );

        assert_eq!(scanner.sweep(), Err(MonitorError::Output(fmt::Error)));
        let (regs, delay, _) = scanner.into_parts();
        assert_eq!(
            regs.writes,
            [(McaBank::new(0).status(), 0), (McaBank::new(2).status(), 0)]
        );
        assert_eq!(delay.0, 2);
    }

    #[test]
    fn end_sweep_waits_then_separates() {
        let mut scanner = scanner(0, Registers::default());
        scanner.end_sweep().unwrap();
        let (_, waits, out) = scanner.into_parts();
        assert_eq!(waits.0, 1);
        assert_eq!(out, "----\n");
    }
}
