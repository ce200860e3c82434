#![allow(dead_code)]

use mcx_monitor::{Host, RegisterAccess};
use mcx_registers::msr::{Ia32McgCap, McaBank, Msr};
use std::collections::BTreeMap;
use std::fmt;

/// An in-memory MSR file with an access log.
#[derive(Default)]
pub struct SimulatedBanks {
    values: BTreeMap<Msr, u64>,
    pub reads: Vec<Msr>,
    pub writes: Vec<(Msr, u64)>,
}

impl SimulatedBanks {
    pub fn with_banks(count: u8) -> Self {
        let mut sim = Self::default();
        sim.values.insert(
            Ia32McgCap::MSR,
            Ia32McgCap::new().with_count(count).with_ctl_p(true).into_bits(),
        );
        sim
    }

    /// Hardware logs an error into `bank`.
    pub fn raise(&mut self, bank: u8, status: u64) {
        self.values.insert(McaBank::new(bank).status(), status);
    }

    pub fn set_address(&mut self, bank: u8, address: u64) {
        self.values.insert(McaBank::new(bank).address(), address);
    }

    pub fn value(&self, msr: Msr) -> u64 {
        self.values.get(&msr).copied().unwrap_or_default()
    }

    pub fn status(&self, bank: u8) -> u64 {
        self.value(McaBank::new(bank).status())
    }

    pub fn touched_banks(&self) -> bool {
        self.reads
            .iter()
            .chain(self.writes.iter().map(|(msr, _)| msr))
            .any(|msr| msr.raw() >= McaBank::IA32_MC0_CTL)
    }
}

impl RegisterAccess for SimulatedBanks {
    fn read_register(&mut self, msr: Msr) -> u64 {
        self.reads.push(msr);
        self.value(msr)
    }

    fn write_register(&mut self, msr: Msr, value: u64) {
        self.writes.push((msr, value));
        self.values.insert(msr, value);
    }
}

/// Console that records text and counts pauses.
#[derive(Default)]
pub struct RecordingHost {
    pub text: String,
    pub pauses: usize,
}

impl RecordingHost {
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }
}

impl fmt::Write for RecordingHost {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.text.push_str(s);
        Ok(())
    }
}

impl Host for RecordingHost {
    fn pause(&mut self) {
        self.pauses += 1;
    }
}
