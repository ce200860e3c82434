mod support;

use mcx_monitor::code::UNKNOWN_CODE_LABEL;
use mcx_monitor::{BankScanner, McaErrorCode, MonitorConfig, NoDelay, ValidityPolicy};
use mcx_registers::msr::{Ia32McgCap, McaBank, Msr};
use support::{RecordingHost, SimulatedBanks};

type Scanner<'a> = BankScanner<&'a mut SimulatedBanks, NoDelay, &'a mut RecordingHost>;

fn scanner<'a>(sim: &'a mut SimulatedBanks, host: &'a mut RecordingHost) -> Scanner<'a> {
    let config = MonitorConfig::discover(sim, ValidityPolicy::MaskOut);
    BankScanner::new(sim, NoDelay, host, config)
}

#[test]
fn startup_announces_and_arms_every_bank() {
    let mut sim = SimulatedBanks::with_banks(4);
    let mut host = RecordingHost::default();
    {
        let mut scanner = scanner(&mut sim, &mut host);
        scanner.announce().unwrap();
        scanner.arm_all_banks().unwrap();
        scanner.begin_polling().unwrap();
    }

    assert_eq!(
        host.lines(),
        [
            "Number of available banks : 4",
            "Initializing all Machine Check banks ...",
            "Waiting Machine Check errors...",
            "----",
        ]
    );
    assert_eq!(
        sim.writes,
        [
            (Msr(0x400), u64::MAX),
            (Msr(0x404), u64::MAX),
            (Msr(0x408), u64::MAX),
            (Msr(0x40c), u64::MAX),
        ]
    );
}

#[test]
fn corrected_error_in_bank_two() {
    let mut sim = SimulatedBanks::with_banks(4);
    sim.raise(2, 0x8000_0000_0000_0001);
    let mut host = RecordingHost::default();
    {
        let mut scanner = scanner(&mut sim, &mut host);
        assert_eq!(scanner.sweep().unwrap(), 1);
        assert_eq!(scanner.sweep().unwrap(), 0, "cleared bank must stay quiet");
    }

    assert_eq!(
        host.lines(),
        [
            "Error detected into bank 2 : 8000000000000001",
            "Fixed by the CPU.",
            "  MCA error code : 0001 : Unclassified",
            "  Model-specific error code : 0000",
            "  ADDR: 0000000000000000",
            "----",
        ]
    );
    assert_eq!(sim.status(2), 0);
    assert_eq!(sim.writes, [(McaBank::new(2).status(), 0)]);
}

#[test]
fn uncorrected_internal_timer_error() {
    let mut sim = SimulatedBanks::with_banks(1);
    sim.raise(0, 0xA000_0000_0000_0040);
    let mut host = RecordingHost::default();
    {
        let mut scanner = scanner(&mut sim, &mut host);
        let report = scanner.poll_bank(McaBank::new(0)).unwrap().unwrap();
        assert!(report.is_uncorrected());
        assert_eq!(report.error_code, McaErrorCode::InternalTimer);
    }

    assert!(host.text.contains("CPU was unable to fix this error.\n"));
    assert!(
        host.text
            .contains("  MCA error code : 0040 : Internal Timer Error\n")
    );
}

#[test]
fn idle_and_bare_val_words_are_not_reported() {
    let mut sim = SimulatedBanks::with_banks(3);
    sim.raise(0, 0);
    sim.raise(1, 1 << 63);
    let mut host = RecordingHost::default();
    {
        let mut scanner = scanner(&mut sim, &mut host);
        assert_eq!(scanner.sweep().unwrap(), 0);
    }

    assert!(host.text.is_empty());
    assert!(sim.writes.is_empty());
    assert_eq!(sim.status(1), 1 << 63);
}

#[test]
fn address_is_read_at_check_time_unless_only_addrv_is_set() {
    let mut sim = SimulatedBanks::with_banks(2);
    sim.raise(0, 0x9400_0000_0000_0150);
    sim.set_address(0, 0x0000_0007_ffff_f000);
    sim.raise(1, 1 << 58);
    sim.set_address(1, 0xdead_beef);
    let mut host = RecordingHost::default();
    {
        let mut scanner = scanner(&mut sim, &mut host);
        let first = scanner.poll_bank(McaBank::new(0)).unwrap().unwrap();
        assert_eq!(first.address, Some(0x0000_0007_ffff_f000));
        assert_eq!(first.error_code, McaErrorCode::Unknown(0x0150));

        let second = scanner.poll_bank(McaBank::new(1)).unwrap().unwrap();
        assert_eq!(second.address, None);
    }

    assert!(!sim.reads.contains(&McaBank::new(1).address()));
    assert!(host.text.contains("  ADDR: 00000007FFFFF000\n"));
    assert!(host.text.contains(&format!("0150 : {UNKNOWN_CODE_LABEL}")));
    assert!(!host.text.contains("DEADBEEF"));
}

#[test]
fn re_raised_error_is_reported_again() {
    let mut sim = SimulatedBanks::with_banks(1);
    sim.raise(0, 0x8000_0000_0002_0003);
    let mut host = RecordingHost::default();
    {
        let mut scanner = scanner(&mut sim, &mut host);
        assert_eq!(scanner.sweep().unwrap(), 1);
        assert_eq!(scanner.sweep().unwrap(), 0);
    }

    sim.raise(0, 0x8000_0000_0002_0003);
    {
        let mut scanner = scanner(&mut sim, &mut host);
        assert_eq!(scanner.sweep().unwrap(), 1);
    }

    assert_eq!(host.text.matches("Error detected into bank 0").count(), 2);
    assert!(host.text.contains("  Model-specific error code : 0002\n"));
    assert_eq!(sim.status(0), 0);
}

#[test]
fn architectural_policy_tests_flags_directly() {
    let mut sim = SimulatedBanks::with_banks(2);
    sim.raise(0, 1 << 63);
    sim.raise(1, 0x0000_0000_0000_0001);
    let mut host = RecordingHost::default();
    {
        let config = MonitorConfig::discover(&mut sim, ValidityPolicy::Architectural);
        let mut scanner = BankScanner::new(&mut sim, NoDelay, &mut host, config);
        assert_eq!(scanner.sweep().unwrap(), 1);
    }

    assert!(
        host.text
            .starts_with("Error detected into bank 0 : 8000000000000000\n")
    );
    assert!(!host.text.contains("ADDR"));
    assert_eq!(sim.status(1), 1);
}

#[test]
fn sweep_covers_only_discovered_banks() {
    let mut sim = SimulatedBanks::with_banks(2);
    sim.raise(2, 0x8000_0000_0000_0001);
    let mut host = RecordingHost::default();
    {
        let mut scanner = scanner(&mut sim, &mut host);
        assert_eq!(scanner.config().bank_count, 2);
        assert_eq!(scanner.sweep().unwrap(), 0);
    }

    assert!(!sim.reads.contains(&McaBank::new(2).status()));
    assert!(host.text.is_empty());
}

#[test]
fn capabilities_are_read_once_at_discovery() {
    let mut sim = SimulatedBanks::with_banks(4);
    let config = MonitorConfig::discover(&mut sim, ValidityPolicy::MaskOut);
    assert_eq!(config.bank_count, 4);

    let mut host = RecordingHost::default();
    {
        let mut scanner = BankScanner::new(&mut sim, NoDelay, &mut host, config);
        scanner.announce().unwrap();
        scanner.arm_all_banks().unwrap();
        scanner.sweep().unwrap();
    }

    let cap_reads = sim
        .reads
        .iter()
        .filter(|&&msr| msr == Ia32McgCap::MSR)
        .count();
    assert_eq!(cap_reads, 1);
}
