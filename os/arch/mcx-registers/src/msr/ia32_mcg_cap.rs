use crate::msr::Msr;
use bitfield_struct::bitfield;

/// `IA32_MCG_CAP` — Global Machine Check Capability (MSR `0x179`, read-only).
///
/// Describes how many error-reporting banks the processor implements and
/// which optional Machine Check features are present.
#[bitfield(u64, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct Ia32McgCap {
    /// Bits 0–7 — Count: number of error-reporting banks.
    #[bits(8)]
    pub count: u8,

    /// Bit 8 — `MCG_CTL_P`: `IA32_MCG_CTL` is present.
    pub ctl_p: bool,

    /// Bit 9 — `MCG_EXT_P`: extended machine check state registers present.
    pub ext_p: bool,

    /// Bit 10 — `MCG_CMCI_P`: corrected machine check interrupt supported.
    pub cmci_p: bool,

    /// Bit 11 — `MCG_TES_P`: threshold-based error status present.
    pub tes_p: bool,

    /// Bits 12–15 — Reserved.
    #[bits(4, access = RO)]
    pub reserved0: u8,

    /// Bits 16–23 — `MCG_EXT_CNT`: number of extended state registers.
    #[bits(8)]
    pub ext_cnt: u8,

    /// Bit 24 — `MCG_SER_P`: software error recovery supported.
    pub ser_p: bool,

    /// Bit 25 — Reserved.
    #[bits(access = RO)]
    pub reserved1: bool,

    /// Bit 26 — `MCG_ELOG_P`: enhanced logging (firmware-first) supported.
    pub elog_p: bool,

    /// Bit 27 — `MCG_LMCE_P`: local machine check exception supported.
    pub lmce_p: bool,

    /// Bits 28–63 — Reserved.
    #[bits(36, access = RO)]
    pub reserved2: u64,
}

impl Ia32McgCap {
    /// MSR index for `IA32_MCG_CAP`.
    pub const IA32_MCG_CAP: u32 = 0x179;

    /// The MSR.
    pub const MSR: Msr = Msr::new(Self::IA32_MCG_CAP);
}
