use bitfield_struct::bitfield;

/// `IA32_MCi_STATUS` — per-bank Machine Check status word (MSR `0x401 + 4·i`).
///
/// Written by the processor when a bank detects an error. Software clears the
/// bank by writing zero, after which the bank can log a fresh error.
///
/// ```text
///  63  62   61  60  59    58    57  56  55 54-53 52-32      31-16           15-0
/// +---+----+--+---+-----+-----+---+---+--+-----+------+----------------+----------+
/// |VAL|OVER|UC|EN |MISCV|ADDRV|PCC| S |AR| THR | info | model-specific | MCA code |
/// +---+----+--+---+-----+-----+---+---+--+-----+------+----------------+----------+
/// ```
#[bitfield(u64, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct Ia32MciStatus {
    /// Bits 0–15 — MCA error code, architecturally defined.
    #[bits(16)]
    pub mca_error_code: u16,

    /// Bits 16–31 — Model-specific error code.
    #[bits(16)]
    pub model_specific_error_code: u16,

    /// Bits 32–52 — Other information (corrected error count and
    /// implementation-specific data).
    #[bits(21)]
    pub other_info: u32,

    /// Bits 53–54 — Threshold-based error status (when `MCG_TES_P`).
    #[bits(2)]
    pub threshold: u8,

    /// Bit 55 — AR: recovery action required.
    pub ar: bool,

    /// Bit 56 — S: signaled via machine check exception.
    pub s: bool,

    /// Bit 57 — PCC: processor context corrupt.
    pub pcc: bool,

    /// Bit 58 — ADDRV: `IA32_MCi_ADDR` holds the error address.
    pub addrv: bool,

    /// Bit 59 — MISCV: `IA32_MCi_MISC` holds additional information.
    pub miscv: bool,

    /// Bit 60 — EN: error reporting was enabled for this error.
    pub en: bool,

    /// Bit 61 — UC: the error was not corrected by hardware.
    pub uc: bool,

    /// Bit 62 — OVER: an earlier error was overwritten.
    pub over: bool,

    /// Bit 63 — VAL: the register contents are valid.
    pub val: bool,
}

impl Ia32MciStatus {
    /// Bit position of `VAL`.
    pub const VAL_BIT: u32 = 63;

    /// Bit position of `UC`.
    pub const UC_BIT: u32 = 61;

    /// Bit position of `ADDRV`.
    pub const ADDRV_BIT: u32 = 58;

    /// Mask of the `VAL` bit.
    pub const VAL: u64 = 1 << Self::VAL_BIT;

    /// Mask of the `UC` bit.
    pub const UC: u64 = 1 << Self::UC_BIT;

    /// Mask of the `ADDRV` bit.
    pub const ADDRV: u64 = 1 << Self::ADDRV_BIT;

    /// Value written to a status register to clear the bank.
    pub const CLEARED: Self = Self::new();
}
