//! # Code Segment Selector
//!
//! The low two bits of the active `CS` selector hold the **current privilege
//! level** (CPL). Reading `CS` with `mov r16, cs` is not privileged, so the
//! monitor can always find out whether it runs in ring 0 before it touches
//! any MSR.
//!
//! ```text
//!  15            3 2  1  0
//! +----------------+--+----+
//! |   Index[12:0]  |TI| RPL|
//! +----------------+--+----+
//! ```

use bitfield_struct::bitfield;

/// Raw 16-bit `CS` selector.
#[bitfield(u16, order = Lsb)]
#[derive(Eq, PartialEq)]
pub struct CodeSegment {
    /// Bits 0–1 — Requested Privilege Level; for `CS` this is the CPL.
    #[bits(2)]
    pub rpl: u8,

    /// Bit 2 — Table Indicator: 0 = GDT, 1 = LDT.
    pub ti: bool,

    /// Bits 3–15 — Descriptor index.
    #[bits(13)]
    pub index: u16,
}

impl CodeSegment {
    /// The current privilege level encoded in this selector (`0..=3`).
    #[inline]
    #[must_use]
    pub const fn cpl(self) -> u8 {
        self.rpl()
    }
}

#[cfg(all(feature = "asm", target_arch = "x86_64"))]
impl crate::LoadRegister for CodeSegment {
    #[inline]
    fn load() -> Self {
        let cs: u16;
        unsafe {
            core::arch::asm!(
                "mov {0:x}, cs",
                out(reg) cs,
                options(nomem, nostack, preserves_flags)
            );
        }
        Self::from_bits(cs)
    }
}
