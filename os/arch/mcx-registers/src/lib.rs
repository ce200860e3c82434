//! # Typed Machine Check Registers (`X86_64`)
//!
//! Thin, typed views over the registers a Machine Check monitor touches:
//!
//! - [`msr::Msr`] — raw `rdmsr`/`wrmsr` access by architectural index.
//! - [`msr::Ia32McgCap`] — global MCA capabilities (bank count in bits 0–7).
//! - [`msr::McaBank`] — bank index to `IA32_MCi_*` register mapping.
//! - [`msr::Ia32MciStatus`] — the per-bank 64-bit status word.
//! - [`cs::CodeSegment`] — the active `CS` selector, whose RPL bits carry the
//!   current privilege level.
//!
//! Everything that executes an instruction is gated behind the `asm` feature
//! and `target_arch = "x86_64"`; the bitfield layouts are plain data and can
//! be used (and tested) anywhere.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

pub mod cs;
pub mod msr;

pub trait LoadRegister {
    /// Loads the register. Legal at any privilege level.
    fn load() -> Self;
}
