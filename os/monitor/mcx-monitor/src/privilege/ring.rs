/// CPU privilege rings, represented as numerical privilege levels (0–3).
///
/// The **Current Privilege Level (CPL)** is the ring of the running code
/// segment and lives in the low two bits of `CS`.
///
/// | Ring | Numeric Level | Typical Use |
/// |------|----------------|--------------|
/// | **Ring 0** | 0 | Firmware / kernel (may execute `rdmsr`/`wrmsr`) |
/// | **Ring 1** | 1 | Rarely used |
/// | **Ring 2** | 2 | Rarely used |
/// | **Ring 3** | 3 | User-mode applications |
///
/// Only [`Ring::Ring0`] may access the Machine Check MSRs. At any other
/// level the CPU raises `#GP(0)` (or a hypervisor silently drops the access).
///
/// See also: Intel SDM Vol. 3A, §5.5 “Privilege Levels”.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum Ring {
    /// **Ring 0** — most privileged.
    Ring0 = 0,
    /// **Ring 1**.
    Ring1 = 1,
    /// **Ring 2**.
    Ring2 = 2,
    /// **Ring 3** — least privileged.
    Ring3 = 3,
}

impl Ring {
    /// Mask of the privilege bits in a selector.
    pub const MASK: u8 = 0b11;

    #[inline]
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Decode from the low two bits of a selector; higher bits are ignored.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        match bits & Self::MASK {
            0 => Self::Ring0,
            1 => Self::Ring1,
            2 => Self::Ring2,
            _ => Self::Ring3,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_most_privileged(self) -> bool {
        matches!(self, Self::Ring0)
    }
}

impl From<Ring> for u8 {
    #[inline]
    fn from(r: Ring) -> Self {
        r.to_u8()
    }
}

impl TryFrom<u8> for Ring {
    type Error = u8;

    #[inline]
    fn try_from(r: u8) -> Result<Self, Self::Error> {
        if r <= Self::MASK {
            Ok(Self::from_bits(r))
        } else {
            Err(r)
        }
    }
}

impl core::fmt::Display for Ring {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ring {}", self.to_u8())
    }
}
