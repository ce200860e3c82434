//! # Throttling
//!
//! The scanner pauses after every report and after every sweep so repeated
//! output stays readable. The duration is not a correctness property.

/// Iterations of [`SpinDelay::default`].
pub const DEFAULT_SPIN_ITERATIONS: u32 = 100_000_000;

/// A blocking pause between polls.
pub trait Delay {
    fn wait(&mut self);
}

impl<D: Delay + ?Sized> Delay for &mut D {
    #[inline]
    fn wait(&mut self) {
        (**self).wait();
    }
}

/// Busy-waits a fixed number of iterations. Does not yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinDelay {
    iterations: u32,
}

impl SpinDelay {
    #[must_use]
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new(DEFAULT_SPIN_ITERATIONS)
    }
}

impl Delay for SpinDelay {
    #[inline(never)]
    fn wait(&mut self) {
        for _ in 0..self.iterations {
            core::hint::spin_loop();
        }
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDelay;

impl Delay for NoDelay {
    #[inline]
    fn wait(&mut self) {}
}
