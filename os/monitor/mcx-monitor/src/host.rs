use core::fmt;

/// The firmware services the monitor needs from its host: a text console and
/// a "wait for the user to acknowledge" primitive.
pub trait Host: fmt::Write {
    /// Blocks until the user acknowledges (e.g. presses a key).
    fn pause(&mut self);
}

impl<H: Host + ?Sized> Host for &mut H {
    #[inline]
    fn pause(&mut self) {
        (**self).pause();
    }
}
