//! Time source abstraction
//!
//! Every bounded read in the driver is a busy-wait against a deadline taken
//! from this clock. Injecting it lets tests simulate elapsed time without
//! sleeping.

/// Monotonic millisecond clock with a blocking delay
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed epoch
    ///
    /// Must never go backwards.
    fn now_ms(&self) -> u64;

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);

    /// Compute a deadline `timeout_ms` from now
    fn deadline(&self, timeout_ms: u32) -> u64 {
        self.now_ms().saturating_add(timeout_ms as u64)
    }

    /// Check whether a deadline has been reached
    fn expired(&self, deadline: u64) -> bool {
        self.now_ms() >= deadline
    }
}

impl<T: Clock + ?Sized> Clock for &mut T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms);
    }
}
