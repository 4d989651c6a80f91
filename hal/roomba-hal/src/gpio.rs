//! GPIO pin abstractions
//!
//! The only pin the driver owns is the wake line (called BRC on the robot's
//! mini-DIN connector). It idles high and is pulsed low to bring the serial
//! interface out of sleep.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Pin writes are treated as infallible.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high();
    }

    fn set_low(&mut self) {
        (**self).set_low();
    }
}
