//! Serial byte channel abstraction
//!
//! The Open Interface is a half-duplex, byte-oriented link. The driver writes
//! whole commands and reads responses one byte at a time while polling a
//! deadline, so the receive side must never block.

/// Default Open Interface baud rate used when none is configured
pub const DEFAULT_BAUD_RATE: u32 = 19_200;

/// Half-duplex serial link to the robot
pub trait ByteChannel {
    /// Error type for channel operations
    type Error;

    /// Open (or reopen) the channel at the given baud rate
    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error>;

    /// Close the channel
    ///
    /// Closing an already closed channel must be harmless.
    fn close(&mut self);

    /// Write a single byte
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Write all bytes in order
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Check whether at least one received byte is waiting
    ///
    /// Must not block.
    fn bytes_available(&mut self) -> bool;

    /// Read one received byte
    ///
    /// Only meaningful after [`bytes_available`](Self::bytes_available)
    /// returned `true`; returns `None` if nothing was waiting.
    fn read_byte(&mut self) -> Option<u8>;
}

impl<T: ByteChannel + ?Sized> ByteChannel for &mut T {
    type Error = T::Error;

    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        (**self).open(baud_rate)
    }

    fn close(&mut self) {
        (**self).close();
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        (**self).write_byte(byte)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(data)
    }

    fn bytes_available(&mut self) -> bool {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}
