//! Bridges from the embedded-hal / embedded-io ecosystem traits
//!
//! Most chip HALs already implement `embedded_hal::digital::OutputPin`,
//! `embedded_hal::delay::DelayNs` and the blocking `embedded_io` serial
//! traits. These wrappers let such peripherals drive the robot directly.

#[cfg(feature = "embedded-hal")]
pub use self::hal::{DelayClock, HalPin};
#[cfg(feature = "embedded-io")]
pub use self::io::{IoChannel, IoChannelError};

#[cfg(feature = "embedded-hal")]
mod hal {
    use crate::gpio::OutputPin;
    use crate::time::Clock;

    /// Wake line backed by an embedded-hal output pin
    ///
    /// Pin errors are discarded; GPIO writes on supported chips cannot fail.
    pub struct HalPin<P> {
        pin: P,
    }

    impl<P> HalPin<P> {
        /// Wrap an embedded-hal output pin
        pub fn new(pin: P) -> Self {
            Self { pin }
        }

        /// Release the wrapped pin
        pub fn into_inner(self) -> P {
            self.pin
        }
    }

    impl<P: embedded_hal::digital::OutputPin> OutputPin for HalPin<P> {
        fn set_high(&mut self) {
            let _ = self.pin.set_high();
        }

        fn set_low(&mut self) {
            let _ = self.pin.set_low();
        }
    }

    /// Clock built from an embedded-hal delay and a monotonic millisecond counter
    ///
    /// ```ignore
    /// let clock = DelayClock::new(delay, || Instant::now().as_millis());
    /// ```
    pub struct DelayClock<D, F> {
        delay: D,
        now: F,
    }

    impl<D, F> DelayClock<D, F>
    where
        D: embedded_hal::delay::DelayNs,
        F: Fn() -> u64,
    {
        /// Combine a delay provider with a millisecond counter
        pub fn new(delay: D, now: F) -> Self {
            Self { delay, now }
        }
    }

    impl<D, F> Clock for DelayClock<D, F>
    where
        D: embedded_hal::delay::DelayNs,
        F: Fn() -> u64,
    {
        fn now_ms(&self) -> u64 {
            (self.now)()
        }

        fn delay_ms(&mut self, ms: u32) {
            self.delay.delay_ms(ms);
        }
    }
}

#[cfg(feature = "embedded-io")]
mod io {
    use crate::uart::ByteChannel;

    /// Byte channel backed by a blocking embedded-io serial port
    ///
    /// The port is assumed to be configured for the requested baud rate by
    /// the board code; `open` records the rate and gates writes.
    pub struct IoChannel<T> {
        port: T,
        baud_rate: Option<u32>,
    }

    impl<T> IoChannel<T> {
        /// Wrap a serial port
        pub fn new(port: T) -> Self {
            Self {
                port,
                baud_rate: None,
            }
        }

        /// Baud rate of the last successful `open`, if still open
        pub fn baud_rate(&self) -> Option<u32> {
            self.baud_rate
        }

        /// Release the wrapped port
        pub fn into_inner(self) -> T {
            self.port
        }
    }

    /// Errors surfaced by [`IoChannel`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum IoChannelError {
        /// Write attempted while the channel is closed
        Closed,
        /// Underlying port reported an error
        Port(embedded_io::ErrorKind),
    }

    impl<T> ByteChannel for IoChannel<T>
    where
        T: embedded_io::Read + embedded_io::Write + embedded_io::ReadReady,
    {
        type Error = IoChannelError;

        fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
            self.baud_rate = Some(baud_rate);
            Ok(())
        }

        fn close(&mut self) {
            let _ = self.port.flush();
            self.baud_rate = None;
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
            self.write_all(&[byte])
        }

        fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            if self.baud_rate.is_none() {
                return Err(IoChannelError::Closed);
            }
            self.port
                .write_all(data)
                .map_err(|e| IoChannelError::Port(embedded_io::Error::kind(&e)))
        }

        fn bytes_available(&mut self) -> bool {
            self.port.read_ready().unwrap_or(false)
        }

        /// Never blocks: returns `None` unless the port reports data ready
        fn read_byte(&mut self) -> Option<u8> {
            if !self.bytes_available() {
                return None;
            }
            let mut buf = [0u8; 1];
            match self.port.read(&mut buf) {
                Ok(1) => Some(buf[0]),
                _ => None,
            }
        }
    }
}

#[cfg(all(test, feature = "embedded-io"))]
mod tests {
    use core::convert::Infallible;

    use super::*;
    use crate::uart::ByteChannel;

    /// Loopback port: reads return a fixed script, writes are recorded
    struct ScriptPort {
        rx: &'static [u8],
        tx: [u8; 8],
        tx_len: usize,
    }

    impl embedded_io::ErrorType for ScriptPort {
        type Error = Infallible;
    }

    impl embedded_io::Read for ScriptPort {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if self.rx.is_empty() || buf.is_empty() {
                return Ok(0);
            }
            buf[0] = self.rx[0];
            self.rx = &self.rx[1..];
            Ok(1)
        }
    }

    impl embedded_io::ReadReady for ScriptPort {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.rx.is_empty())
        }
    }

    impl embedded_io::Write for ScriptPort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.tx.len() - self.tx_len);
            self.tx[self.tx_len..self.tx_len + n].copy_from_slice(&buf[..n]);
            self.tx_len += n;
            Ok(n)
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    fn channel(rx: &'static [u8]) -> IoChannel<ScriptPort> {
        IoChannel::new(ScriptPort {
            rx,
            tx: [0; 8],
            tx_len: 0,
        })
    }

    #[test]
    fn test_write_requires_open() {
        let mut ch = channel(&[]);
        assert_eq!(ch.write_byte(128), Err(IoChannelError::Closed));

        ch.open(19200).unwrap();
        assert_eq!(ch.baud_rate(), Some(19200));
        ch.write_all(&[128, 131]).unwrap();

        let port = ch.into_inner();
        assert_eq!(&port.tx[..port.tx_len], &[128, 131]);
    }

    #[test]
    fn test_close_gates_writes() {
        let mut ch = channel(&[]);
        ch.open(19200).unwrap();
        ch.close();
        assert_eq!(ch.baud_rate(), None);
        assert_eq!(ch.write_byte(133), Err(IoChannelError::Closed));
    }

    #[test]
    fn test_read_bytes() {
        let mut ch = channel(&[19, 3]);
        assert!(ch.bytes_available());
        assert_eq!(ch.read_byte(), Some(19));
        assert_eq!(ch.read_byte(), Some(3));
        assert!(!ch.bytes_available());
        assert_eq!(ch.read_byte(), None);
    }

    #[test]
    fn test_read_byte_skips_port_when_idle() {
        let mut ch = IoChannel::new(IdlePort);
        assert_eq!(ch.read_byte(), None);
    }

    /// Port that never has data; a read would block forever
    struct IdlePort;

    impl embedded_io::ErrorType for IdlePort {
        type Error = Infallible;
    }

    impl embedded_io::Read for IdlePort {
        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
            panic!("read called with nothing ready");
        }
    }

    impl embedded_io::ReadReady for IdlePort {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(false)
        }
    }

    impl embedded_io::Write for IdlePort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }
}
