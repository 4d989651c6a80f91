//! Simulated channel, pin and clock for unit tests

use core::cell::Cell;

use heapless::{Deque, Vec};
use roomba_hal::{ByteChannel, Clock, OutputPin};

use crate::link::OpenInterface;

const RX_CAPACITY: usize = 512;
const TX_CAPACITY: usize = 512;

/// Link over fresh doubles with default configuration
pub fn link() -> OpenInterface<MockChannel, MockPin, SimClock> {
    OpenInterface::new(MockChannel::new(), MockPin::new(), SimClock::new())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    Closed,
    Refused,
}

/// In-memory serial port
#[derive(Default)]
pub struct MockChannel {
    rx: Deque<u8, RX_CAPACITY>,
    tx: Vec<u8, TX_CAPACITY>,
    baud: Option<u32>,
    opens: u8,
    closes: u8,
    fail_open: bool,
    fail_write: bool,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_open(&mut self, fail: bool) {
        self.fail_open = fail;
    }

    pub fn fail_write(&mut self, fail: bool) {
        self.fail_write = fail;
    }

    /// Queue bytes as if the robot had sent them
    pub fn push_rx(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.rx.push_back(byte).unwrap();
        }
    }

    pub fn rx_len(&self) -> usize {
        self.rx.len()
    }

    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    pub fn clear_written(&mut self) {
        self.tx.clear();
    }

    pub fn baud(&self) -> Option<u32> {
        self.baud
    }

    pub fn opens(&self) -> u8 {
        self.opens
    }

    pub fn closes(&self) -> u8 {
        self.closes
    }
}

impl ByteChannel for MockChannel {
    type Error = MockError;

    fn open(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        if self.fail_open {
            return Err(MockError::Refused);
        }
        self.baud = Some(baud_rate);
        self.opens += 1;
        Ok(())
    }

    fn close(&mut self) {
        self.baud = None;
        self.closes += 1;
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        if self.baud.is_none() {
            return Err(MockError::Closed);
        }
        if self.fail_write {
            return Err(MockError::Refused);
        }
        self.tx.push(byte).unwrap();
        Ok(())
    }

    fn bytes_available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

/// Wake pin that records every level it is driven to
#[derive(Default)]
pub struct MockPin {
    trace: Vec<bool, 32>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trace(&self) -> &[bool] {
        &self.trace
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.trace.push(true).unwrap();
    }

    fn set_low(&mut self) {
        self.trace.push(false).unwrap();
    }
}

/// Clock that advances 1 ms per reading and jumps on delay
///
/// Busy-wait loops therefore always reach their deadline.
#[derive(Default)]
pub struct SimClock {
    now: Cell<u64>,
    delayed: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total time spent in `delay_ms`
    pub fn delayed_ms(&self) -> u64 {
        self.delayed
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + 1);
        now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delayed += ms as u64;
        self.now.set(self.now.get() + ms as u64);
    }
}
