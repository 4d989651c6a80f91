//! Sensor stream framing
//!
//! Frame format:
//! - HEADER (1 byte): 19
//! - SIZE (1 byte): payload length (1-255)
//! - PAYLOAD (SIZE bytes): packet id followed by that packet's data, repeated
//!
//! The robot appends a checksum byte after the payload. It is not part of
//! SIZE and is not validated here; the next scan discards it while looking
//! for a header.

use crate::sensor::{DecodeError, SensorId, SensorValue};

/// Stream frame header byte
pub const STREAM_HEADER: u8 = 19;

/// Errors that can occur while framing streamed data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError {
    /// Size byte was zero
    ZeroSize,
    /// Size byte exceeds the caller's buffer
    Oversize { size: u8, capacity: usize },
}

/// Which part of a frame the parser expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamPhase {
    /// Scanning for the header byte
    Header,
    /// Got header, waiting for size
    Size,
    /// Reading payload bytes
    Payload,
}

/// State machine for framing streamed sensor data
///
/// Payload bytes are written straight into the buffer passed to
/// [`feed`](Self::feed), so the parser itself holds no data beyond a
/// couple of counters. The buffer length is the frame capacity.
#[derive(Debug, Clone)]
pub struct StreamParser {
    phase: StreamPhase,
    expected: u8,
    received: u8,
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamParser {
    /// Create a new stream parser
    pub fn new() -> Self {
        Self {
            phase: StreamPhase::Header,
            expected: 0,
            received: 0,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.phase = StreamPhase::Header;
        self.expected = 0;
        self.received = 0;
    }

    /// Current parse phase
    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(len))` when a complete frame of `len` bytes sits at
    /// the start of `buf`, `Ok(None)` when more bytes are needed, or `Err`
    /// when the size byte is invalid or `buf` is too short for the frame in
    /// progress. `buf` should be the same buffer for every byte of one frame.
    pub fn feed(&mut self, byte: u8, buf: &mut [u8]) -> Result<Option<usize>, StreamError> {
        match self.phase {
            StreamPhase::Header => {
                if byte == STREAM_HEADER {
                    self.phase = StreamPhase::Size;
                }
                Ok(None)
            }
            StreamPhase::Size => {
                if byte == 0 {
                    self.reset();
                    return Err(StreamError::ZeroSize);
                }
                if byte as usize > buf.len() {
                    self.reset();
                    return Err(StreamError::Oversize {
                        size: byte,
                        capacity: buf.len(),
                    });
                }
                self.expected = byte;
                self.received = 0;
                self.phase = StreamPhase::Payload;
                Ok(None)
            }
            StreamPhase::Payload => {
                let Some(slot) = buf.get_mut(self.received as usize) else {
                    let size = self.expected;
                    self.reset();
                    return Err(StreamError::Oversize {
                        size,
                        capacity: buf.len(),
                    });
                };
                *slot = byte;
                self.received += 1;
                if self.received == self.expected {
                    let len = self.expected as usize;
                    self.reset();
                    return Ok(Some(len));
                }
                Ok(None)
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame or an error are not consumed.
    pub fn feed_bytes(
        &mut self,
        bytes: &[u8],
        buf: &mut [u8],
    ) -> Result<Option<usize>, StreamError> {
        for &byte in bytes {
            if let Some(len) = self.feed(byte, buf)? {
                return Ok(Some(len));
            }
        }
        Ok(None)
    }
}

/// A received stream frame payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StreamFrame<'a> {
    payload: &'a [u8],
}

impl<'a> StreamFrame<'a> {
    /// Wrap a payload returned by the parser
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// Raw payload bytes
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    /// Iterate the sensor packets in this frame
    pub fn packets(&self) -> StreamPackets<'a> {
        StreamPackets {
            remaining: self.payload,
        }
    }
}

/// Iterator over `(id, value)` packets of a stream frame
///
/// Stops after the first decode error.
#[derive(Debug, Clone)]
pub struct StreamPackets<'a> {
    remaining: &'a [u8],
}

impl Iterator for StreamPackets<'_> {
    type Item = Result<(SensorId, SensorValue), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (&raw_id, rest) = self.remaining.split_first()?;

        let Some(id) = SensorId::from_byte(raw_id) else {
            self.remaining = &[];
            return Some(Err(DecodeError::UnknownSensor(raw_id)));
        };

        if rest.len() < id.len() {
            self.remaining = &[];
            return Some(Err(DecodeError::LengthMismatch));
        }

        let (data, rest) = rest.split_at(id.len());
        self.remaining = rest;
        Some(id.decode(data).map(|value| (id, value)))
    }
}
