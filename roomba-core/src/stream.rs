//! Sensor streaming
//!
//! Once a stream is configured the robot pushes framed sensor packets on its
//! own schedule. [`OpenInterface::poll_frame`] pulls at most one frame per
//! call: it scans for the header inside a short window, then reads the size
//! byte and payload under their own deadlines.

use roomba_hal::{ByteChannel, Clock, OutputPin};
use roomba_protocol::stream::StreamPhase;
use roomba_protocol::{Command, StreamFrame, StreamParser};

use crate::error::OiError;
use crate::link::OpenInterface;
use crate::state::StreamState;

/// Outcome of one stream poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FramePoll<'a> {
    /// Complete frame payload
    Frame(&'a [u8]),
    /// No header arrived within the scan window
    NoFrameYet,
}

impl<'a> FramePoll<'a> {
    /// Frame payload, if one was read
    pub fn frame(self) -> Option<StreamFrame<'a>> {
        match self {
            FramePoll::Frame(payload) => Some(StreamFrame::new(payload)),
            FramePoll::NoFrameYet => None,
        }
    }
}

impl<C, P, K> OpenInterface<C, P, K>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
{
    /// Ask the robot to stream the given sensor packets
    pub fn start_stream(&mut self, ids: &[u8]) -> Result<(), OiError> {
        if !self.is_open() {
            return Err(OiError::NotConnected);
        }
        if ids.is_empty() {
            return Err(OiError::EmptyStream);
        }

        self.send(&Command::ConfigureStream(ids))?;
        self.stream = StreamState::Active;
        debug!("Streaming {} sensors", ids.len());
        Ok(())
    }

    /// Stop the sensor stream
    pub fn stop_stream(&mut self) -> Result<(), OiError> {
        self.send(&Command::ConfigureStream(&[]))?;
        self.stream = StreamState::Stopped;
        Ok(())
    }

    /// Read one stream frame into `buf`
    ///
    /// Non-header bytes are discarded while scanning. A size byte of zero or
    /// larger than `buf` is rejected before any payload is read.
    pub fn poll_frame<'b>(&mut self, buf: &'b mut [u8]) -> Result<FramePoll<'b>, OiError> {
        if !self.is_open() {
            return Err(OiError::NotConnected);
        }

        let mut parser = StreamParser::new();

        let window = self.clock.deadline(self.config.stream_header_window_ms);
        while parser.phase() == StreamPhase::Header {
            if self.clock.expired(window) {
                return Ok(FramePoll::NoFrameYet);
            }
            if let Some(byte) = self.poll_byte() {
                // Header bytes never complete or fail a frame
                let _ = parser.feed(byte, buf);
            }
        }

        let size = self
            .read_byte_within(self.config.stream_size_timeout_ms)
            .ok_or(OiError::ReadTimeout)?;
        if parser.feed(size, buf).is_err() {
            warn!("Stream frame size {} rejected", size);
            return Err(OiError::MalformedFrame);
        }

        let deadline = self.clock.deadline(self.config.stream_payload_timeout_ms);
        let len = loop {
            if self.clock.expired(deadline) {
                return Err(OiError::ReadTimeout);
            }
            if let Some(byte) = self.poll_byte() {
                match parser.feed(byte, buf) {
                    Ok(Some(len)) => break len,
                    Ok(None) => {}
                    Err(_) => return Err(OiError::MalformedFrame),
                }
            }
        };

        Ok(FramePoll::Frame(&buf[..len]))
    }
}
