//! Link error type

use core::fmt;

use roomba_protocol::{DecodeError, EncodeError};

/// Errors returned by Open Interface operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OiError {
    /// Operation needs an open link
    NotConnected,
    /// Reply did not arrive before its deadline
    ReadTimeout,
    /// Stream size byte was zero or larger than the frame buffer
    MalformedFrame,
    /// Byte channel refused to open
    ChannelOpenFailure,
    /// Byte channel rejected a write
    ChannelWrite,
    /// Baud rate has no Open Interface code
    UnsupportedBaud,
    /// Stream requested with no sensors
    EmptyStream,
    /// Command could not be encoded
    Encode(EncodeError),
    /// Sensor reply could not be decoded
    Decode(DecodeError),
}

impl From<EncodeError> for OiError {
    fn from(e: EncodeError) -> Self {
        OiError::Encode(e)
    }
}

impl From<DecodeError> for OiError {
    fn from(e: DecodeError) -> Self {
        OiError::Decode(e)
    }
}

impl fmt::Display for OiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OiError::NotConnected => f.write_str("not connected"),
            OiError::ReadTimeout => f.write_str("read timed out"),
            OiError::MalformedFrame => f.write_str("malformed stream frame"),
            OiError::ChannelOpenFailure => f.write_str("serial channel failed to open"),
            OiError::ChannelWrite => f.write_str("serial write failed"),
            OiError::UnsupportedBaud => f.write_str("unsupported baud rate"),
            OiError::EmptyStream => f.write_str("stream needs at least one sensor"),
            OiError::Encode(e) => write!(f, "encode error: {:?}", e),
            OiError::Decode(e) => write!(f, "decode error: {:?}", e),
        }
    }
}
