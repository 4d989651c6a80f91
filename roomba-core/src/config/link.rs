//! Serial link configuration
//!
//! All wake-sequence delays and read timeouts are in milliseconds. The
//! defaults are the values the robot is known to tolerate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use roomba_hal::uart::DEFAULT_BAUD_RATE;

/// Settle time after raising the wake line (ms)
pub const DEFAULT_POWER_SETTLE_MS: u32 = 2000;

/// Low/high wake pulses after power settle
pub const DEFAULT_WAKE_PULSES: u8 = 3;

/// Hold time for each wake pulse level (ms)
pub const DEFAULT_WAKE_PULSE_MS: u32 = 100;

/// Default wait between mode and setup commands (ms)
pub const DEFAULT_SETTLE_MS: u32 = 100;

/// Wait between a sensor query and reading its reply (ms)
pub const DEFAULT_QUERY_SETTLE_MS: u32 = 15;

/// Default read timeout for query replies and stream payloads (ms)
pub const DEFAULT_READ_TIMEOUT_MS: u32 = 100;

/// Timeout for the stream size byte (ms)
pub const DEFAULT_STREAM_SIZE_TIMEOUT_MS: u32 = 50;

/// Wait between defining a song and playing it (ms)
pub const DEFAULT_SONG_DEFINE_MS: u32 = 20;

/// Open Interface link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OiConfig {
    /// Baud rate used by `open_default`
    pub baud_rate: u32,
    /// Delay after raising the wake line
    pub power_settle_ms: u32,
    /// Number of low/high wake pulses
    pub wake_pulses: u8,
    /// Hold time per pulse level
    pub wake_pulse_ms: u32,
    /// Delay after the last pulse, before opening the channel
    pub post_wake_ms: u32,
    /// Delay after opening the channel, before Start
    pub post_open_ms: u32,
    /// Delay after Start and after each mode command
    pub mode_settle_ms: u32,
    /// Delay between a sensor query and its read
    pub query_settle_ms: u32,
    /// Deadline for a complete query reply
    pub query_timeout_ms: u32,
    /// Window to find a stream header
    pub stream_header_window_ms: u32,
    /// Deadline for the stream size byte
    pub stream_size_timeout_ms: u32,
    /// Deadline for a complete stream payload
    pub stream_payload_timeout_ms: u32,
    /// Delay between song definition and play
    pub song_define_ms: u32,
    /// Delay after a baud change command before reopening
    pub baud_switch_ms: u32,
    /// Log every command written
    pub verbose: bool,
}

impl Default for OiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl OiConfig {
    /// Default configuration
    pub const fn new() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            power_settle_ms: DEFAULT_POWER_SETTLE_MS,
            wake_pulses: DEFAULT_WAKE_PULSES,
            wake_pulse_ms: DEFAULT_WAKE_PULSE_MS,
            post_wake_ms: DEFAULT_SETTLE_MS,
            post_open_ms: DEFAULT_SETTLE_MS,
            mode_settle_ms: DEFAULT_SETTLE_MS,
            query_settle_ms: DEFAULT_QUERY_SETTLE_MS,
            query_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            stream_header_window_ms: DEFAULT_READ_TIMEOUT_MS,
            stream_size_timeout_ms: DEFAULT_STREAM_SIZE_TIMEOUT_MS,
            stream_payload_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            song_define_ms: DEFAULT_SONG_DEFINE_MS,
            baud_switch_ms: DEFAULT_SETTLE_MS,
            verbose: false,
        }
    }

    /// Set the default baud rate
    pub const fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Enable or disable per-command logging
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the query reply deadline
    pub const fn with_query_timeout(mut self, timeout_ms: u32) -> Self {
        self.query_timeout_ms = timeout_ms;
        self
    }

    /// Total time the wake sequence blocks before the channel opens (ms)
    pub const fn wake_duration_ms(&self) -> u32 {
        self.power_settle_ms
            + self.wake_pulses as u32 * 2 * self.wake_pulse_ms
            + self.post_wake_ms
    }

    /// Total time `open` blocks, including mode negotiation (ms)
    pub const fn open_duration_ms(&self) -> u32 {
        self.wake_duration_ms() + self.post_open_ms + 2 * self.mode_settle_ms
    }
}
