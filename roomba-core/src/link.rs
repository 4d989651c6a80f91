//! Connection lifecycle
//!
//! [`OpenInterface`] owns the byte channel, the wake line and the clock. It
//! runs the wake sequence, tracks the connection state and gates every write
//! on it. Sensor reads are implemented in [`crate::query`] and
//! [`crate::stream`] on the same type.

use roomba_hal::{ByteChannel, Clock, OutputPin};
use roomba_protocol::{BaudCode, Command};

use crate::config::OiConfig;
use crate::error::OiError;
use crate::state::{ConnectionState, LinkEvent, StreamState};

/// Open Interface link to one robot
pub struct OpenInterface<C, P, K> {
    pub(crate) channel: C,
    wake: P,
    pub(crate) clock: K,
    pub(crate) config: OiConfig,
    state: ConnectionState,
    pub(crate) stream: StreamState,
}

impl<C, P, K> OpenInterface<C, P, K>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
{
    /// Create a disconnected link with default configuration
    pub fn new(channel: C, wake: P, clock: K) -> Self {
        Self::with_config(channel, wake, clock, OiConfig::default())
    }

    /// Create a disconnected link
    pub fn with_config(channel: C, wake: P, clock: K, config: OiConfig) -> Self {
        Self {
            channel,
            wake,
            clock,
            config,
            state: ConnectionState::Disconnected,
            stream: StreamState::Stopped,
        }
    }

    pub fn config(&self) -> &OiConfig {
        &self.config
    }

    /// Enable or disable per-command logging
    pub fn set_verbose(&mut self, verbose: bool) {
        self.config.verbose = verbose;
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Current stream state
    pub fn stream_state(&self) -> StreamState {
        self.stream
    }

    /// Check if commands may be sent
    pub fn is_open(&self) -> bool {
        self.state.is_connected()
    }

    /// Wake the robot and enter Safe mode
    ///
    /// Blocks for the whole wake sequence (about three seconds with the
    /// default timing). Returns `Ok` immediately when already open. The robot
    /// does not acknowledge any step, so an unpowered robot still ends up
    /// reported as connected.
    pub fn open(&mut self, baud_rate: u32) -> Result<(), OiError> {
        if self.state.is_connected() {
            return Ok(());
        }

        self.apply(LinkEvent::OpenRequested);
        info!("Waking robot at {} baud", baud_rate);

        self.wake();

        if self.channel.open(baud_rate).is_err() {
            warn!("Serial channel failed to open");
            self.apply(LinkEvent::OpenFailed);
            return Err(OiError::ChannelOpenFailure);
        }
        self.clock.delay_ms(self.config.post_open_ms);

        if let Err(e) = self.negotiate() {
            warn!("Mode negotiation failed: {}", e);
            self.channel.close();
            self.apply(LinkEvent::OpenFailed);
            return Err(e);
        }

        info!("Open Interface ready (safe mode)");
        Ok(())
    }

    /// Open at the configured baud rate
    pub fn open_default(&mut self) -> Result<(), OiError> {
        self.open(self.config.baud_rate)
    }

    /// Power the robot down and close the channel
    ///
    /// No-op when already disconnected.
    pub fn close(&mut self) {
        if !self.state.is_connected() {
            return;
        }

        if let Err(e) = self.send(&Command::PowerOff) {
            warn!("Power off not sent: {}", e);
        }
        self.channel.close();
        self.stream = StreamState::Stopped;
        self.apply(LinkEvent::Closed);
        info!("Open Interface closed");
    }

    /// Enter Safe mode
    pub fn safe_mode(&mut self) -> Result<(), OiError> {
        self.send(&Command::SetSafeMode)?;
        self.apply(LinkEvent::SafeModeEntered);
        Ok(())
    }

    /// Enter Full mode
    pub fn full_mode(&mut self) -> Result<(), OiError> {
        self.send(&Command::SetFullMode)?;
        self.apply(LinkEvent::FullModeEntered);
        Ok(())
    }

    /// Switch the robot and the channel to another baud rate
    pub fn change_baud(&mut self, baud_rate: u32) -> Result<(), OiError> {
        let code = BaudCode::from_baud(baud_rate).ok_or(OiError::UnsupportedBaud)?;
        self.send(&Command::SetBaud(code))?;
        self.clock.delay_ms(self.config.baud_switch_ms);

        self.channel.close();
        if self.channel.open(baud_rate).is_err() {
            warn!("Serial channel failed to reopen at {} baud", baud_rate);
            self.stream = StreamState::Stopped;
            self.apply(LinkEvent::Closed);
            return Err(OiError::ChannelOpenFailure);
        }

        info!("Baud rate changed to {}", baud_rate);
        Ok(())
    }

    /// Encode and write a command
    pub fn send(&mut self, command: &Command<'_>) -> Result<(), OiError> {
        if !self.state.is_connected() {
            return Err(OiError::NotConnected);
        }

        let bytes = command.encode()?;
        self.channel
            .write_all(&bytes)
            .map_err(|_| OiError::ChannelWrite)?;

        if self.config.verbose {
            debug!("OI command {} ({} bytes)", command.opcode(), bytes.len());
        }
        Ok(())
    }

    /// Block for `ms` milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }

    /// Borrow the byte channel
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Mutably borrow the byte channel
    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Borrow the wake pin
    pub fn wake_pin(&self) -> &P {
        &self.wake
    }

    /// Borrow the clock
    pub fn clock(&self) -> &K {
        &self.clock
    }

    /// Give back the channel, pin and clock
    pub fn release(self) -> (C, P, K) {
        (self.channel, self.wake, self.clock)
    }

    fn apply(&mut self, event: LinkEvent) {
        self.state = self.state.transition(event);
    }

    /// Raise the wake line and pulse it
    fn wake(&mut self) {
        self.wake.set_high();
        self.clock.delay_ms(self.config.power_settle_ms);

        for _ in 0..self.config.wake_pulses {
            self.wake.set_low();
            self.clock.delay_ms(self.config.wake_pulse_ms);
            self.wake.set_high();
            self.clock.delay_ms(self.config.wake_pulse_ms);
        }

        self.clock.delay_ms(self.config.post_wake_ms);
    }

    /// Start the interface and enter Safe mode
    fn negotiate(&mut self) -> Result<(), OiError> {
        self.send(&Command::Start)?;
        self.clock.delay_ms(self.config.mode_settle_ms);
        self.send(&Command::SetSafeMode)?;
        self.clock.delay_ms(self.config.mode_settle_ms);
        self.apply(LinkEvent::SafeModeEntered);
        Ok(())
    }

    /// Read one byte if any is waiting
    pub(crate) fn poll_byte(&mut self) -> Option<u8> {
        if self.channel.bytes_available() {
            self.channel.read_byte()
        } else {
            None
        }
    }

    /// Wait for one byte until `timeout_ms` elapses
    pub(crate) fn read_byte_within(&mut self, timeout_ms: u32) -> Option<u8> {
        let deadline = self.clock.deadline(timeout_ms);
        loop {
            if let Some(byte) = self.poll_byte() {
                return Some(byte);
            }
            if self.clock.expired(deadline) {
                return None;
            }
        }
    }

    /// Fill `buf` completely before `timeout_ms` elapses
    ///
    /// Bytes read before a timeout are discarded.
    pub(crate) fn read_exact(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<(), OiError> {
        let deadline = self.clock.deadline(timeout_ms);
        let mut filled = 0;
        while filled < buf.len() {
            if let Some(byte) = self.poll_byte() {
                buf[filled] = byte;
                filled += 1;
            } else if self.clock.expired(deadline) {
                return Err(OiError::ReadTimeout);
            }
        }
        Ok(())
    }
}
