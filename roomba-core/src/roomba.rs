//! Verb-level robot API
//!
//! [`Roomba`] maps everyday verbs onto link commands. It keeps the forgiving
//! contract of hobby robot libraries: actuator verbs do nothing while the
//! link is down and sensor verbs read as zero or `false` on any failure.
//! Use [`Roomba::oi_mut`] when the difference matters.

use roomba_hal::{ByteChannel, Clock, OutputPin};
use roomba_protocol::command::{RADIUS_STRAIGHT, RADIUS_TURN_CCW, RADIUS_TURN_CW};
use roomba_protocol::{Command, LedBits, Note};

use crate::config::OiConfig;
use crate::error::OiError;
use crate::link::OpenInterface;

pub use roomba_protocol::DEFAULT_SPEED;

/// Note played by [`Roomba::beep`]
pub const BEEP_NOTE: u8 = 72;

/// Duration of [`Roomba::beep`] in 1/64 s
pub const BEEP_DURATION: u8 = 32;

/// Song slot used for single tones
const TONE_SLOT: u8 = 0;

/// Power LED color used by [`Roomba::set_led`] (green)
const POWER_LED_GREEN: u8 = 0;

/// Power LED intensity used by [`Roomba::set_led`]
const POWER_LED_FULL: u8 = 255;

/// High-level robot handle
pub struct Roomba<C, P, K> {
    oi: OpenInterface<C, P, K>,
}

impl<C, P, K> Roomba<C, P, K>
where
    C: ByteChannel,
    P: OutputPin,
    K: Clock,
{
    pub fn new(channel: C, wake: P, clock: K) -> Self {
        Self {
            oi: OpenInterface::new(channel, wake, clock),
        }
    }

    pub fn with_config(channel: C, wake: P, clock: K, config: OiConfig) -> Self {
        Self {
            oi: OpenInterface::with_config(channel, wake, clock, config),
        }
    }

    /// Typed link layer
    pub fn oi(&self) -> &OpenInterface<C, P, K> {
        &self.oi
    }

    /// Mutable typed link layer
    pub fn oi_mut(&mut self) -> &mut OpenInterface<C, P, K> {
        &mut self.oi
    }

    pub fn into_inner(self) -> OpenInterface<C, P, K> {
        self.oi
    }

    /// Wake the robot; returns whether it is connected afterwards
    pub fn begin(&mut self, baud_rate: u32) -> bool {
        match self.oi.open(baud_rate) {
            Ok(()) => true,
            Err(e) => {
                warn!("Connection failed: {}", e);
                false
            }
        }
    }

    pub fn end(&mut self) {
        self.oi.close();
    }

    pub fn is_connected(&self) -> bool {
        self.oi.is_open()
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.oi.set_verbose(verbose);
    }

    // Movement

    pub fn move_forward(&mut self, speed: i16) {
        self.drive(speed, RADIUS_STRAIGHT);
    }

    pub fn move_backward(&mut self, speed: i16) {
        self.drive(speed.saturating_neg(), RADIUS_STRAIGHT);
    }

    /// Spin counter-clockwise in place
    pub fn turn_left(&mut self, speed: i16) {
        self.drive(speed, RADIUS_TURN_CCW);
    }

    /// Spin clockwise in place
    pub fn turn_right(&mut self, speed: i16) {
        self.drive(speed, RADIUS_TURN_CW);
    }

    pub fn stop(&mut self) {
        self.drive(0, 0);
    }

    pub fn drive(&mut self, velocity: i16, radius: i16) {
        self.command(&Command::Drive { velocity, radius });
    }

    pub fn drive_direct(&mut self, right_velocity: i16, left_velocity: i16) {
        self.command(&Command::DriveDirect {
            right_velocity,
            left_velocity,
        });
    }

    // Cleaning

    pub fn start_cleaning(&mut self) {
        self.command(&Command::Clean);
    }

    pub fn max_clean(&mut self) {
        self.command(&Command::MaxClean);
    }

    pub fn spot_clean(&mut self) {
        self.command(&Command::Spot);
    }

    pub fn dock(&mut self) {
        self.command(&Command::SeekDock);
    }

    pub fn set_brushes(&mut self, main_brush: bool, side_brush: bool, vacuum: bool) {
        self.command(&Command::SetMotors {
            main_brush,
            side_brush,
            vacuum,
        });
    }

    // Sensors

    /// Battery voltage in mV, 0 on failure
    pub fn battery_voltage(&mut self) -> u16 {
        self.oi.battery_voltage().unwrap_or(0)
    }

    /// Battery current in mA, 0 on failure
    pub fn battery_current(&mut self) -> i16 {
        self.oi.battery_current().unwrap_or(0)
    }

    pub fn is_wall_detected(&mut self) -> bool {
        self.oi.wall_detected().unwrap_or(false)
    }

    pub fn is_bumper_pressed(&mut self) -> bool {
        self.oi.bumper_pressed().unwrap_or(false)
    }

    // LEDs and sound

    /// Set indicator LEDs with the power LED full green
    pub fn set_led(&mut self, debris: bool, spot: bool, dock: bool, check_robot: bool) {
        self.command(&Command::SetLeds {
            bits: LedBits::from_flags(debris, spot, dock, check_robot),
            power_color: POWER_LED_GREEN,
            power_intensity: POWER_LED_FULL,
        });
    }

    /// Set the power LED, clearing the indicator LEDs
    pub fn set_power_led(&mut self, color: u8, intensity: u8) {
        self.command(&Command::SetLeds {
            bits: LedBits::empty(),
            power_color: color,
            power_intensity: intensity,
        });
    }

    pub fn beep(&mut self) {
        self.play_tone(BEEP_NOTE, BEEP_DURATION);
    }

    /// Play a single note (MIDI number, 1/64 s units)
    pub fn play_tone(&mut self, note: u8, duration: u8) {
        let notes = [Note::new(note, duration)];
        let defined = self.oi.send(&Command::Song {
            slot: TONE_SLOT,
            notes: &notes,
        });
        if let Err(e) = defined {
            debug!("Tone dropped: {}", e);
            return;
        }
        let settle = self.oi.config().song_define_ms;
        self.oi.delay_ms(settle);
        self.command(&Command::Play { slot: TONE_SLOT });
    }

    /// Send a command, logging and dropping any error
    fn command(&mut self, command: &Command<'_>) {
        if let Err(e) = self.oi.send(command) {
            log_dropped(command.opcode(), e);
        }
    }
}

fn log_dropped(opcode: u8, error: OiError) {
    debug!("Command {} dropped: {}", opcode, error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockChannel, MockPin, SimClock};

    type TestRoomba = Roomba<MockChannel, MockPin, SimClock>;

    fn roomba() -> TestRoomba {
        Roomba::new(MockChannel::new(), MockPin::new(), SimClock::new())
    }

    fn connected() -> TestRoomba {
        let mut roomba = roomba();
        assert!(roomba.begin(19200));
        roomba.oi_mut().channel_mut().clear_written();
        roomba
    }

    fn written(roomba: &TestRoomba) -> &[u8] {
        roomba.oi().channel().written()
    }

    #[test]
    fn test_disconnected_verbs_write_nothing() {
        let mut roomba = roomba();
        roomba.move_forward(200);
        roomba.dock();
        roomba.beep();
        roomba.set_led(true, true, true, true);
        assert!(written(&roomba).is_empty());
        assert!(!roomba.is_connected());
    }

    #[test]
    fn test_disconnected_sensors_read_zero() {
        let mut roomba = roomba();
        assert_eq!(roomba.battery_voltage(), 0);
        assert_eq!(roomba.battery_current(), 0);
        assert!(!roomba.is_wall_detected());
        assert!(!roomba.is_bumper_pressed());
    }

    #[test]
    fn test_move_forward() {
        let mut roomba = connected();
        roomba.move_forward(200);
        assert_eq!(written(&roomba), &[137, 0x00, 0xC8, 0x80, 0x00]);
    }

    #[test]
    fn test_move_backward() {
        let mut roomba = connected();
        roomba.move_backward(200);
        assert_eq!(written(&roomba), &[137, 0xFF, 0x38, 0x80, 0x00]);
    }

    #[test]
    fn test_turns() {
        let mut roomba = connected();
        roomba.turn_left(100);
        assert_eq!(written(&roomba), &[137, 0x00, 0x64, 0x00, 0x01]);

        roomba.oi_mut().channel_mut().clear_written();
        roomba.turn_right(100);
        assert_eq!(written(&roomba), &[137, 0x00, 0x64, 0xFF, 0xFF]);
    }

    #[test]
    fn test_stop() {
        let mut roomba = connected();
        roomba.stop();
        assert_eq!(written(&roomba), &[137, 0, 0, 0, 0]);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut roomba = connected();
        roomba.move_forward(1000);
        assert_eq!(written(&roomba), &[137, 0x01, 0xF4, 0x80, 0x00]);
    }

    #[test]
    fn test_cleaning_verbs() {
        let mut roomba = connected();
        roomba.start_cleaning();
        roomba.max_clean();
        roomba.spot_clean();
        roomba.dock();
        assert_eq!(written(&roomba), &[135, 136, 134, 143]);
    }

    #[test]
    fn test_brushes() {
        let mut roomba = connected();
        roomba.set_brushes(true, true, false);
        assert_eq!(written(&roomba), &[138, 0x05]);
    }

    #[test]
    fn test_leds() {
        let mut roomba = connected();
        roomba.set_led(true, false, true, false);
        assert_eq!(written(&roomba), &[139, 0x05, 0, 255]);

        roomba.oi_mut().channel_mut().clear_written();
        roomba.set_power_led(128, 64);
        assert_eq!(written(&roomba), &[139, 0x00, 128, 64]);
    }

    #[test]
    fn test_beep() {
        let mut roomba = connected();
        let before = roomba.oi().clock().delayed_ms();
        roomba.beep();
        assert_eq!(written(&roomba), &[140, 0, 1, 72, 32, 141, 0]);
        assert_eq!(roomba.oi().clock().delayed_ms() - before, 20);
    }

    #[test]
    fn test_sensor_verbs() {
        let mut roomba = connected();
        roomba.oi_mut().channel_mut().push_rx(&[0x0F, 0xA0]);
        assert_eq!(roomba.battery_voltage(), 4000);

        roomba.oi_mut().channel_mut().push_rx(&[0xFF, 0x38]);
        assert_eq!(roomba.battery_current(), -200);

        // Timeout reads as zero
        assert_eq!(roomba.battery_voltage(), 0);
    }

    #[test]
    fn test_end() {
        let mut roomba = connected();
        roomba.end();
        assert!(!roomba.is_connected());
        assert_eq!(written(&roomba), &[133]);
    }
}
