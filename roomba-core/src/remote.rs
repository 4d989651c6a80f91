//! Remote command routing
//!
//! Wireless front-ends hand text commands to a [`CommandRouter`], which
//! parses them, notifies a [`CommandListener`] and drives the [`Roomba`].
//! The router holds no transport of its own.

use roomba_hal::{ByteChannel, Clock, OutputPin};
use roomba_protocol::{RemoteAction, RemoteCommand, RemoteParseError, StatusReport};

use crate::roomba::Roomba;

/// Observer for accepted remote commands
pub trait CommandListener {
    /// Called before the command is dispatched
    fn on_command(&mut self, command: &RemoteCommand);
}

impl CommandListener for () {
    fn on_command(&mut self, _command: &RemoteCommand) {}
}

/// Outcome of handling a remote command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Command was run
    Executed,
    /// Remote control is disabled
    Ignored,
}

/// Routes remote commands onto a robot
pub struct CommandRouter<L = ()> {
    listener: L,
    remote_enabled: bool,
}

impl Default for CommandRouter<()> {
    fn default() -> Self {
        Self::new(())
    }
}

impl<L: CommandListener> CommandRouter<L> {
    /// Create an enabled router
    pub fn new(listener: L) -> Self {
        Self {
            listener,
            remote_enabled: true,
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote_enabled
    }

    pub fn set_remote_enabled(&mut self, enabled: bool) {
        self.remote_enabled = enabled;
        info!("Remote control {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Run a parsed command
    ///
    /// A nonzero duration on any action but stop blocks for that long and
    /// then stops the robot.
    pub fn dispatch<C, P, K>(
        &mut self,
        roomba: &mut Roomba<C, P, K>,
        command: &RemoteCommand,
    ) -> Dispatch
    where
        C: ByteChannel,
        P: OutputPin,
        K: Clock,
    {
        if !self.remote_enabled {
            debug!("Remote command ignored");
            return Dispatch::Ignored;
        }

        self.listener.on_command(command);

        match command.action {
            RemoteAction::Forward => roomba.move_forward(command.speed),
            RemoteAction::Backward => roomba.move_backward(command.speed),
            RemoteAction::Left => roomba.turn_left(command.speed),
            RemoteAction::Right => roomba.turn_right(command.speed),
            RemoteAction::Stop => roomba.stop(),
            RemoteAction::Clean => roomba.start_cleaning(),
            RemoteAction::Spot => roomba.spot_clean(),
            RemoteAction::Dock => roomba.dock(),
            RemoteAction::Beep => roomba.beep(),
        }

        if command.is_timed() {
            roomba.oi_mut().delay_ms(command.duration_ms);
            roomba.stop();
        }

        Dispatch::Executed
    }

    /// Parse and run a text command
    pub fn handle_text<C, P, K>(
        &mut self,
        roomba: &mut Roomba<C, P, K>,
        text: &str,
    ) -> Result<Dispatch, RemoteParseError>
    where
        C: ByteChannel,
        P: OutputPin,
        K: Clock,
    {
        if !self.remote_enabled {
            return Ok(Dispatch::Ignored);
        }

        let command = RemoteCommand::parse(text).inspect_err(|e| {
            warn!("Bad remote command: {}", e);
        })?;
        Ok(self.dispatch(roomba, &command))
    }

    /// Snapshot robot status
    ///
    /// Sensor reads happen only while connected.
    pub fn status<C, P, K>(&self, roomba: &mut Roomba<C, P, K>) -> StatusReport
    where
        C: ByteChannel,
        P: OutputPin,
        K: Clock,
    {
        let connected = roomba.is_connected();
        if !connected {
            return StatusReport {
                remote_enabled: self.remote_enabled,
                ..StatusReport::default()
            };
        }

        StatusReport {
            voltage_mv: roomba.battery_voltage(),
            connected,
            wall: roomba.is_wall_detected(),
            bumper: roomba.is_bumper_pressed(),
            remote_enabled: self.remote_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockChannel, MockPin, SimClock};
    use heapless::{String, Vec};

    type TestRoomba = Roomba<MockChannel, MockPin, SimClock>;

    fn connected() -> TestRoomba {
        let mut roomba = Roomba::new(MockChannel::new(), MockPin::new(), SimClock::new());
        assert!(roomba.begin(19200));
        roomba.oi_mut().channel_mut().clear_written();
        roomba
    }

    fn written(roomba: &TestRoomba) -> &[u8] {
        roomba.oi().channel().written()
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<RemoteCommand, 8>,
    }

    impl CommandListener for Recorder {
        fn on_command(&mut self, command: &RemoteCommand) {
            self.seen.push(*command).unwrap();
        }
    }

    #[test]
    fn test_forward() {
        let mut roomba = connected();
        let mut router: CommandRouter = CommandRouter::default();

        assert_eq!(
            router.handle_text(&mut roomba, "forward:200:0"),
            Ok(Dispatch::Executed)
        );
        assert_eq!(written(&roomba), &[137, 0x00, 0xC8, 0x80, 0x00]);
    }

    #[test]
    fn test_timed_command_stops() {
        let mut roomba = connected();
        let mut router: CommandRouter = CommandRouter::default();
        let before = roomba.oi().clock().delayed_ms();

        router.handle_text(&mut roomba, "left:150:1000").unwrap();
        assert_eq!(
            written(&roomba),
            &[137, 0x00, 0x96, 0x00, 0x01, 137, 0, 0, 0, 0]
        );
        assert_eq!(roomba.oi().clock().delayed_ms() - before, 1000);
    }

    #[test]
    fn test_stop_with_duration_does_not_wait() {
        let mut roomba = connected();
        let mut router: CommandRouter = CommandRouter::default();
        let before = roomba.oi().clock().delayed_ms();

        router.handle_text(&mut roomba, "stop:0:500").unwrap();
        assert_eq!(written(&roomba), &[137, 0, 0, 0, 0]);
        assert_eq!(roomba.oi().clock().delayed_ms(), before);
    }

    #[test]
    fn test_default_speed() {
        let mut roomba = connected();
        let mut router: CommandRouter = CommandRouter::default();
        router.handle_text(&mut roomba, "backward").unwrap();
        assert_eq!(written(&roomba), &[137, 0xFF, 0x38, 0x80, 0x00]);
    }

    #[test]
    fn test_cleaning_actions() {
        let mut roomba = connected();
        let mut router: CommandRouter = CommandRouter::default();
        router.handle_text(&mut roomba, "clean").unwrap();
        router.handle_text(&mut roomba, "spot").unwrap();
        router.handle_text(&mut roomba, "dock").unwrap();
        assert_eq!(written(&roomba), &[135, 134, 143]);
    }

    #[test]
    fn test_disabled_router_ignores() {
        let mut roomba = connected();
        let mut router = CommandRouter::new(Recorder::default());
        router.set_remote_enabled(false);

        assert_eq!(
            router.handle_text(&mut roomba, "forward"),
            Ok(Dispatch::Ignored)
        );
        assert!(written(&roomba).is_empty());
        assert!(router.listener().seen.is_empty());
    }

    #[test]
    fn test_listener_sees_commands() {
        let mut roomba = connected();
        let mut router = CommandRouter::new(Recorder::default());

        router.handle_text(&mut roomba, "beep").unwrap();
        router.handle_text(&mut roomba, "right:90").unwrap();

        let seen = &router.listener().seen;
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].action, RemoteAction::Beep);
        assert_eq!(seen[1], RemoteCommand::new(RemoteAction::Right).with_speed(90));
    }

    #[test]
    fn test_parse_error_writes_nothing() {
        let mut roomba = connected();
        let mut router = CommandRouter::new(Recorder::default());

        assert_eq!(
            router.handle_text(&mut roomba, "jump:100"),
            Err(RemoteParseError::UnknownAction)
        );
        assert!(written(&roomba).is_empty());
        assert!(router.listener().seen.is_empty());
    }

    #[test]
    fn test_status_connected() {
        let mut roomba = connected();
        let router: CommandRouter = CommandRouter::default();
        // Voltage, wall, bumps replies in query order
        roomba
            .oi_mut()
            .channel_mut()
            .push_rx(&[0x38, 0xB0, 0x00, 0x01]);

        let report = router.status(&mut roomba);
        assert_eq!(
            report,
            StatusReport {
                voltage_mv: 14512,
                connected: true,
                wall: false,
                bumper: true,
                remote_enabled: true,
            }
        );

        let mut text: String<32> = String::new();
        report.write_text(&mut text).unwrap();
        assert_eq!(text.as_str(), "14512:1:0:1:1");
    }

    #[test]
    fn test_status_disconnected() {
        let mut roomba = Roomba::new(MockChannel::new(), MockPin::new(), SimClock::new());
        let mut router: CommandRouter = CommandRouter::default();
        router.set_remote_enabled(false);

        let mut json: String<64> = String::new();
        router.status(&mut roomba).write_json(&mut json).unwrap();
        assert_eq!(
            json.as_str(),
            "{\"voltage\":0,\"connected\":false,\"remote_enabled\":false}"
        );
        assert!(written(&roomba).is_empty());
    }
}
