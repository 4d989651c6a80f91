//! Text command format used by wireless relays
//!
//! ```text
//! action[:speed[:duration]]
//!
//! forward:200:0     drive forward at 200 mm/s until told otherwise
//! left:150:1000     spin left for one second, then stop
//! stop
//! ```
//!
//! Action names are lowercase and matched exactly.

/// Speed used when the text omits one (mm/s)
pub const DEFAULT_SPEED: i16 = 200;

/// Errors from parsing a text command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteParseError {
    /// Nothing but whitespace
    Empty,
    /// Action name not recognized
    UnknownAction,
    /// Speed or duration is not a number in range
    InvalidNumber,
}

/// Remote-control actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteAction {
    Forward,
    Backward,
    Left,
    Right,
    Stop,
    Clean,
    Spot,
    Dock,
    Beep,
}

impl RemoteAction {
    /// Parse an action name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "forward" => Some(RemoteAction::Forward),
            "backward" => Some(RemoteAction::Backward),
            "left" => Some(RemoteAction::Left),
            "right" => Some(RemoteAction::Right),
            "stop" => Some(RemoteAction::Stop),
            "clean" => Some(RemoteAction::Clean),
            "spot" => Some(RemoteAction::Spot),
            "dock" => Some(RemoteAction::Dock),
            "beep" => Some(RemoteAction::Beep),
            _ => None,
        }
    }

    /// Wire name of the action
    pub fn name(self) -> &'static str {
        match self {
            RemoteAction::Forward => "forward",
            RemoteAction::Backward => "backward",
            RemoteAction::Left => "left",
            RemoteAction::Right => "right",
            RemoteAction::Stop => "stop",
            RemoteAction::Clean => "clean",
            RemoteAction::Spot => "spot",
            RemoteAction::Dock => "dock",
            RemoteAction::Beep => "beep",
        }
    }

    /// Whether the action moves the wheels
    pub fn is_motion(self) -> bool {
        matches!(
            self,
            RemoteAction::Forward | RemoteAction::Backward | RemoteAction::Left | RemoteAction::Right
        )
    }
}

/// A parsed remote command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RemoteCommand {
    pub action: RemoteAction,
    /// Wheel speed for motion actions (mm/s)
    pub speed: i16,
    /// Run time before an automatic stop; 0 means run until the next command
    pub duration_ms: u32,
}

impl RemoteCommand {
    /// Command with default speed and no duration
    pub const fn new(action: RemoteAction) -> Self {
        Self {
            action,
            speed: DEFAULT_SPEED,
            duration_ms: 0,
        }
    }

    /// Set speed
    pub const fn with_speed(mut self, speed: i16) -> Self {
        self.speed = speed;
        self
    }

    /// Set duration
    pub const fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Whether dispatch should stop the robot after `duration_ms`
    pub fn is_timed(&self) -> bool {
        self.duration_ms > 0 && self.action != RemoteAction::Stop
    }

    /// Parse `action[:speed[:duration]]`
    ///
    /// Empty or missing fields take their defaults. Fields past the third
    /// are ignored.
    pub fn parse(text: &str) -> Result<Self, RemoteParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RemoteParseError::Empty);
        }

        let mut fields = text.split(':');
        let action = fields
            .next()
            .and_then(|name| RemoteAction::from_name(name.trim()))
            .ok_or(RemoteParseError::UnknownAction)?;

        let speed = match fields.next().map(str::trim) {
            None | Some("") => DEFAULT_SPEED,
            Some(field) => field
                .parse::<i16>()
                .map_err(|_| RemoteParseError::InvalidNumber)?,
        };

        let duration_ms = match fields.next().map(str::trim) {
            None | Some("") => 0,
            Some(field) => field
                .parse::<u32>()
                .map_err(|_| RemoteParseError::InvalidNumber)?,
        };

        Ok(Self {
            action,
            speed,
            duration_ms,
        })
    }
}
