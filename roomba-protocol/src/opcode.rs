//! Open Interface opcodes

/// Start the Open Interface (enters Passive mode)
pub const START: u8 = 128;
/// Change the serial baud rate
pub const BAUD: u8 = 129;
/// Enter Safe mode
pub const SAFE: u8 = 131;
/// Enter Full mode
pub const FULL: u8 = 132;
/// Power the robot down
pub const POWER: u8 = 133;
/// Start spot cleaning
pub const SPOT: u8 = 134;
/// Start the default cleaning cycle
pub const CLEAN: u8 = 135;
/// Start a max-time cleaning cycle
pub const MAX_CLEAN: u8 = 136;
/// Drive with velocity and turn radius
pub const DRIVE: u8 = 137;
/// Set cleaning motors on/off
pub const MOTORS: u8 = 138;
/// Set indicator and power LEDs
pub const LEDS: u8 = 139;
/// Define a song
pub const SONG: u8 = 140;
/// Play a previously defined song
pub const PLAY: u8 = 141;
/// Request a single sensor packet
pub const SENSORS: u8 = 142;
/// Seek the charging dock
pub const SEEK_DOCK: u8 = 143;
/// Drive each wheel independently
pub const DRIVE_DIRECT: u8 = 145;
/// Configure the sensor stream
pub const STREAM: u8 = 148;
