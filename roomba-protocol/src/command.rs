//! Typed Open Interface commands and their byte encoding
//!
//! Every command starts with its opcode. Payload rules:
//! - Drive / DriveDirect: two 16-bit fields, high byte first, velocities
//!   clamped to [-500, 500] before packing
//! - Motors: one bitfield byte (side 0x01, vacuum 0x02, main 0x04)
//! - LEDs: indicator bits, power color, power intensity
//! - Song: slot, note count, (note, duration) pairs
//! - Stream: sensor count followed by the raw sensor ids (count 0 stops it)

use heapless::Vec;

use crate::opcode;
use crate::pack::{clamp_velocity, pack_i16};
use crate::sensor::SensorId;

/// Radius value meaning "drive straight" (0x8000)
pub const RADIUS_STRAIGHT: i16 = i16::MIN;

/// Alternate "drive straight" radius (0x7FFF)
pub const RADIUS_STRAIGHT_ALT: i16 = i16::MAX;

/// Spin in place counter-clockwise
pub const RADIUS_TURN_CCW: i16 = 1;

/// Spin in place clockwise
pub const RADIUS_TURN_CW: i16 = -1;

/// Side brush bit in the motors payload
pub const MOTOR_SIDE_BRUSH: u8 = 0x01;
/// Vacuum bit in the motors payload
pub const MOTOR_VACUUM: u8 = 0x02;
/// Main brush bit in the motors payload
pub const MOTOR_MAIN_BRUSH: u8 = 0x04;

/// Maximum notes in one song
pub const MAX_SONG_NOTES: usize = 16;

/// Highest song slot the robot stores
pub const MAX_SONG_SLOT: u8 = 4;

/// Maximum sensor ids in one stream request
pub const MAX_STREAM_SENSORS: usize = 32;

/// Longest encoded command (a full 16-note song)
pub const MAX_COMMAND_LEN: usize = 3 + 2 * MAX_SONG_NOTES;

/// Errors that can occur while encoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EncodeError {
    /// Song has no notes
    EmptySong,
    /// Song has more than [`MAX_SONG_NOTES`] notes
    TooManyNotes,
    /// Song slot above [`MAX_SONG_SLOT`]
    InvalidSongSlot,
    /// Stream request lists more than [`MAX_STREAM_SENSORS`] ids
    TooManySensors,
    /// Output buffer too small
    BufferTooSmall,
}

/// Serial baud rate codes understood by the Baud command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudCode {
    B300 = 0,
    B600 = 1,
    B1200 = 2,
    B2400 = 3,
    B4800 = 4,
    B9600 = 5,
    B14400 = 6,
    B19200 = 7,
    B28800 = 8,
    B38400 = 9,
    B57600 = 10,
    B115200 = 11,
}

impl BaudCode {
    /// Look up the code for a baud rate
    pub fn from_baud(baud: u32) -> Option<Self> {
        match baud {
            300 => Some(BaudCode::B300),
            600 => Some(BaudCode::B600),
            1200 => Some(BaudCode::B1200),
            2400 => Some(BaudCode::B2400),
            4800 => Some(BaudCode::B4800),
            9600 => Some(BaudCode::B9600),
            14400 => Some(BaudCode::B14400),
            19200 => Some(BaudCode::B19200),
            28800 => Some(BaudCode::B28800),
            38400 => Some(BaudCode::B38400),
            57600 => Some(BaudCode::B57600),
            115200 => Some(BaudCode::B115200),
            _ => None,
        }
    }

    /// Baud rate in bits per second
    pub fn baud(self) -> u32 {
        match self {
            BaudCode::B300 => 300,
            BaudCode::B600 => 600,
            BaudCode::B1200 => 1200,
            BaudCode::B2400 => 2400,
            BaudCode::B4800 => 4800,
            BaudCode::B9600 => 9600,
            BaudCode::B14400 => 14400,
            BaudCode::B19200 => 19200,
            BaudCode::B28800 => 28800,
            BaudCode::B38400 => 38400,
            BaudCode::B57600 => 57600,
            BaudCode::B115200 => 115200,
        }
    }

    /// Wire value
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Indicator LED bits for the LEDs command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedBits(u8);

impl LedBits {
    pub const DEBRIS: u8 = 0x01;
    pub const SPOT: u8 = 0x02;
    pub const DOCK: u8 = 0x04;
    pub const CHECK_ROBOT: u8 = 0x08;

    /// All indicators off
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build from individual indicator states
    pub const fn from_flags(debris: bool, spot: bool, dock: bool, check_robot: bool) -> Self {
        let mut bits = 0;
        if debris {
            bits |= Self::DEBRIS;
        }
        if spot {
            bits |= Self::SPOT;
        }
        if dock {
            bits |= Self::DOCK;
        }
        if check_robot {
            bits |= Self::CHECK_ROBOT;
        }
        Self(bits)
    }

    /// Build from a raw byte, dropping undefined bits
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// Raw bitfield
    pub const fn bits(self) -> u8 {
        self.0
    }
}

/// One note of a song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// MIDI note number (31-127 are audible)
    pub note: u8,
    /// Duration in 1/64ths of a second
    pub duration: u8,
}

impl Note {
    pub const fn new(note: u8, duration: u8) -> Self {
        Self { note, duration }
    }
}

/// A command to the robot
///
/// Slices are borrowed so commands can be built on the stack and encoded
/// without allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Start the Open Interface
    Start,
    /// Switch the robot's baud rate
    SetBaud(BaudCode),
    /// Enter Safe mode
    SetSafeMode,
    /// Enter Full mode
    SetFullMode,
    /// Power down
    PowerOff,
    /// Drive with a velocity (mm/s) and turn radius (mm)
    Drive { velocity: i16, radius: i16 },
    /// Drive each wheel at its own velocity (mm/s)
    DriveDirect {
        right_velocity: i16,
        left_velocity: i16,
    },
    /// Default cleaning cycle
    Clean,
    /// Max-time cleaning cycle
    MaxClean,
    /// Spot cleaning
    Spot,
    /// Return to the dock
    SeekDock,
    /// Cleaning motors on/off
    SetMotors {
        main_brush: bool,
        side_brush: bool,
        vacuum: bool,
    },
    /// Indicator and power LEDs
    SetLeds {
        bits: LedBits,
        power_color: u8,
        power_intensity: u8,
    },
    /// Request one sensor packet
    QuerySensor(SensorId),
    /// Configure the sensor stream (empty stops it)
    ConfigureStream(&'a [u8]),
    /// Define a song in a slot
    Song { slot: u8, notes: &'a [Note] },
    /// Play a defined song
    Play { slot: u8 },
}

impl Command<'_> {
    /// Opcode that leads this command on the wire
    pub fn opcode(&self) -> u8 {
        match self {
            Command::Start => opcode::START,
            Command::SetBaud(_) => opcode::BAUD,
            Command::SetSafeMode => opcode::SAFE,
            Command::SetFullMode => opcode::FULL,
            Command::PowerOff => opcode::POWER,
            Command::Drive { .. } => opcode::DRIVE,
            Command::DriveDirect { .. } => opcode::DRIVE_DIRECT,
            Command::Clean => opcode::CLEAN,
            Command::MaxClean => opcode::MAX_CLEAN,
            Command::Spot => opcode::SPOT,
            Command::SeekDock => opcode::SEEK_DOCK,
            Command::SetMotors { .. } => opcode::MOTORS,
            Command::SetLeds { .. } => opcode::LEDS,
            Command::QuerySensor(_) => opcode::SENSORS,
            Command::ConfigureStream(_) => opcode::STREAM,
            Command::Song { .. } => opcode::SONG,
            Command::Play { .. } => opcode::PLAY,
        }
    }

    /// Encode this command into a heapless Vec
    pub fn encode(&self) -> Result<Vec<u8, MAX_COMMAND_LEN>, EncodeError> {
        let mut out = Vec::new();
        push(&mut out, self.opcode())?;

        match *self {
            Command::Start
            | Command::SetSafeMode
            | Command::SetFullMode
            | Command::PowerOff
            | Command::Clean
            | Command::MaxClean
            | Command::Spot
            | Command::SeekDock => {}
            Command::SetBaud(code) => push(&mut out, code.code())?,
            Command::Drive { velocity, radius } => {
                extend(&mut out, &pack_i16(clamp_velocity(velocity)))?;
                extend(&mut out, &pack_i16(radius))?;
            }
            Command::DriveDirect {
                right_velocity,
                left_velocity,
            } => {
                extend(&mut out, &pack_i16(clamp_velocity(right_velocity)))?;
                extend(&mut out, &pack_i16(clamp_velocity(left_velocity)))?;
            }
            Command::SetMotors {
                main_brush,
                side_brush,
                vacuum,
            } => push(&mut out, motor_bits(main_brush, side_brush, vacuum))?,
            Command::SetLeds {
                bits,
                power_color,
                power_intensity,
            } => extend(&mut out, &[bits.bits(), power_color, power_intensity])?,
            Command::QuerySensor(id) => push(&mut out, id.to_byte())?,
            Command::ConfigureStream(ids) => {
                if ids.len() > MAX_STREAM_SENSORS {
                    return Err(EncodeError::TooManySensors);
                }
                push(&mut out, ids.len() as u8)?;
                extend(&mut out, ids)?;
            }
            Command::Song { slot, notes } => {
                if slot > MAX_SONG_SLOT {
                    return Err(EncodeError::InvalidSongSlot);
                }
                if notes.is_empty() {
                    return Err(EncodeError::EmptySong);
                }
                if notes.len() > MAX_SONG_NOTES {
                    return Err(EncodeError::TooManyNotes);
                }
                push(&mut out, slot)?;
                push(&mut out, notes.len() as u8)?;
                for note in notes {
                    extend(&mut out, &[note.note, note.duration])?;
                }
            }
            Command::Play { slot } => {
                if slot > MAX_SONG_SLOT {
                    return Err(EncodeError::InvalidSongSlot);
                }
                push(&mut out, slot)?;
            }
        }

        Ok(out)
    }

    /// Encode this command into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<usize, EncodeError> {
        let bytes = self.encode()?;
        if buffer.len() < bytes.len() {
            return Err(EncodeError::BufferTooSmall);
        }
        buffer[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

/// Combine cleaning motor states into the motors payload byte
pub const fn motor_bits(main_brush: bool, side_brush: bool, vacuum: bool) -> u8 {
    let mut bits = 0;
    if side_brush {
        bits |= MOTOR_SIDE_BRUSH;
    }
    if vacuum {
        bits |= MOTOR_VACUUM;
    }
    if main_brush {
        bits |= MOTOR_MAIN_BRUSH;
    }
    bits
}

fn push(out: &mut Vec<u8, MAX_COMMAND_LEN>, byte: u8) -> Result<(), EncodeError> {
    out.push(byte).map_err(|_| EncodeError::BufferTooSmall)
}

fn extend(out: &mut Vec<u8, MAX_COMMAND_LEN>, bytes: &[u8]) -> Result<(), EncodeError> {
    out.extend_from_slice(bytes)
        .map_err(|_| EncodeError::BufferTooSmall)
}
