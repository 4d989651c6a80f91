//! Sensor packet identifiers, lengths and decoding
//!
//! Each single-packet identifier has a fixed reply length and a fixed
//! encoding. The signedness of 16-bit values is part of the table and is
//! never inferred from the data: voltage is unsigned, current is two's
//! complement.

use heapless::Vec;

use crate::pack::{unpack_i16, unpack_u16};

/// Longest single sensor reply in bytes
pub const MAX_SENSOR_LEN: usize = 2;

/// Raw reply bytes for one sensor
pub type SensorBytes = Vec<u8, MAX_SENSOR_LEN>;

/// Bump bits (right, left) in the bumps and wheel drops packet
pub const BUMP_MASK: u8 = 0x03;

/// Errors that can occur while decoding sensor data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Packet id is not in the sensor table
    UnknownSensor(u8),
    /// Byte count does not match the table length
    LengthMismatch,
}

/// How a sensor's reply bytes are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorEncoding {
    /// Single-byte bitfield
    Flags,
    /// Single unsigned byte
    Unsigned8,
    /// Single signed byte
    Signed8,
    /// Big-endian unsigned 16-bit
    Unsigned16,
    /// Big-endian two's-complement 16-bit
    Signed16,
}

impl SensorEncoding {
    /// Reply length in bytes
    pub const fn len(self) -> usize {
        match self {
            SensorEncoding::Flags | SensorEncoding::Unsigned8 | SensorEncoding::Signed8 => 1,
            SensorEncoding::Unsigned16 | SensorEncoding::Signed16 => 2,
        }
    }
}

/// Single sensor packet identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorId {
    /// Bumper and wheel drop bits
    BumpsWheelDrops,
    /// Wall seen by the right-side sensor
    Wall,
    CliffLeft,
    CliffFrontLeft,
    CliffFrontRight,
    CliffRight,
    VirtualWall,
    /// Wheel and brush overcurrent bits
    WheelOvercurrents,
    /// Dirt detect level
    DirtDetect,
    /// Omnidirectional IR character
    InfraredOmni,
    /// Button press bits
    Buttons,
    /// Distance travelled since last request (mm)
    Distance,
    /// Angle turned since last request (degrees)
    Angle,
    /// Charging state code
    ChargingState,
    /// Battery voltage (mV)
    Voltage,
    /// Battery current (mA, negative when discharging)
    Current,
    /// Battery temperature (°C)
    Temperature,
    /// Battery charge (mAh)
    BatteryCharge,
    /// Battery capacity (mAh)
    BatteryCapacity,
}

impl SensorId {
    /// Every identifier in wire order
    pub const ALL: [SensorId; 19] = [
        SensorId::BumpsWheelDrops,
        SensorId::Wall,
        SensorId::CliffLeft,
        SensorId::CliffFrontLeft,
        SensorId::CliffFrontRight,
        SensorId::CliffRight,
        SensorId::VirtualWall,
        SensorId::WheelOvercurrents,
        SensorId::DirtDetect,
        SensorId::InfraredOmni,
        SensorId::Buttons,
        SensorId::Distance,
        SensorId::Angle,
        SensorId::ChargingState,
        SensorId::Voltage,
        SensorId::Current,
        SensorId::Temperature,
        SensorId::BatteryCharge,
        SensorId::BatteryCapacity,
    ];

    /// Parse an identifier from its packet id
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            7 => Some(SensorId::BumpsWheelDrops),
            8 => Some(SensorId::Wall),
            9 => Some(SensorId::CliffLeft),
            10 => Some(SensorId::CliffFrontLeft),
            11 => Some(SensorId::CliffFrontRight),
            12 => Some(SensorId::CliffRight),
            13 => Some(SensorId::VirtualWall),
            14 => Some(SensorId::WheelOvercurrents),
            15 => Some(SensorId::DirtDetect),
            17 => Some(SensorId::InfraredOmni),
            18 => Some(SensorId::Buttons),
            19 => Some(SensorId::Distance),
            20 => Some(SensorId::Angle),
            21 => Some(SensorId::ChargingState),
            22 => Some(SensorId::Voltage),
            23 => Some(SensorId::Current),
            24 => Some(SensorId::Temperature),
            25 => Some(SensorId::BatteryCharge),
            26 => Some(SensorId::BatteryCapacity),
            _ => None,
        }
    }

    /// Packet id on the wire
    pub fn to_byte(self) -> u8 {
        match self {
            SensorId::BumpsWheelDrops => 7,
            SensorId::Wall => 8,
            SensorId::CliffLeft => 9,
            SensorId::CliffFrontLeft => 10,
            SensorId::CliffFrontRight => 11,
            SensorId::CliffRight => 12,
            SensorId::VirtualWall => 13,
            SensorId::WheelOvercurrents => 14,
            SensorId::DirtDetect => 15,
            SensorId::InfraredOmni => 17,
            SensorId::Buttons => 18,
            SensorId::Distance => 19,
            SensorId::Angle => 20,
            SensorId::ChargingState => 21,
            SensorId::Voltage => 22,
            SensorId::Current => 23,
            SensorId::Temperature => 24,
            SensorId::BatteryCharge => 25,
            SensorId::BatteryCapacity => 26,
        }
    }

    /// Encoding of this sensor's reply
    pub fn encoding(self) -> SensorEncoding {
        match self {
            SensorId::BumpsWheelDrops
            | SensorId::Wall
            | SensorId::CliffLeft
            | SensorId::CliffFrontLeft
            | SensorId::CliffFrontRight
            | SensorId::CliffRight
            | SensorId::VirtualWall
            | SensorId::WheelOvercurrents
            | SensorId::Buttons => SensorEncoding::Flags,
            SensorId::DirtDetect | SensorId::InfraredOmni | SensorId::ChargingState => {
                SensorEncoding::Unsigned8
            }
            SensorId::Temperature => SensorEncoding::Signed8,
            SensorId::Distance | SensorId::Angle | SensorId::Current => SensorEncoding::Signed16,
            SensorId::Voltage | SensorId::BatteryCharge | SensorId::BatteryCapacity => {
                SensorEncoding::Unsigned16
            }
        }
    }

    /// Reply length in bytes
    pub fn len(self) -> usize {
        self.encoding().len()
    }

    /// Decode reply bytes according to the table
    pub fn decode(self, bytes: &[u8]) -> Result<SensorValue, DecodeError> {
        if bytes.len() != self.len() {
            return Err(DecodeError::LengthMismatch);
        }

        let value = match self.encoding() {
            SensorEncoding::Flags => SensorValue::Flags(bytes[0]),
            SensorEncoding::Unsigned8 => SensorValue::Unsigned8(bytes[0]),
            SensorEncoding::Signed8 => SensorValue::Signed8(bytes[0] as i8),
            SensorEncoding::Unsigned16 => SensorValue::Unsigned16(unpack_u16(bytes[0], bytes[1])),
            SensorEncoding::Signed16 => SensorValue::Signed16(unpack_i16(bytes[0], bytes[1])),
        };
        Ok(value)
    }
}

/// A decoded sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorValue {
    Flags(u8),
    Unsigned8(u8),
    Signed8(i8),
    Unsigned16(u16),
    Signed16(i16),
}

impl SensorValue {
    /// Widen to a signed integer, preserving sign
    pub fn as_i32(self) -> i32 {
        match self {
            SensorValue::Flags(v) | SensorValue::Unsigned8(v) => v as i32,
            SensorValue::Signed8(v) => v as i32,
            SensorValue::Unsigned16(v) => v as i32,
            SensorValue::Signed16(v) => v as i32,
        }
    }

    /// True when any bit / the value is nonzero
    pub fn is_set(self) -> bool {
        self.as_i32() != 0
    }

    /// True when a bumper bit is set in a bumps packet
    pub fn bumper_pressed(self) -> bool {
        match self {
            SensorValue::Flags(bits) => bits & BUMP_MASK != 0,
            _ => false,
        }
    }
}
