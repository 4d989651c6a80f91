//! Byte packing and clamping helpers shared by the encoder and decoder

/// Fastest wheel velocity the robot accepts (mm/s)
pub const MAX_VELOCITY: i16 = 500;

/// Fastest reverse wheel velocity the robot accepts (mm/s)
pub const MIN_VELOCITY: i16 = -500;

/// Saturate a velocity into the accepted range
///
/// Out-of-range input is not an error; it is silently clamped.
pub const fn clamp_velocity(velocity: i16) -> i16 {
    if velocity > MAX_VELOCITY {
        MAX_VELOCITY
    } else if velocity < MIN_VELOCITY {
        MIN_VELOCITY
    } else {
        velocity
    }
}

/// Pack a signed 16-bit value high byte first
pub const fn pack_i16(value: i16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Unpack an unsigned big-endian 16-bit value
pub const fn unpack_u16(high: u8, low: u8) -> u16 {
    u16::from_be_bytes([high, low])
}

/// Unpack a two's-complement big-endian 16-bit value
pub const fn unpack_i16(high: u8, low: u8) -> i16 {
    i16::from_be_bytes([high, low])
}
