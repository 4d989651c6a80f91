//! Property tests for command encoding and stream framing

use proptest::prelude::*;
use roomba_protocol::sensor::SensorId;
use roomba_protocol::{
    clamp_velocity, Command, StreamError, StreamParser, MAX_VELOCITY, MIN_VELOCITY,
};

proptest! {
    #[test]
    fn clamp_stays_in_range(v in any::<i16>()) {
        let c = clamp_velocity(v);
        prop_assert!((MIN_VELOCITY..=MAX_VELOCITY).contains(&c));
        if (MIN_VELOCITY..=MAX_VELOCITY).contains(&v) {
            prop_assert_eq!(c, v);
        }
    }

    /// Drive is opcode + 4 bytes, big-endian, velocity clamped, radius untouched
    #[test]
    fn drive_layout(velocity in any::<i16>(), radius in any::<i16>()) {
        let bytes = Command::Drive { velocity, radius }.encode().unwrap();
        prop_assert_eq!(bytes.len(), 5);
        prop_assert_eq!(bytes[0], 137);
        prop_assert_eq!(i16::from_be_bytes([bytes[1], bytes[2]]), clamp_velocity(velocity));
        prop_assert_eq!(i16::from_be_bytes([bytes[3], bytes[4]]), radius);
    }

    #[test]
    fn drive_direct_layout(right in any::<i16>(), left in any::<i16>()) {
        let bytes = Command::DriveDirect { right_velocity: right, left_velocity: left }
            .encode()
            .unwrap();
        prop_assert_eq!(bytes.len(), 5);
        prop_assert_eq!(bytes[0], 145);
        prop_assert_eq!(i16::from_be_bytes([bytes[1], bytes[2]]), clamp_velocity(right));
        prop_assert_eq!(i16::from_be_bytes([bytes[3], bytes[4]]), clamp_velocity(left));
    }

    #[test]
    fn stream_config_layout(ids in proptest::collection::vec(7u8..=26, 0..=32)) {
        let bytes = Command::ConfigureStream(&ids).encode().unwrap();
        prop_assert_eq!(bytes[0], 148);
        prop_assert_eq!(bytes[1] as usize, ids.len());
        prop_assert_eq!(&bytes[2..], &ids[..]);
    }

    /// Any well-formed frame survives arbitrary leading noise that holds no header
    #[test]
    fn stream_frame_after_noise(
        noise in proptest::collection::vec(any::<u8>().prop_filter("not a header", |b| *b != 19), 0..16),
        payload in proptest::collection::vec(any::<u8>(), 1..=64),
    ) {
        let mut wire = noise.clone();
        wire.push(19);
        wire.push(payload.len() as u8);
        wire.extend_from_slice(&payload);

        let mut parser = StreamParser::new();
        let mut buf = [0u8; 64];
        let len = parser.feed_bytes(&wire, &mut buf).unwrap().unwrap();
        prop_assert_eq!(&buf[..len], &payload[..]);
    }

    #[test]
    fn stream_oversize_rejected(size in 11u8..=255) {
        let mut parser = StreamParser::new();
        let mut buf = [0u8; 10];
        let result = parser.feed_bytes(&[19, size], &mut buf);
        prop_assert_eq!(result, Err(StreamError::Oversize { size, capacity: 10 }));
    }

    #[test]
    fn sensor_decode_accepts_table_length(raw in 7u8..=26, data in any::<[u8; 2]>()) {
        if let Some(id) = SensorId::from_byte(raw) {
            prop_assert!(id.decode(&data[..id.len()]).is_ok());
        }
    }
}
