//! iRobot Open Interface protocol
//!
//! This crate turns typed commands into the exact byte sequences the robot
//! expects and turns the robot's replies back into typed sensor values. It
//! performs no I/O; `roomba-core` drives a serial channel with it.
//!
//! # Protocol Overview
//!
//! Commands are opcode-led byte strings with fixed-size payloads. Multi-byte
//! fields are 16-bit big-endian:
//! ```text
//! ┌────────┬──────────────────────────────┐
//! │ OPCODE │ PAYLOAD (0-35 bytes)         │
//! │ 1B     │ command specific             │
//! └────────┴──────────────────────────────┘
//! ```
//!
//! Sensor queries are answered with a bare payload whose length is fixed per
//! sensor identifier. Streamed sensor data arrives framed:
//! ```text
//! ┌────────┬──────┬─────────────────────────┐
//! │ HEADER │ SIZE │ PAYLOAD (SIZE bytes)    │
//! │ 19     │ 1B   │ [id, data...]...        │
//! └────────┴──────┴─────────────────────────┘
//! ```
//!
//! The textual relay protocol (`action:speed:duration`) and status strings
//! used by wireless front-ends live in [`remote`] and [`status`].

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod opcode;
pub mod pack;
pub mod remote;
pub mod sensor;
pub mod status;
pub mod stream;

pub use command::{BaudCode, Command, EncodeError, LedBits, Note, MAX_COMMAND_LEN};
pub use pack::{clamp_velocity, MAX_VELOCITY, MIN_VELOCITY};
pub use remote::{RemoteAction, RemoteCommand, RemoteParseError, DEFAULT_SPEED};
pub use sensor::{DecodeError, SensorBytes, SensorEncoding, SensorId, SensorValue};
pub use status::StatusReport;
pub use stream::{StreamError, StreamFrame, StreamPackets, StreamParser, StreamPhase, STREAM_HEADER};
