//! Roomba Hardware Abstraction Layer
//!
//! This crate defines the three hardware seams the Open Interface driver
//! needs. Platform crates (or the adapters in [`adapters`]) implement them;
//! `roomba-core` only ever talks to these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  roomba-core (lifecycle, sensors)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  roomba-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal/ │       │  board or     │
//! │ embedded-io   │       │  test doubles │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::ByteChannel`] - Half-duplex serial link to the robot
//! - [`gpio::OutputPin`] - Wake (BRC) line
//! - [`time::Clock`] - Monotonic milliseconds and blocking delay

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(feature = "embedded-hal", feature = "embedded-io"))]
pub mod adapters;
pub mod gpio;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use time::Clock;
pub use uart::ByteChannel;
