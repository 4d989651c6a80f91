//! Board-agnostic Open Interface driver
//!
//! This crate contains everything between the serial port and the
//! application that does not depend on a specific board:
//!
//! - Connection lifecycle (wake sequence, mode negotiation, state gating)
//! - On-demand sensor queries and stream polling with bounded timeouts
//! - The verb-level [`Roomba`] façade
//! - The remote [`CommandRouter`] used by wireless front-ends
//! - Link configuration
//!
//! Hardware is reached only through the `roomba-hal` traits, so every
//! timing-sensitive path runs against simulated doubles in tests.

#![no_std]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod link;
pub mod query;
pub mod remote;
pub mod roomba;
pub mod state;
pub mod stream;

#[cfg(test)]
mod mock;

pub use config::OiConfig;
pub use error::OiError;
pub use link::OpenInterface;
pub use remote::{CommandListener, CommandRouter, Dispatch};
pub use roomba::Roomba;
pub use state::{ConnectionState, LinkEvent, StreamState};
pub use stream::FramePoll;
