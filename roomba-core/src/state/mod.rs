//! Connection and stream state
//!
//! The connection state gates every other operation. It changes only in
//! response to explicit lifecycle calls on the link.

pub mod events;
pub mod machine;

pub use events::LinkEvent;
pub use machine::{ConnectionState, StreamState};
