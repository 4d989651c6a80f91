//! Configuration types
//!
//! Board-agnostic link configuration. The `serde` feature derives
//! `Serialize`/`Deserialize` so a board crate can load it from whatever
//! storage it has.

pub mod link;

pub use link::*;
