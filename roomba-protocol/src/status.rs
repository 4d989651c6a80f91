//! Status reports sent back over wireless relays

use core::fmt::{self, Write};

/// Snapshot of robot status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusReport {
    /// Battery voltage (mV)
    pub voltage_mv: u16,
    pub connected: bool,
    pub wall: bool,
    pub bumper: bool,
    pub remote_enabled: bool,
}

impl StatusReport {
    /// Write `voltage:connected:wall:bumper:remote` with 1/0 flags
    pub fn write_text<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "{}:{}:{}:{}:{}",
            self.voltage_mv,
            flag(self.connected),
            flag(self.wall),
            flag(self.bumper),
            flag(self.remote_enabled)
        )
    }

    /// Write `{"voltage":V,"connected":B,"remote_enabled":B}`
    pub fn write_json<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(
            out,
            "{{\"voltage\":{},\"connected\":{},\"remote_enabled\":{}}}",
            self.voltage_mv, self.connected, self.remote_enabled
        )
    }
}

fn flag(value: bool) -> u8 {
    value as u8
}
