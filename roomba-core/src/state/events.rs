//! Events that trigger connection state transitions

/// Lifecycle events reported by the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Caller asked to open a disconnected link
    OpenRequested,
    /// Safe mode command was sent
    SafeModeEntered,
    /// Full mode command was sent
    FullModeEntered,
    /// Wake sequence could not open the channel
    OpenFailed,
    /// Link was closed
    Closed,
}
