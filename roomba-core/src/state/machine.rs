//! Connection state machine definition

use super::events::LinkEvent;

/// Connection states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// Channel closed, nothing may be sent
    #[default]
    Disconnected,
    /// Wake sequence in progress
    Initializing,
    /// Safe mode; the robot's safety cutoffs stay active
    SafeMode,
    /// Full mode; safety cutoffs disabled
    FullMode,
}

impl ConnectionState {
    /// Check if commands may be written in this state
    pub fn is_connected(&self) -> bool {
        !matches!(self, ConnectionState::Disconnected)
    }

    /// Check if the robot has accepted a control mode
    pub fn is_ready(&self) -> bool {
        matches!(self, ConnectionState::SafeMode | ConnectionState::FullMode)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        use ConnectionState::*;
        use LinkEvent::*;

        match (self, event) {
            (Disconnected, OpenRequested) => Initializing,

            (Initializing, SafeModeEntered) => SafeMode,
            (Initializing, OpenFailed) => Disconnected,

            // Mode switches once connected
            (SafeMode, FullModeEntered) => FullMode,
            (FullMode, SafeModeEntered) => SafeMode,

            (Initializing | SafeMode | FullMode, Closed) => Disconnected,

            // Default: stay in current state
            _ => self,
        }
    }
}

/// Sensor stream state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamState {
    #[default]
    Stopped,
    Active,
}

impl StreamState {
    pub fn is_active(&self) -> bool {
        matches!(self, StreamState::Active)
    }
}
